use serde::Serialize;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::dashboard::{AuthGate, AuthState, ListPage, SessionStore};
use crate::error::AppResult;
use crate::external::{ApiClient, Resource, ResourceApi};
use crate::models::LoginForm;

/// Where the shell should go after an auth transition.
#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub redirect: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    #[serde(flatten)]
    pub state: AuthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

/// Shared by every gateway worker: the unauthenticated client, the token store
/// and the list-page settings. Each request builds its own page from these.
#[derive(Clone)]
pub struct ConsoleService {
    client: ApiClient,
    store: Arc<dyn SessionStore>,
    dashboard: DashboardConfig,
}

impl ConsoleService {
    pub fn new(client: ApiClient, store: Arc<dyn SessionStore>, dashboard: DashboardConfig) -> Self {
        Self {
            client,
            store,
            dashboard,
        }
    }

    pub fn store(&self) -> Arc<dyn SessionStore> {
        self.store.clone()
    }

    pub fn dashboard(&self) -> &DashboardConfig {
        &self.dashboard
    }

    fn gate(&self) -> AuthGate<Arc<dyn SessionStore>> {
        AuthGate::new(self.store.clone())
    }

    pub async fn login(&self, form: &LoginForm) -> AppResult<Navigation> {
        let redirect = self.gate().login(&self.client, form).await?;
        Ok(Navigation { redirect })
    }

    pub fn logout(&self) -> AppResult<Navigation> {
        let redirect = self.gate().logout()?;
        Ok(Navigation { redirect })
    }

    pub fn status(&self) -> AppResult<SessionStatus> {
        let mut gate = self.gate();
        gate.check()?;
        Ok(SessionStatus {
            state: gate.state().clone(),
            redirect: gate.redirect(),
        })
    }

    /// Client carrying the stored token.
    pub fn client(&self) -> AppResult<ApiClient> {
        Ok(self.client.with_session(self.store.load()?))
    }

    pub fn api<R: Resource>(&self) -> AppResult<ResourceApi<R>> {
        Ok(ResourceApi::new(self.client()?))
    }

    pub fn page<R: Resource>(&self) -> AppResult<ListPage<R, ResourceApi<R>>> {
        Ok(ListPage::new(self.api::<R>()?, &self.dashboard))
    }
}

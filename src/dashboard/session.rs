//! Current-session context and the three-state auth gate.
//!
//! The token lives in a [`SessionStore`]; everything that needs it receives a
//! [`Session`] value explicitly instead of reading storage on its own.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::external::ApiClient;
use crate::models::LoginForm;
use crate::validation::Validate;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl Session {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> AppResult<Session>;
    fn save(&self, session: &Session) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

/// Session persisted as a small JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> AppResult<Session> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(session) => Ok(session),
                Err(e) => {
                    log::warn!("Ignoring unreadable session file {:?}: {e}", self.path);
                    Ok(Session::default())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec(session)?)?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Session>,
}

impl MemorySessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Session>> {
        self.inner
            .lock()
            .map_err(|_| AppError::InternalError("session store poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> AppResult<Session> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        *self.lock()? = session.clone();
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.lock()? = Session::default();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    CheckingAuth,
    Authenticated,
    Unauthenticated,
}

/// `CheckingAuth -> Authenticated | Unauthenticated`. Login moves
/// `Unauthenticated -> Authenticated`, logout the other way. Nothing returns
/// to `CheckingAuth`.
pub struct AuthGate<S> {
    store: S,
    state: AuthState,
    session: Session,
}

impl<S: SessionStore> AuthGate<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: AuthState::CheckingAuth,
            session: Session::default(),
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reads the persisted token once. Later calls return the settled state.
    pub fn check(&mut self) -> AppResult<&AuthState> {
        if self.state == AuthState::CheckingAuth {
            self.session = self.store.load()?;
            self.state = if self.session.is_authenticated() {
                AuthState::Authenticated
            } else {
                log::debug!("No stored token, redirecting to {LOGIN_ROUTE}");
                AuthState::Unauthenticated
            };
        }
        Ok(&self.state)
    }

    /// Route the shell should navigate to, if any.
    pub fn redirect(&self) -> Option<&'static str> {
        match self.state {
            AuthState::Unauthenticated => Some(LOGIN_ROUTE),
            _ => None,
        }
    }

    /// Validates the form, exchanges credentials for a token and persists it.
    pub async fn login(&mut self, client: &ApiClient, form: &LoginForm) -> AppResult<&'static str> {
        form.validate()?;
        let session = client.login(form).await?;
        self.store.save(&session)?;
        self.session = session;
        self.state = AuthState::Authenticated;
        Ok(HOME_ROUTE)
    }

    pub fn logout(&mut self) -> AppResult<&'static str> {
        self.store.clear()?;
        self.session = Session::default();
        self.state = AuthState::Unauthenticated;
        log::info!("Admin logged out");
        Ok(LOGIN_ROUTE)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn load(&self) -> AppResult<Session> {
        (**self).load()
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        (**self).save(session)
    }

    fn clear(&self) -> AppResult<()> {
        (**self).clear()
    }
}

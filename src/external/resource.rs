use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::error::AppResult;
use crate::external::client::{ApiClient, MultipartBody, Upload};
use crate::external::envelope::{Ack, Listing};
use crate::validation::{FieldErrors, Validate};

/// One CRUD-shaped endpoint family of the backend.
pub trait Resource: Send + Sync + 'static {
    /// Backend path segment, e.g. `strategies`.
    const PATH: &'static str;
    /// Path segment the gateway serves the page under.
    const SLUG: &'static str;
    /// Singular display name used in toasts.
    const LABEL: &'static str;
    /// Backend filters by `search` itself; otherwise the loaded page is filtered locally.
    const SERVER_SEARCH: bool = false;
    /// Search input is debounced before it triggers a fetch.
    const DEBOUNCE_SEARCH: bool = false;
    const EDITABLE: bool = true;
    const DELETABLE: bool = true;
    /// Rows carry an `isActive` flag the backend can flip.
    const TOGGLEABLE: bool = false;
    /// Multipart part a file upload arrives under, for resources that take one.
    const UPLOAD_FIELD: Option<&'static str> = None;

    type Item: DeserializeOwned + Serialize + Clone + Send + Sync + 'static;
    type Form: DeserializeOwned + Serialize + Validate + Clone + Send + Sync + 'static;

    fn id(item: &Self::Item) -> &str;

    /// Fields a free-text search matches against.
    fn search_fields(item: &Self::Item) -> Vec<&str>;

    /// Input normalization applied before a form is validated.
    fn prepare(form: Self::Form) -> Self::Form {
        form
    }

    /// Pre-fills the edit dialog.
    fn edit_form(_item: &Self::Item) -> Option<Self::Form> {
        None
    }

    /// `Some` for resources carrying an `isActive` flag.
    fn active_flag(_item: &Self::Item) -> Option<bool> {
        None
    }

    /// `Some` for resources whose create/update calls are multipart.
    fn multipart(_form: &Self::Form) -> Option<MultipartBody> {
        None
    }

    /// Puts an uploaded file on the form.
    fn attach(_form: &mut Self::Form, _upload: Upload) {}

    /// Applied to every fetched page: display order, derived fields.
    fn after_fetch(_items: &mut [Self::Item]) {}
}

/// Form type of read-only resources; it has no values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NoForm {}

impl Validate for NoForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        match *self {}
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: None,
        }
    }

    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }
}

/// The calls a list page makes. Implemented over HTTP by [`ResourceApi`].
#[async_trait]
pub trait ResourceBackend<R: Resource>: Send + Sync {
    async fn list(&self, query: &ListQuery) -> AppResult<Listing<R::Item>>;
    async fn create(&self, form: &R::Form) -> AppResult<Ack>;
    async fn update(&self, id: &str, form: &R::Form) -> AppResult<Ack>;
    async fn delete(&self, id: &str) -> AppResult<Ack>;
    async fn set_active(&self, id: &str, active: bool) -> AppResult<Ack>;
}

/// Wrapper for one resource: `GET /<path>`, `POST /<path>/add`,
/// `PUT /<path>/edit/:id`, `DELETE /<path>/delete/:id`.
pub struct ResourceApi<R> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceApi<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn write(&self, method: Method, path: &str, form: &R::Form) -> AppResult<Ack> {
        let envelope = match R::multipart(form) {
            Some(body) => self.client.send_multipart(method, path, body).await?,
            None => self.client.send_json(method, path, form).await?,
        };
        Ok(envelope.ack("Saved"))
    }
}

#[async_trait]
impl<R: Resource> ResourceBackend<R> for ResourceApi<R> {
    async fn list(&self, query: &ListQuery) -> AppResult<Listing<R::Item>> {
        let mut query = query.clone();
        if !R::SERVER_SEARCH {
            query.search = None;
        }
        let mut listing: Listing<R::Item> = self.client.get_listing(R::PATH, &query).await?;
        R::after_fetch(&mut listing.data);
        Ok(listing)
    }

    async fn create(&self, form: &R::Form) -> AppResult<Ack> {
        self.write(Method::POST, &format!("{}/add", R::PATH), form)
            .await
    }

    async fn update(&self, id: &str, form: &R::Form) -> AppResult<Ack> {
        self.write(Method::PUT, &format!("{}/edit/{id}", R::PATH), form)
            .await
    }

    async fn delete(&self, id: &str) -> AppResult<Ack> {
        let envelope = self
            .client
            .delete(&format!("{}/delete/{id}", R::PATH))
            .await?;
        Ok(envelope.ack("Deleted"))
    }

    async fn set_active(&self, id: &str, active: bool) -> AppResult<Ack> {
        let envelope = self
            .client
            .send_json(
                Method::PUT,
                &format!("{}/status/{id}", R::PATH),
                &serde_json::json!({ "isActive": active }),
            )
            .await?;
        Ok(envelope.ack("Status updated"))
    }
}

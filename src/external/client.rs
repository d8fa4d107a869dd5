use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::dashboard::Session;
use crate::error::{AppError, AppResult};
use crate::external::envelope::{Envelope, Listing};
use crate::models::LoginForm;

pub const AUTH_HEADER: &str = "x-auth-token";

/// File content attached to a multipart write. Only ever built from bytes
/// the caller already holds; nothing is read from disk on its behalf.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        Self {
            file_name: if file_name.trim().is_empty() {
                "upload".to_string()
            } else {
                file_name
            },
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Text fields plus an optional file for the multipart endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartBody {
    pub fields: Vec<(&'static str, String)>,
    pub file: Option<FileField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileField {
    pub name: &'static str,
    pub upload: Upload,
}

impl MultipartBody {
    pub fn text(mut self, name: &'static str, value: impl ToString) -> Self {
        self.fields.push((name, value.to_string()));
        self
    }

    pub fn text_opt<V: ToString>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    pub fn file(mut self, name: &'static str, upload: Option<&Upload>) -> Self {
        self.file = upload.map(|u| FileField {
            name,
            upload: u.clone(),
        });
        self
    }

    fn into_form(self) -> Form {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        if let Some(file) = self.file {
            let Upload { file_name, bytes } = file.upload;
            form = form.part(file.name, Part::bytes(bytes).file_name(file_name));
        }
        form
    }
}

/// Thin HTTP wrapper around the platform backend.
///
/// The session is injected explicitly; every request carries its token in the
/// `x-auth-token` header when one is present.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Arc<str>,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let mut builder = Client::builder().user_agent("algodesk-admin");
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            session: Session::default(),
        })
    }

    /// Returns a copy of this client acting on behalf of `session`.
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.header(AUTH_HEADER, token),
            None => builder,
        }
    }

    pub async fn get_listing<T, Q>(&self, path: &str, query: &Q) -> AppResult<Listing<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.request(Method::GET, path).query(query).send().await?;
        read_envelope(response).await?.into_listing()
    }

    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> AppResult<Envelope> {
        let response = self.request(method, path).json(body).send().await?;
        read_envelope(response).await
    }

    pub async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        body: MultipartBody,
    ) -> AppResult<Envelope> {
        let response = self
            .request(method, path)
            .multipart(body.into_form())
            .send()
            .await?;
        read_envelope(response).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<Envelope> {
        let response = self.request(Method::DELETE, path).send().await?;
        read_envelope(response).await
    }

    /// Posts admin credentials and returns the session holding the issued token.
    pub async fn login(&self, form: &LoginForm) -> AppResult<Session> {
        let envelope = self.send_json(Method::POST, "user/adminLogin", form).await?;
        let token = extract_token(&envelope.payload)
            .ok_or_else(|| AppError::AuthError("Login response carried no token".to_string()))?;
        log::info!("Admin login succeeded for {}", form.email);
        Ok(Session::with_token(token))
    }
}

fn extract_token(payload: &Value) -> Option<String> {
    match payload {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| map.get("data").and_then(extract_token)),
        _ => None,
    }
}

async fn read_envelope(response: Response) -> AppResult<Envelope> {
    let status = response.status();
    let body = response.text().await?;
    let parsed = serde_json::from_str::<Envelope>(&body);

    match parsed {
        Ok(envelope) if status.is_success() && envelope.success => Ok(envelope),
        Ok(envelope) => {
            log::error!(
                "Backend call failed: HTTP {} {:?}",
                status.as_u16(),
                envelope.message
            );
            Err(AppError::api(status.as_u16(), envelope.message))
        }
        Err(e) if status.is_success() => {
            log::error!("Backend returned a non-envelope body: {e}");
            Err(e.into())
        }
        Err(_) => {
            log::error!("Backend call failed: HTTP {}", status.as_u16());
            Err(AppError::api(status.as_u16(), None))
        }
    }
}

#![allow(dead_code)]

//! In-memory stand-in for the platform backend, served by a real actix
//! `HttpServer` on an ephemeral port so the reqwest client is exercised end to end.

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, guard, web};
use futures_util::TryStreamExt;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use algodesk_admin::config::ApiConfig;
use algodesk_admin::external::{AUTH_HEADER, ApiClient};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "secret123";
pub const ADMIN_TOKEN: &str = "tok-admin-1";

#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub token: Option<String>,
    /// Parts of a multipart body, in arrival order.
    pub parts: Vec<FormPart>,
}

#[derive(Debug, Clone)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub body: Vec<u8>,
}

impl Call {
    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.part(name)
            .map(|p| String::from_utf8_lossy(&p.body).into_owned())
    }
}

#[derive(Default)]
pub struct BackendState {
    pub rows: HashMap<String, Vec<Value>>,
    pub calls: Vec<Call>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub fn seed(&self, resource: &str, rows: Vec<Value>) {
        self.state
            .lock()
            .unwrap()
            .rows
            .insert(resource.to_string(), rows);
    }

    pub fn rows(&self, resource: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .rows
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls other than list fetches.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method != "GET")
            .collect()
    }

    fn record(&self, req: &HttpRequest) {
        self.record_parts(req, Vec::new());
    }

    fn record_parts(&self, req: &HttpRequest, parts: Vec<FormPart>) {
        let query = web::Query::<HashMap<String, String>>::from_query(req.query_string())
            .map(|q| q.into_inner())
            .unwrap_or_default();
        let token = req
            .headers()
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.state.lock().unwrap().calls.push(Call {
            method: req.method().to_string(),
            path: req.path().to_string(),
            query,
            token,
            parts,
        });
    }

    fn insert(&self, resource: String, body: Value) -> HttpResponse {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("id-{}", state.next_id);
        let mut row: Map<String, Value> = body.as_object().cloned().unwrap_or_default();
        row.insert("_id".to_string(), json!(id));
        state
            .rows
            .entry(resource)
            .or_default()
            .push(Value::Object(row));
        ok(json!({ "_id": id }), "Added")
    }

    fn patch(&self, resource: String, id: String, body: Value) -> HttpResponse {
        let mut state = self.state.lock().unwrap();
        let rows = state.rows.entry(resource).or_default();
        match rows.iter_mut().find(|r| r["_id"] == json!(id)) {
            Some(row) => {
                if let (Some(target), Some(patch)) = (row.as_object_mut(), body.as_object()) {
                    for (k, v) in patch {
                        target.insert(k.clone(), v.clone());
                    }
                }
                ok(Value::Null, "Updated")
            }
            None => fail(404, "Record not found"),
        }
    }
}

fn ok(payload: Value, message: &str) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true, "message": message, "payload": payload }))
}

fn fail(status: u16, message: &str) -> HttpResponse {
    HttpResponse::build(actix_web::http::StatusCode::from_u16(status).unwrap())
        .json(json!({ "success": false, "message": message }))
}

fn matches(row: &Value, term: &str) -> bool {
    let term = term.to_lowercase();
    row.as_object()
        .map(|o| {
            o.values()
                .filter_map(Value::as_str)
                .any(|v| v.to_lowercase().contains(&term))
        })
        .unwrap_or(false)
}

async fn admin_login(
    backend: web::Data<FakeBackend>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> HttpResponse {
    backend.record(&req);
    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    if email == Some(ADMIN_EMAIL) && password == Some(ADMIN_PASSWORD) {
        ok(json!({ "token": ADMIN_TOKEN }), "Login successful")
    } else {
        fail(401, "Invalid credentials")
    }
}

async fn list(
    backend: web::Data<FakeBackend>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    backend.record(&req);
    let rows = backend.rows(&path);
    let filtered: Vec<Value> = match query.get("search") {
        Some(term) => rows.into_iter().filter(|r| matches(r, term)).collect(),
        None => rows,
    };
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let data: Vec<Value> = filtered
        .iter()
        .skip((page.max(1) - 1) * limit)
        .take(limit)
        .cloned()
        .collect();
    ok(json!({ "data": data, "count": filtered.len() }), "Fetched")
}

fn is_multipart(ctx: &guard::GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

async fn read_parts(mut payload: Multipart) -> Vec<FormPart> {
    let mut parts = Vec::new();
    while let Ok(Some(mut field)) = payload.try_next().await {
        let name = field.name().to_string();
        let file_name = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);
        let mut body = Vec::new();
        while let Ok(Some(chunk)) = field.try_next().await {
            body.extend_from_slice(&chunk);
        }
        parts.push(FormPart {
            name,
            file_name,
            body,
        });
    }
    parts
}

/// Text parts become row fields, numbers kept numeric; a file part is stored
/// by its file name.
fn row_from_parts(parts: &[FormPart]) -> Value {
    let row: Map<String, Value> = parts
        .iter()
        .map(|p| {
            let value = match &p.file_name {
                Some(file_name) => json!(file_name),
                None => {
                    let text = String::from_utf8_lossy(&p.body).into_owned();
                    match serde_json::from_str::<serde_json::Number>(&text) {
                        Ok(number) => Value::Number(number),
                        Err(_) => Value::String(text),
                    }
                }
            };
            (p.name.clone(), value)
        })
        .collect();
    Value::Object(row)
}

async fn add_multipart(
    backend: web::Data<FakeBackend>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: Multipart,
) -> HttpResponse {
    let parts = read_parts(payload).await;
    let row = row_from_parts(&parts);
    backend.record_parts(&req, parts);
    backend.insert(path.into_inner(), row)
}

async fn add(
    backend: web::Data<FakeBackend>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    backend.record(&req);
    backend.insert(path.into_inner(), body.into_inner())
}

async fn edit_multipart(
    backend: web::Data<FakeBackend>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    payload: Multipart,
) -> HttpResponse {
    let parts = read_parts(payload).await;
    let patch = row_from_parts(&parts);
    backend.record_parts(&req, parts);
    let (resource, id) = path.into_inner();
    backend.patch(resource, id, patch)
}

async fn edit(
    backend: web::Data<FakeBackend>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
) -> HttpResponse {
    backend.record(&req);
    let (resource, id) = path.into_inner();
    backend.patch(resource, id, body.into_inner())
}

async fn delete(
    backend: web::Data<FakeBackend>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    backend.record(&req);
    let (resource, id) = path.into_inner();
    let mut state = backend.state.lock().unwrap();
    let rows = state.rows.entry(resource).or_default();
    let before = rows.len();
    rows.retain(|r| r["_id"] != json!(id));
    if rows.len() < before {
        ok(Value::Null, "Deleted")
    } else {
        fail(404, "Record not found")
    }
}

/// Starts the fake backend and returns it with its base URL.
pub fn spawn_backend() -> (FakeBackend, String) {
    let backend = FakeBackend::default();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let data = backend.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(data.clone()))
            .route("/user/adminLogin", web::post().to(admin_login))
            .route("/{resource}", web::get().to(list))
            .route(
                "/{resource}/add",
                web::post().guard(guard::fn_guard(is_multipart)).to(add_multipart),
            )
            .route("/{resource}/add", web::post().to(add))
            .route(
                "/{resource}/edit/{id}",
                web::put().guard(guard::fn_guard(is_multipart)).to(edit_multipart),
            )
            .route("/{resource}/edit/{id}", web::put().to(edit))
            .route("/{resource}/status/{id}", web::put().to(edit))
            .route("/{resource}/delete/{id}", web::delete().to(delete))
    })
    .workers(1)
    .listen(listener)
    .unwrap()
    .run();
    actix_web::rt::spawn(server);
    (backend, format!("http://127.0.0.1:{port}"))
}

pub fn client(base_url: &str) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: Some(5),
    })
    .unwrap()
}

pub fn customer(id: &str, name: &str, email: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": email,
        "phone": "+919876543210",
        "isActive": true
    })
}

pub fn chapter(id: &str, name: &str, chapter_no: u32) -> Value {
    json!({
        "_id": id,
        "chapterName": name,
        "description": "Delta, gamma, theta and vega",
        "durationMinutes": 45,
        "videoUrl": "https://youtu.be/dQw4w9WgXcQ",
        "chapterNo": chapter_no,
        "courseId": "course-1"
    })
}

/// Hand-built `multipart/form-data` body: `(name, file name, content)` per part.
pub fn multipart_body(boundary: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        let disposition = match file_name {
            Some(f) => format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            ),
            None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"),
        };
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

pub fn bot(id: &str, name: &str) -> Value {
    json!({ "_id": id, "name": name, "botProviderId": "p1" })
}

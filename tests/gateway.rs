mod common;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};
use std::sync::Arc;

use algodesk_admin::config::DashboardConfig;
use algodesk_admin::dashboard::{MemorySessionStore, Session, SessionStore};
use algodesk_admin::handlers;
use algodesk_admin::middlewares::AuthGateMiddleware;
use algodesk_admin::services::ConsoleService;
use common::*;

macro_rules! gateway {
    ($base_url:expr, $store:expr) => {{
        let store: Arc<dyn SessionStore> = $store;
        let console = ConsoleService::new(client(&$base_url), store.clone(), DashboardConfig::default());
        test::init_service(
            App::new()
                .wrap(AuthGateMiddleware::new(store))
                .app_data(web::Data::new(console))
                .configure(handlers::auth_config)
                .service(web::scope("/api/v1").configure(handlers::resources_config)),
        )
        .await
    }};
}

fn logged_in() -> Arc<dyn SessionStore> {
    Arc::new(MemorySessionStore::new(Session::with_token(ADMIN_TOKEN)))
}

#[actix_web::test]
async fn unauthenticated_requests_redirect_to_login() {
    let (backend, base_url) = spawn_backend();
    let app = gateway!(base_url, Arc::new(MemorySessionStore::default()));

    let req = test::TestRequest::get().uri("/api/v1/bots").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
    assert!(backend.calls().is_empty());

    let req = test::TestRequest::get().uri("/session").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["state"], "unauthenticated");
    assert_eq!(body["data"]["redirect"], "/login");
}

#[actix_web::test]
async fn login_validates_then_stores_token() {
    let (_backend, base_url) = spawn_backend();
    let store = Arc::new(MemorySessionStore::default());
    let app = gateway!(base_url, store.clone());

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "not-an-email", "password": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["redirect"], "/");
    assert_eq!(store.load().unwrap().token(), Some(ADMIN_TOKEN));

    let req = test::TestRequest::post().uri("/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!store.load().unwrap().is_authenticated());

    let req = test::TestRequest::get().uri("/api/v1/bots").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn list_returns_rows_with_serials_and_pagination() {
    let (backend, base_url) = spawn_backend();
    backend.seed(
        "bot",
        (1..=12).map(|i| bot(&format!("b{i}"), &format!("Bot {i}"))).collect(),
    );
    let app = gateway!(base_url, logged_in());

    let req = test::TestRequest::get()
        .uri("/api/v1/bots?page=2&per_page=5")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["serial"], 1);
    assert_eq!(items[0]["name"], "Bot 6");
    assert_eq!(body["data"]["pagination"]["total"], 12);
    assert_eq!(body["data"]["pagination"]["total_pages"], 3);
}

#[actix_web::test]
async fn invalid_coupon_is_rejected_before_the_backend() {
    let (backend, base_url) = spawn_backend();
    let app = gateway!(base_url, logged_in());

    let req = test::TestRequest::post()
        .uri("/api/v1/coupons")
        .set_json(json!({
            "code": "SAVE10",
            "discountPercent": 150,
            "expiryDate": "2099-01-01",
            "usageLimit": 10
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(backend.writes().is_empty());
}

#[actix_web::test]
async fn delete_requires_confirmation() {
    let (backend, base_url) = spawn_backend();
    backend.seed("user", vec![customer("u1", "Asha Verma", "asha@example.com")]);
    let app = gateway!(base_url, logged_in());

    let req = test::TestRequest::delete()
        .uri("/api/v1/customers/u1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(backend.writes().is_empty());

    let req = test::TestRequest::delete()
        .uri("/api/v1/customers/u1?confirm=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(backend.rows("user").is_empty());
}

#[actix_web::test]
async fn payments_are_read_only() {
    let (backend, base_url) = spawn_backend();
    let app = gateway!(base_url, logged_in());

    let req = test::TestRequest::delete()
        .uri("/api/v1/payments/p1?confirm=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(!resp.status().is_success());
    assert!(backend.writes().is_empty());
}

#[actix_web::test]
async fn status_route_exists_only_for_toggleable_resources() {
    let (backend, base_url) = spawn_backend();
    backend.seed("user", vec![customer("u1", "Asha Verma", "asha@example.com")]);
    let app = gateway!(base_url, logged_in());

    let req = test::TestRequest::put()
        .uri("/api/v1/coupons/x/status?confirm=true")
        .set_json(json!({ "isActive": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(backend.writes().is_empty());

    let req = test::TestRequest::put()
        .uri("/api/v1/customers/u1/status?confirm=true")
        .set_json(json!({ "isActive": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(backend.writes()[0].path, "/user/status/u1");
    assert_eq!(backend.rows("user")[0]["isActive"], false);
}

#[actix_web::test]
async fn file_paths_in_a_json_body_are_never_read() {
    let (backend, base_url) = spawn_backend();
    let secret = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(secret.path(), "top-secret-contents").unwrap();
    let secret_path = secret.path().to_string_lossy().into_owned();
    let app = gateway!(base_url, logged_in());

    let req = test::TestRequest::post()
        .uri("/api/v1/courses")
        .set_json(json!({
            "name": "Options Masterclass",
            "description": "Six weeks of options strategy",
            "type": "recorded",
            "instructor": "R. Mehta",
            "language": "English",
            "price": 4999,
            "image": secret_path,
            "imagePath": secret_path
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let writes = backend.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].text("name").as_deref(), Some("Options Masterclass"));
    assert!(writes[0].parts.iter().all(|p| p.file_name.is_none()));
    assert!(
        writes[0]
            .parts
            .iter()
            .all(|p| !String::from_utf8_lossy(&p.body).contains("top-secret"))
    );
}

#[actix_web::test]
async fn uploaded_video_is_forwarded_as_a_file_part() {
    let (backend, base_url) = spawn_backend();
    let app = gateway!(base_url, logged_in());

    let form = json!({
        "chapterName": "Greeks explained",
        "description": "Delta, gamma, theta and vega",
        "durationMinutes": 45,
        "videoUrl": "",
        "chapterNo": 3,
        "courseId": "course-1"
    })
    .to_string();
    let boundary = "algodesk-test-boundary";
    let body = multipart_body(
        boundary,
        &[
            ("form", None, form.as_bytes()),
            ("video", Some("lesson.mp4"), &b"\x00\x00\x00\x18ftypmp42"[..]),
        ],
    );
    let req = test::TestRequest::post()
        .uri("/api/v1/chapters")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let writes = backend.writes();
    assert_eq!(writes[0].path, "/chapter/add");
    assert_eq!(writes[0].text("chapterName").as_deref(), Some("Greeks explained"));
    assert_eq!(writes[0].text("chapterNo").as_deref(), Some("3"));
    let video = writes[0].part("video").unwrap();
    assert_eq!(video.file_name.as_deref(), Some("lesson.mp4"));
    assert_eq!(video.body, b"\x00\x00\x00\x18ftypmp42".to_vec());
}

#[actix_web::test]
async fn upload_without_form_part_is_a_bad_request() {
    let (backend, base_url) = spawn_backend();
    let app = gateway!(base_url, logged_in());

    let boundary = "algodesk-test-boundary";
    let body = multipart_body(boundary, &[("video", Some("lesson.mp4"), &b"mp4"[..])]);
    let req = test::TestRequest::post()
        .uri("/api/v1/chapters")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(backend.writes().is_empty());
}

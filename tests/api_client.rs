mod common;

use algodesk_admin::dashboard::Session;
use algodesk_admin::error::AppError;
use algodesk_admin::external::{ListQuery, ResourceApi, ResourceBackend};
use algodesk_admin::models::{Bots, Categories, LoginForm};
use common::*;
use serde_json::json;

#[actix_web::test]
async fn login_returns_token_and_requests_carry_it() {
    let (backend, base_url) = spawn_backend();
    backend.seed("bot", vec![bot("b1", "Scalper"), bot("b2", "Swing")]);

    let anonymous = client(&base_url);
    let session = anonymous
        .login(&LoginForm {
            email: ADMIN_EMAIL.into(),
            password: ADMIN_PASSWORD.into(),
        })
        .await
        .unwrap();
    assert_eq!(session.token(), Some(ADMIN_TOKEN));

    let api = ResourceApi::<Bots>::new(anonymous.with_session(session));
    let listing = api.list(&ListQuery::new(1, 10)).await.unwrap();
    assert_eq!(listing.total, 2);
    assert_eq!(listing.data[1].name, "Swing");

    let calls = backend.calls();
    assert_eq!(calls[0].token, None);
    assert_eq!(calls[1].path, "/bot");
    assert_eq!(calls[1].token.as_deref(), Some(ADMIN_TOKEN));
}

#[actix_web::test]
async fn backend_message_is_surfaced_on_failure() {
    let (_backend, base_url) = spawn_backend();
    let err = client(&base_url)
        .login(&LoginForm {
            email: ADMIN_EMAIL.into(),
            password: "wrong-password".into(),
        })
        .await
        .unwrap_err();
    match err {
        AppError::ApiError { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[actix_web::test]
async fn local_search_resources_never_send_search() {
    let (backend, base_url) = spawn_backend();
    backend.seed(
        "categories",
        vec![json!({ "_id": "c1", "title": "Options", "isActive": true })],
    );
    let api = ResourceApi::<Categories>::new(client(&base_url).with_session(Session::with_token("t")));
    api.list(&ListQuery::new(1, 10).with_search("opt")).await.unwrap();

    let call = &backend.calls()[0];
    assert_eq!(call.query.get("page").map(String::as_str), Some("1"));
    assert_eq!(call.query.get("limit").map(String::as_str), Some("10"));
    assert!(!call.query.contains_key("search"));
}

#[actix_web::test]
async fn missing_record_maps_to_api_error() {
    let (_backend, base_url) = spawn_backend();
    let api = ResourceApi::<Bots>::new(client(&base_url));
    let err = api.delete("nope").await.unwrap_err();
    assert_eq!(err.toast_message(), "Record not found");
}

use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::ConsoleService;

#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Token stored, redirect to the dashboard"),
        (status = 400, description = "Invalid email or password format"),
        (status = 502, description = "Backend rejected the credentials")
    )
)]
pub async fn login(
    console: web::Data<ConsoleService>,
    form: web::Json<LoginForm>,
) -> Result<HttpResponse> {
    match console.login(&form).await {
        Ok(navigation) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": navigation,
            "message": "Login successful"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Token cleared, redirect to login")
    )
)]
pub async fn logout(console: web::Data<ConsoleService>) -> Result<HttpResponse> {
    match console.logout() {
        Ok(navigation) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": navigation,
            "message": "Logged out"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/session",
    tag = "auth",
    responses(
        (status = 200, description = "Current auth state")
    )
)]
pub async fn session(console: web::Data<ConsoleService>) -> Result<HttpResponse> {
    match console.status() {
        Ok(status) => Ok(HttpResponse::Ok().json(ApiResponse::success(status))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/session", web::get().to(session));
}

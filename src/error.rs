use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::validation::FieldErrors;

pub type AppResult<T> = Result<T, AppError>;

/// Generic text shown when the backend gave no message of its own.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(FieldErrors),

    #[error("Backend rejected the request ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Builds an upstream failure, keeping the backend message when it sent one.
    pub fn api(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        AppError::ApiError { status, message }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::ValidationError(_))
    }

    /// Text for the transient toast. 4xx and 5xx read the same way; only the
    /// backend's own message is surfaced.
    pub fn toast_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Please fix the highlighted fields".to_string()),
            AppError::ApiError { message, .. } => message.clone(),
            AppError::AuthError(msg) | AppError::NotFound(msg) | AppError::BadRequest(msg) => {
                msg.clone()
            }
            AppError::ConfirmationRequired(msg) => msg.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        use actix_web::http::StatusCode;

        if let AppError::ValidationError(errors) = self {
            log::warn!("Validation error: {errors}");
            return HttpResponse::build(StatusCode::BAD_REQUEST).json(json!({
                "success": false,
                "error": {
                    "code": "VALIDATION_ERROR",
                    "message": self.toast_message(),
                    "fields": errors,
                }
            }));
        }

        let (status_code, error_code) = match self {
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                (StatusCode::UNAUTHORIZED, "AUTH_ERROR")
            }
            AppError::BadRequest(msg) => {
                log::warn!("Bad request: {msg}");
                (StatusCode::BAD_REQUEST, "BAD_REQUEST")
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::ConfirmationRequired(_) => (StatusCode::CONFLICT, "CONFIRMATION_REQUIRED"),
            AppError::ApiError { status, message } => {
                log::error!("Backend error {status}: {message}");
                (StatusCode::BAD_GATEWAY, "BACKEND_ERROR")
            }
            AppError::ReqwestError(err) => {
                log::error!("Backend unreachable: {err}");
                (StatusCode::BAD_GATEWAY, "BACKEND_ERROR")
            }
            _ => {
                log::error!("Internal error: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": self.toast_message()
            }
        }))
    }
}

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::fairness::store::StoreError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is rendered to the browser; none of them stops the server.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session state error: {0}")]
    SessionState(String),

    #[error("No recognizable skills found in the text")]
    NoSkillsFound,

    #[error("Model request failed: {0}")]
    ModelRequest(#[from] LlmError),

    #[error("Result store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Malformed or mistyped request bodies get the same JSON error shape as
/// every other validation failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Configuration(msg) => {
                tracing::warn!("Configuration error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONFIGURATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SessionState(msg) => (StatusCode::CONFLICT, "SESSION_STATE", msg.clone()),
            AppError::NoSkillsFound => (
                StatusCode::NOT_FOUND,
                "NO_SKILLS_FOUND",
                self.to_string(),
            ),
            AppError::ModelRequest(e) => {
                tracing::error!("Model request error: {e}");
                (StatusCode::BAD_GATEWAY, "MODEL_REQUEST_ERROR", e.to_string())
            }
            AppError::Store(e) => {
                tracing::error!("Result store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "The results file could not be read or written".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::extract::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is terminal for the action that raised it: nothing here is
/// retried automatically and no stored kit is touched on the error path.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Throttled: {0}")]
    Throttled(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            missing @ LlmError::MissingCredential => AppError::Configuration(missing.to_string()),
            LlmError::Unauthorized(msg) => AppError::Authentication(msg),
            LlmError::RateLimited(msg) => AppError::Throttled(msg),
            other => AppError::Llm(other.to_string()),
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Configuration(msg) => (
                StatusCode::PRECONDITION_FAILED,
                "CONFIGURATION_ERROR",
                format!("Configuration error: {msg}"),
            ),
            AppError::Authentication(msg) => {
                tracing::warn!("Completion service rejected credential: {msg}");
                (
                    StatusCode::UNAUTHORIZED,
                    "AUTHENTICATION_ERROR",
                    "Invalid API key. Please check your Anthropic API key.".to_string(),
                )
            }
            AppError::Throttled(msg) => {
                tracing::warn!("Completion service throttled request: {msg}");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMITED",
                    "Rate limit hit. Please wait a moment and try again.".to_string(),
                )
            }
            AppError::Parse(msg) => {
                tracing::warn!("Model output could not be parsed: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PARSE_ERROR",
                    "The model response was not valid JSON. Please retry.".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    format!("Generation failed: {msg}. Please retry or check your connection."),
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

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is terminal for the request. Each one maps to its own status
/// and code so callers can decide for themselves whether a retry makes sense.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Completion service rejected credentials: {0}")]
    UpstreamAuth(String),

    #[error("Completion service is rate limiting: {0}")]
    UpstreamRateLimit(String),

    #[error("Completion service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Completion service returned no usable text")]
    EmptyCompletion,

    #[error("Rewrite failed: {0}")]
    Unknown(String),
}

impl AppError {
    /// Stable machine-readable code, also used as the log label.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::UpstreamAuth(_) => "UPSTREAM_AUTH_ERROR",
            AppError::UpstreamRateLimit(_) => "UPSTREAM_RATE_LIMITED",
            AppError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            AppError::EmptyCompletion => "EMPTY_COMPLETION",
            AppError::Unknown(_) => "REWRITE_FAILED",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamAuth(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamRateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::EmptyCompletion => StatusCode::BAD_GATEWAY,
            AppError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Unauthorized { message, .. } => AppError::UpstreamAuth(message),
            LlmError::RateLimited { message } => AppError::UpstreamRateLimit(message),
            LlmError::Unavailable { .. } | LlmError::Timeout(_) => {
                AppError::UpstreamUnavailable(err.to_string())
            }
            LlmError::EmptyContent => AppError::EmptyCompletion,
            other => AppError::Unknown(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match &self {
            AppError::Validation(msg) => (msg.clone(), None),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    "The rewrite service is not configured".to_string(),
                    None,
                )
            }
            AppError::UpstreamAuth(msg) => {
                tracing::error!("Completion auth error: {msg}");
                (
                    "The completion service rejected our credentials".to_string(),
                    None,
                )
            }
            AppError::UpstreamRateLimit(msg) => {
                tracing::warn!("Completion rate limited: {msg}");
                (
                    "The completion service is busy, try again shortly".to_string(),
                    None,
                )
            }
            AppError::UpstreamUnavailable(msg) => {
                tracing::warn!("Completion unavailable: {msg}");
                (
                    "The completion service is unavailable".to_string(),
                    None,
                )
            }
            AppError::EmptyCompletion => {
                tracing::warn!("Completion returned empty content");
                (
                    "The completion service returned no text".to_string(),
                    None,
                )
            }
            AppError::Unknown(msg) => {
                tracing::error!("Rewrite error: {msg}");
                ("Rewrite failed".to_string(), Some(msg.clone()))
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = json!(details);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

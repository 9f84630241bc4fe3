//! Error types for marketpulse-api
//!
//! Every handler failure is translated to an HTTP status plus the uniform
//! `{message}` envelope. Status mapping: 400 validation, 401 missing
//! identity, 404 not-found (including not-owned), 500 upstream model or
//! database failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use marketpulse_common::api::ErrorResponse;
use thiserror::Error;

use crate::services::GenerationError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Missing or empty caller identity (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found or not owned by the caller (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream model failure (500)
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Generation(msg) => {
                tracing::error!(error = %msg, "Model generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to generate content: {}", msg),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<marketpulse_common::Error> for ApiError {
    fn from(err: marketpulse_common::Error) -> Self {
        use marketpulse_common::Error;
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::Generation(msg) => ApiError::Generation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        ApiError::Generation(err.to_string())
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

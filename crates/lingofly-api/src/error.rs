//! Lingofly API: error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lingofly_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The compiled-in scenario failed to build.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::ResourceMissing(_) => (StatusCode::NOT_FOUND, "resource_missing"),
            DomainError::IndexOutOfRange { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "index_out_of_range")
            }
            DomainError::InvalidScript(_) => (StatusCode::INTERNAL_SERVER_ERROR, "invalid_script"),
            DomainError::AlreadyStarted => (StatusCode::CONFLICT, "already_started"),
            DomainError::SessionEnded => (StatusCode::GONE, "session_ended"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

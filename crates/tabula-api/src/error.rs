//! Error types for tabula-api

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::submission::Rejection;

/// Result type alias for tabula-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Stable error codes carried in JSON error bodies.
///
/// Clients match on `code`, never on the message text.
pub mod error_code {
    /// Submission refused by validation
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    /// Backing file could not be read or written
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    /// Anything else
    pub const INTERNAL: &str = "INTERNAL";
}

/// Errors that can occur in tabula-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from tabula-core
    #[error("Core error: {0}")]
    Core(#[from] tabula_core::Error),

    /// Error from tabula-storage
    #[error("Storage error: {0}")]
    Storage(#[from] tabula_storage::Error),

    /// Submission refused before anything was written
    #[error("{0}")]
    Rejected(#[from] Rejection),

    /// Listener I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking file task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Rejected(_) => error_code::VALIDATION_FAILED,
            Error::Storage(_) => error_code::STORAGE_ERROR,
            _ => error_code::INTERNAL,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Error::Rejected(rejection) => serde_json::json!({
                "code": self.error_code(),
                "message": rejection.to_string(),
                "success": false,
                "fields": rejection.fields(),
            }),
            other => {
                tracing::error!(error = %other, "request failed");
                serde_json::json!({
                    "code": self.error_code(),
                    "message": other.to_string(),
                })
            }
        };
        (status, Json(body)).into_response()
    }
}

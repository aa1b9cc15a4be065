//! Error types for tabula-cli

use thiserror::Error;

/// Result type alias for tabula-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabula-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from tabula-core
    #[error("{0}")]
    Core(#[from] tabula_core::Error),

    /// Error from tabula-storage
    #[error("{0}")]
    Storage(#[from] tabula_storage::Error),

    /// Error from tabula-api
    #[error("{0}")]
    Api(#[from] tabula_api::Error),

    /// Writing command output failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Error types for tabula-storage

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for tabula-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabula-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from tabula-core
    #[error("Core error: {0}")]
    Core(#[from] tabula_core::Error),

    /// I/O error on the backing file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Backing file or its parent directory
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file's header row does not match the configured schema
    #[error(
        "Header of {} is {found:?}, expected {expected:?}",
        path.display()
    )]
    SchemaMismatch {
        /// Backing file
        path: PathBuf,
        /// Configured field names
        expected: Vec<String>,
        /// Field names found in the file
        found: Vec<String>,
    },
}

impl Error {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

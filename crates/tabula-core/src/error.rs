//! Error types for tabula-core.

use std::path::{Path, PathBuf};

/// Errors that can occur while building schemas or loading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific file.
    #[error("I/O error on {}: {source}", path.display())]
    IoWithPath {
        /// File or directory the operation touched
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Schema declaration error
    #[error("Schema error: {message}")]
    Schema {
        /// What is wrong with the declared field set
        message: String,
    },
}

/// Result type alias for tabula-core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new schema error.
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Error::Schema {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::config("port out of range");
        assert_eq!(err.to_string(), "Configuration error: port out of range");
    }

    #[test]
    fn test_schema_error_display() {
        let err = Error::schema("duplicate field 'Preis'");
        assert_eq!(err.to_string(), "Schema error: duplicate field 'Preis'");
    }

    #[test]
    fn test_io_with_path_mentions_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io_with_path(source, "/srv/data.csv");
        let msg = err.to_string();
        assert!(msg.contains("/srv/data.csv"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}

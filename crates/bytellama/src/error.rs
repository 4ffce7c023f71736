//! Error types for the ByteLlama crate.
//!
//! Sampling and token coding never fail on content: malformed bytes and
//! out-of-range token IDs are dropped. Errors are reserved for precondition
//! violations (a zero chunk size), invalid configurations and I/O.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for ByteLlama operations
pub type Result<T> = std::result::Result<T, ByteLlamaError>;

/// Error types for ByteLlama operations
#[derive(Error, Debug)]
pub enum ByteLlamaError {
    /// A caller-supplied argument violates a precondition
    #[error("Invalid argument: {field} - {reason}")]
    InvalidArgument { field: String, reason: String },

    /// Configuration validation errors
    #[error("Invalid configuration: {field} - {reason}")]
    Config { field: String, reason: String },

    /// File system errors, tagged with the path involved
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failures
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failures reported by a model provider
    #[error("Model error in {operation}: {message}")]
    Model { operation: String, message: String },
}

impl ByteLlamaError {
    /// Create an invalid argument error
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error for `path`
    pub fn io_error(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a model provider error
    pub fn model_error(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Model {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ByteLlamaError::invalid_argument("max_chunk_bytes", "must be greater than 0");
        assert!(matches!(err, ByteLlamaError::InvalidArgument { .. }));

        let err = ByteLlamaError::config_error("embed_dim", "invalid value");
        assert!(matches!(err, ByteLlamaError::Config { .. }));

        let err = ByteLlamaError::model_error("forward", "not loaded");
        assert!(matches!(err, ByteLlamaError::Model { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = ByteLlamaError::config_error("num_heads", "must be greater than 0");
        let display = err.to_string();
        assert!(display.contains("Invalid configuration"));
        assert!(display.contains("num_heads"));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ByteLlamaError::io_error("/tmp/manifest.txt", io);
        let display = err.to_string();
        assert!(display.contains("/tmp/manifest.txt"));
        assert!(display.contains("missing"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: ByteLlamaError = parse.unwrap_err().into();
        assert!(matches!(err, ByteLlamaError::Serialization(_)));
    }
}

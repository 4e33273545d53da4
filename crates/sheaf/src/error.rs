//! Error types for the sheaf crate.

use thiserror::Error;

use crate::key::Key;

/// Errors that can occur when transforming or encoding collections.
#[derive(Debug, Error)]
pub enum SheafError {
    /// Operation parameters do not fit together.
    #[error("invalid {what}: expected {expected}, got {actual}")]
    Configuration {
        what: &'static str,
        expected: String,
        actual: String,
    },

    /// No entry exists under the requested key.
    #[error("key not found: {0}")]
    KeyNotFound(Key),

    /// JSON encoding failed.
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for sheaf operations.
pub type Result<T> = std::result::Result<T, SheafError>;

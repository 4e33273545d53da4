//! Error types for the model crate.

use sheaf::{Key, SheafError};
use thiserror::Error;

/// Boxed error raised by a [`LazySource`](crate::LazySource).
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed error raised by a [`Record`](crate::Record) operation.
pub type RecordError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur when materializing or operating on model collections.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The operation needs a source, and none is attached.
    #[error("invalid source state: {0}")]
    InvalidSourceState(&'static str),

    /// The source failed to fetch models or load relations.
    #[error("source failed: {0}")]
    Source(#[source] SourceError),

    /// A record operation failed on one item.
    #[error("failed to {operation} record {key}: {source}")]
    Record {
        key: Key,
        operation: &'static str,
        #[source]
        source: RecordError,
    },

    /// Collection-level failure.
    #[error(transparent)]
    Collection(#[from] SheafError),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

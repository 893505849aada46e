//! Usage-log error types.

use thiserror::Error;

/// Errors that can occur while persisting or exporting usage events.
///
/// Aggregation itself never fails; these only come from the storage medium.
#[derive(Debug, Error)]
pub enum UsageError {
    /// An I/O error occurred while reading or writing the store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored events could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store rejected the operation.
    #[error("Store error: {0}")]
    Store(String),
}

impl UsageError {
    /// Create a new store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while resolving or running a transform.
///
/// None of these ever cross the processing pipeline: they are rendered into
/// the `error` field of a [`ProcessingResult`](super::ProcessingResult).
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("tool {0} not found")]
    NotFound(String),

    /// The transform rejected its input.
    #[error("{0}")]
    TransformFailure(String),

    /// An option value did not match the descriptor's schema.
    #[error("invalid option '{name}': {reason}")]
    Configuration { name: String, reason: String },

    /// The transform did not finish before the pipeline deadline.
    #[error("tool {tool_id} timed out after {timeout_ms} ms")]
    Timeout { tool_id: String, timeout_ms: u64 },

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a new transform failure.
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::TransformFailure(msg.into())
    }

    /// Create a new option/configuration error.
    pub fn configuration(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout(tool_id: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            tool_id: tool_id.into(),
            timeout_ms,
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short machine-readable label, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::TransformFailure(_) => "transform_failure",
            Self::Configuration { .. } => "configuration",
            Self::Timeout { .. } => "timeout",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_mentions_id() {
        let err = ToolError::not_found("does-not-exist");
        assert_eq!(err.to_string(), "tool does-not-exist not found");
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_configuration_message() {
        let err = ToolError::configuration("indent", "expected number");
        assert_eq!(err.to_string(), "invalid option 'indent': expected number");
    }

    #[test]
    fn test_timeout_message() {
        let err = ToolError::timeout("slow", 50);
        assert_eq!(err.to_string(), "tool slow timed out after 50 ms");
        assert_eq!(err.kind(), "timeout");
    }
}

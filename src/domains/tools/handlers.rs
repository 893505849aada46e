//! Transform contract and the processing envelope.
//!
//! Every catalog entry implements [`Transform`]. The pipeline wraps whatever a
//! transform returns into a [`ProcessingResult`], which is the only shape
//! callers ever see.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::descriptor::ToolDescriptor;
use super::error::ToolError;
use super::options::ToolOptions;

/// Outcome envelope of one invocation.
///
/// Exactly one of `result` / `error` is set. The fields are private so the
/// invariant can only be established through [`ProcessingResult::success`]
/// and [`ProcessingResult::failure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    /// Whether the transform produced an output.
    success: bool,

    /// Transform output (present iff `success`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<String>,

    /// Human-readable failure reason (present iff not `success`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,

    /// Wall-clock duration of the transform call in milliseconds.
    processing_time_ms: u64,
}

impl ProcessingResult {
    /// Create a successful envelope.
    pub fn success(result: impl Into<String>, processing_time_ms: u64) -> Self {
        Self {
            success: true,
            result: Some(result.into()),
            error: None,
            processing_time_ms,
        }
    }

    /// Create a failed envelope.
    pub fn failure(error: impl Into<String>, processing_time_ms: u64) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
            processing_time_ms,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn processing_time_ms(&self) -> u64 {
        self.processing_time_ms
    }
}

/// A stateless text/data transform.
///
/// Implementations must tolerate option keys they do not recognise.
pub trait Transform: Send + Sync {
    /// Static metadata of this transform.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Cheap pre-check a caller may run before processing.
    ///
    /// The pipeline never calls this; submitting input that fails validation
    /// is legal and must produce a graceful error from [`Transform::run`].
    fn validate(&self, input: &str) -> bool {
        let _ = input;
        true
    }

    /// Transform `input` using the merged `options`.
    fn run(&self, input: &str, options: &ToolOptions) -> Result<String, ToolError>;
}

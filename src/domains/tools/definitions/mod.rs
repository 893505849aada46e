//! Built-in transform definitions.
//!
//! Transforms are grouped by catalog category, one file per transform.
//! [`all_tools`] lists them in catalog order.

pub mod code;
pub mod common;
pub mod data;
pub mod security;
pub mod text;
pub mod utility;

use std::sync::Arc;

pub use code::{JsonFormatterTool, JsonValidatorTool};
pub use data::{Base64EncoderTool, RegexTesterTool, UrlEncoderTool};
pub use security::{HashGeneratorTool, PasswordGeneratorTool};
pub use text::{LoremGeneratorTool, TextCaseTool};
pub use utility::{TimestampConverterTool, UrlAnalyzerTool, UuidGeneratorTool};

use super::error::ToolError;
use super::handlers::Transform;

/// Every built-in transform, in catalog order.
pub fn all_tools() -> Result<Vec<Arc<dyn Transform>>, ToolError> {
    Ok(vec![
        shared(JsonFormatterTool::new()?),
        shared(JsonValidatorTool::new()?),
        shared(Base64EncoderTool::new()?),
        shared(UrlEncoderTool::new()?),
        shared(RegexTesterTool::new()?),
        shared(HashGeneratorTool::new()?),
        shared(PasswordGeneratorTool::new()?),
        shared(UuidGeneratorTool::new()?),
        shared(TimestampConverterTool::new()?),
        shared(UrlAnalyzerTool::new()?),
        shared(LoremGeneratorTool::new()?),
        shared(TextCaseTool::new()?),
    ])
}

fn shared<T: Transform + 'static>(tool: T) -> Arc<dyn Transform> {
    Arc::new(tool)
}

//! Helpers shared by several transform definitions.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domains::tools::ToolError;

/// Largest indentation accepted by the JSON transforms.
pub const MAX_INDENT: i64 = 10;

/// Serialize `value` as JSON.
///
/// An indent of zero produces compact output; larger values are clamped to
/// [`MAX_INDENT`] spaces per level.
pub fn to_json_string<T: Serialize>(value: &T, indent: i64) -> Result<String, ToolError> {
    let width = indent.clamp(0, MAX_INDENT) as usize;
    if width == 0 {
        return serde_json::to_string(value).map_err(|e| ToolError::internal(e.to_string()));
    }

    let pad = vec![b' '; width];
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&pad));
    value
        .serialize(&mut ser)
        .map_err(|e| ToolError::internal(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ToolError::internal(e.to_string()))
}

/// Trimmed input, or `None` when it is blank.
pub fn non_blank(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

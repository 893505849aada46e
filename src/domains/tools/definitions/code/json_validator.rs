//! JSON validator.
//!
//! Reports whether the input is valid JSON. Invalid documents are a normal
//! outcome of this tool, so they produce a report rather than an error.

use serde::Serialize;
use serde_json::Value;

use crate::domains::tools::definitions::common::{non_blank, to_json_string};
use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

const EMPTY_MESSAGE: &str = "Please provide JSON to validate.";

const SUGGESTIONS: &[&str] = &[
    "Check for missing quotes around keys",
    "Ensure all strings are properly quoted",
    "Verify bracket and brace matching",
    "Remove trailing commas",
];

#[derive(Debug, Serialize)]
struct ValidationSummary {
    valid: bool,
    #[serde(rename = "type")]
    kind: &'static str,
    size: usize,
    formatted: bool,
}

/// Validates JSON and echoes it back, optionally formatted.
pub struct JsonValidatorTool {
    descriptor: ToolDescriptor,
}

impl JsonValidatorTool {
    pub const ID: &'static str = "json-validator";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Code)
            .icon("check-circle")
            .option(OptionSpec::boolean(
                "strict",
                false,
                "Require an object or array at the top level",
            ))
            .option(OptionSpec::boolean("format", true, "Format the JSON output"))
            .option(OptionSpec::integer("indent", 2, "Number of spaces for indentation"))
            .content(
                Locale::En,
                "JSON Validator",
                "Validate and format JSON data",
                Some("Enter JSON to validate..."),
            )
            .content(
                Locale::Zh,
                "JSON 验证器",
                "验证和格式化 JSON 数据",
                Some("请输入要验证的 JSON..."),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for JsonValidatorTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn validate(&self, input: &str) -> bool {
        non_blank(input).is_none_or(|text| serde_json::from_str::<Value>(text).is_ok())
    }

    fn run(&self, input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        let Some(text) = non_blank(input) else {
            return Ok(EMPTY_MESSAGE.to_string());
        };

        let parsed: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => return Ok(invalid_report(&e.to_string())),
        };

        if options.bool("strict")? && !(parsed.is_object() || parsed.is_array()) {
            return Ok(invalid_report(
                "strict mode requires an object or array at the top level",
            ));
        }

        let format = options.bool("format")?;
        let body = to_json_string(&parsed, if format { options.integer("indent")? } else { 0 })?;

        let summary = ValidationSummary {
            valid: true,
            kind: type_name(&parsed),
            size: match &parsed {
                Value::Array(items) => items.len(),
                Value::Object(map) => map.len(),
                _ => 0,
            },
            formatted: format,
        };

        Ok(format!(
            "Valid JSON\n\n{}\n\n--- Validation Summary ---\n{}",
            body,
            to_json_string(&summary, 2)?
        ))
    }
}

fn invalid_report(reason: &str) -> String {
    let tips: Vec<String> = SUGGESTIONS.iter().map(|s| format!("- {}", s)).collect();
    format!(
        "Invalid JSON\n\nError: {}\n\n--- Suggestions ---\n{}",
        reason,
        tips.join("\n")
    )
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::UnknownOptionPolicy;
    use serde_json::json;

    fn run(input: &str, supplied: Value) -> String {
        let tool = JsonValidatorTool::new().unwrap();
        let options = ToolOptions::merge(
            tool.descriptor(),
            supplied.as_object().unwrap(),
            UnknownOptionPolicy::Passthrough,
        )
        .unwrap();
        tool.run(input, &options).unwrap()
    }

    #[test]
    fn test_valid_object_report() {
        let out = run(r#"{"name":"John","age":30}"#, json!({}));
        assert!(out.starts_with("Valid JSON\n\n{\n  \"name\": \"John\""));
        assert!(out.contains("\"type\": \"object\""));
        assert!(out.contains("\"size\": 2"));
        assert!(out.contains("\"formatted\": true"));
    }

    #[test]
    fn test_unformatted_output_is_compact() {
        let out = run("[1, 2, 3]", json!({"format": false}));
        assert!(out.starts_with("Valid JSON\n\n[1,2,3]\n"));
        assert!(out.contains("\"size\": 3"));
    }

    #[test]
    fn test_invalid_json_is_reported_not_failed() {
        let out = run("{\"a\": }", json!({}));
        assert!(out.starts_with("Invalid JSON\n\nError: "));
        assert!(out.contains("Remove trailing commas"));
    }

    #[test]
    fn test_strict_rejects_scalars() {
        assert!(run("42", json!({})).starts_with("Valid JSON"));
        assert!(run("42", json!({"strict": true})).starts_with("Invalid JSON"));
    }

    #[test]
    fn test_blank_input_message() {
        assert_eq!(run("", json!({})), EMPTY_MESSAGE);
    }
}

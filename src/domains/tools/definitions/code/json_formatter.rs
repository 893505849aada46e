//! JSON formatter.
//!
//! Pretty-prints, minifies or key-sorts a JSON document.

use serde_json::{Map, Value};
use tracing::debug;

use crate::domains::tools::definitions::common::{non_blank, to_json_string};
use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

/// Formats JSON with configurable indentation, key sorting and minification.
pub struct JsonFormatterTool {
    descriptor: ToolDescriptor,
}

impl JsonFormatterTool {
    pub const ID: &'static str = "json-formatter";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Code)
            .icon("code")
            .option(OptionSpec::integer("indent", 2, "Number of spaces for indentation"))
            .option(OptionSpec::boolean("sortKeys", false, "Sort keys alphabetically"))
            .option(OptionSpec::boolean("minify", false, "Minify JSON output"))
            .content(
                Locale::En,
                "JSON Formatter",
                "Format JSON data with compression and beautification support",
                Some("Please enter JSON data..."),
            )
            .content(
                Locale::Zh,
                "JSON 格式化",
                "格式化 JSON 数据，支持压缩和美化",
                Some("请输入 JSON 数据..."),
            )
            .content(
                Locale::Ja,
                "JSON フォーマッター",
                "JSON データを整形・圧縮します",
                Some("JSON データを入力してください..."),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for JsonFormatterTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn validate(&self, input: &str) -> bool {
        non_blank(input).is_none_or(|text| serde_json::from_str::<Value>(text).is_ok())
    }

    fn run(&self, input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        let Some(text) = non_blank(input) else {
            return Ok(String::new());
        };

        let parsed: Value = serde_json::from_str(text)
            .map_err(|e| ToolError::transform(format!("JSON parse failed: {}", e)))?;

        if options.bool("minify")? {
            return to_json_string(&parsed, 0);
        }

        let indent = options.integer("indent")?;
        if options.bool("sortKeys")? {
            debug!("Sorting object keys");
            return to_json_string(&sort_keys(parsed), indent);
        }

        to_json_string(&parsed, indent)
    }
}

/// Recursively rebuild every object with its keys in ascending order.
pub(crate) fn sort_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::UnknownOptionPolicy;
    use serde_json::json;

    fn run(input: &str, supplied: Value) -> Result<String, ToolError> {
        let tool = JsonFormatterTool::new().unwrap();
        let options = ToolOptions::merge(
            tool.descriptor(),
            supplied.as_object().unwrap(),
            UnknownOptionPolicy::Passthrough,
        )
        .unwrap();
        tool.run(input, &options)
    }

    #[test]
    fn test_default_two_space_indent() {
        assert_eq!(run(r#"{"a":1}"#, json!({})).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_minify_wins_over_indent() {
        let out = run("{\n \"a\" : [1, 2] }", json!({"minify": true, "indent": 4})).unwrap();
        assert_eq!(out, r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_keeps_key_order_unless_sorting() {
        let input = r#"{"b":1,"a":{"d":2,"c":3}}"#;
        assert_eq!(
            run(input, json!({"indent": 0})).unwrap(),
            r#"{"b":1,"a":{"d":2,"c":3}}"#
        );
        assert_eq!(
            run(input, json!({"indent": 0, "sortKeys": true})).unwrap(),
            r#"{"a":{"c":3,"d":2},"b":1}"#
        );
    }

    #[test]
    fn test_sorts_inside_arrays() {
        let out = run(r#"[{"z":1,"y":2}]"#, json!({"sortKeys": true, "minify": false, "indent": 0})).unwrap();
        assert_eq!(out, r#"[{"y":2,"z":1}]"#);
    }

    #[test]
    fn test_blank_input_returns_empty() {
        assert_eq!(run("   ", json!({})).unwrap(), "");
    }

    #[test]
    fn test_invalid_json_is_transform_failure() {
        let err = run("{oops", json!({})).unwrap_err();
        assert!(matches!(err, ToolError::TransformFailure(_)));
        assert!(err.to_string().starts_with("JSON parse failed"));
    }

    #[test]
    fn test_validate() {
        let tool = JsonFormatterTool::new().unwrap();
        assert!(tool.validate(""));
        assert!(tool.validate("[1, 2]"));
        assert!(!tool.validate("{oops"));
    }
}

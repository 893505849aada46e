//! URL percent-encoding.

use crate::domains::tools::definitions::common::non_blank;
use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

/// Characters left untouched when encoding a whole path.
const PATH_RESERVED: &str = ";,/?:@&=+$#";

/// Percent-encodes or decodes text.
pub struct UrlEncoderTool {
    descriptor: ToolDescriptor,
}

impl UrlEncoderTool {
    pub const ID: &'static str = "url-encoder";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Data)
            .icon("link")
            .option(OptionSpec::choice(
                "operation",
                &["encode", "decode"],
                "encode",
                "Encode or decode",
            ))
            .option(OptionSpec::choice(
                "component",
                &["all", "pathname", "search", "hash"],
                "all",
                "URL part the text belongs to; pathname keeps reserved separators",
            ))
            .content(
                Locale::En,
                "URL Encoder",
                "Encode and decode URL components",
                Some("Enter a URL or text..."),
            )
            .content(
                Locale::Zh,
                "URL 编码器",
                "URL 编码和解码工具",
                Some("请输入 URL 或文本..."),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for UrlEncoderTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn validate(&self, input: &str) -> bool {
        urlencoding::decode(input).is_ok()
    }

    fn run(&self, input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        if non_blank(input).is_none() {
            return Ok(String::new());
        }

        match options.str("operation")? {
            "decode" => urlencoding::decode(input)
                .map(|text| text.into_owned())
                .map_err(|e| ToolError::transform(format!("URL decode failed: {}", e))),
            _ => Ok(match options.str("component")? {
                "pathname" => encode_path(input),
                _ => urlencoding::encode(input).into_owned(),
            }),
        }
    }
}

fn encode_path(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut buf = [0u8; 4];
    for c in input.chars() {
        if PATH_RESERVED.contains(c) {
            out.push(c);
        } else {
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::UnknownOptionPolicy;
    use serde_json::{Value, json};

    fn run(input: &str, supplied: Value) -> Result<String, ToolError> {
        let tool = UrlEncoderTool::new().unwrap();
        let options = ToolOptions::merge(
            tool.descriptor(),
            supplied.as_object().unwrap(),
            UnknownOptionPolicy::Passthrough,
        )?;
        tool.run(input, &options)
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(run("a b&c=d/é", json!({})).unwrap(), "a%20b%26c%3Dd%2F%C3%A9");
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(
            run("/docs/my file?q=1", json!({"component": "pathname"})).unwrap(),
            "/docs/my%20file?q=1"
        );
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            run("a%20b%26c%C3%A9", json!({"operation": "decode"})).unwrap(),
            "a b&cé"
        );
    }

    #[test]
    fn test_decode_invalid_utf8_fails() {
        assert!(run("%FF", json!({"operation": "decode"})).is_err());
        let tool = UrlEncoderTool::new().unwrap();
        assert!(!tool.validate("%FF"));
        assert!(tool.validate("plain"));
    }
}

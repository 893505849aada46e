//! Base64 encoder / decoder.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

use crate::domains::tools::definitions::common::non_blank;
use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

/// Encodes text to Base64 or decodes Base64 back to text.
pub struct Base64EncoderTool {
    descriptor: ToolDescriptor,
}

impl Base64EncoderTool {
    pub const ID: &'static str = "base64-encoder";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Data)
            .icon("lock")
            .option(OptionSpec::choice(
                "operation",
                &["encode", "decode"],
                "encode",
                "Encode or decode",
            ))
            .option(OptionSpec::boolean(
                "urlSafe",
                false,
                "Use the URL-safe alphabet without padding",
            ))
            .content(
                Locale::En,
                "Base64 Encoder",
                "Encode and decode Base64 data",
                Some("Enter text or Base64..."),
            )
            .content(
                Locale::Zh,
                "Base64 编码器",
                "Base64 编码和解码工具",
                Some("请输入文本或 Base64..."),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for Base64EncoderTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn run(&self, input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        if non_blank(input).is_none() {
            return Ok(String::new());
        }

        let url_safe = options.bool("urlSafe")?;
        match options.str("operation")? {
            "decode" => decode(input, url_safe),
            _ => Ok(if url_safe {
                URL_SAFE_NO_PAD.encode(input)
            } else {
                STANDARD.encode(input)
            }),
        }
    }
}

fn decode(input: &str, url_safe: bool) -> Result<String, ToolError> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = if url_safe {
        URL_SAFE_NO_PAD.decode(cleaned.trim_end_matches('='))
    } else {
        STANDARD.decode(&cleaned)
    }
    .map_err(|e| ToolError::transform(format!("Base64 decode failed: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|_| ToolError::transform("Base64 decode failed: data is not valid UTF-8"))
}

//! Message digest generator.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256, Sha512};

use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

/// Computes MD5 / SHA-256 / SHA-512 digests of the input.
pub struct HashGeneratorTool {
    descriptor: ToolDescriptor,
}

impl HashGeneratorTool {
    pub const ID: &'static str = "hash-generator";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Security)
            .icon("hash")
            .option(OptionSpec::choice(
                "algorithm",
                &["md5", "sha256", "sha512"],
                "sha256",
                "Digest algorithm",
            ))
            .option(OptionSpec::choice(
                "format",
                &["hex", "base64"],
                "hex",
                "Output encoding",
            ))
            .option(OptionSpec::boolean(
                "uppercase",
                false,
                "Uppercase hexadecimal output",
            ))
            .content(
                Locale::En,
                "Hash Generator",
                "Generate MD5, SHA-256 and SHA-512 hashes",
                Some("Enter text to hash..."),
            )
            .content(
                Locale::Zh,
                "哈希生成器",
                "生成 MD5、SHA-256、SHA-512 哈希值",
                Some("请输入要计算哈希的文本..."),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for HashGeneratorTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn run(&self, input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        if input.is_empty() {
            return Ok(String::new());
        }

        let bytes = input.as_bytes();
        let digest: Vec<u8> = match options.str("algorithm")? {
            "md5" => md5::compute(bytes).0.to_vec(),
            "sha512" => Sha512::digest(bytes).to_vec(),
            _ => Sha256::digest(bytes).to_vec(),
        };

        Ok(match options.str("format")? {
            "base64" => STANDARD.encode(&digest),
            _ if options.bool("uppercase")? => hex::encode_upper(&digest),
            _ => hex::encode(&digest),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::UnknownOptionPolicy;
    use serde_json::{Value, json};

    fn run(input: &str, supplied: Value) -> String {
        let tool = HashGeneratorTool::new().unwrap();
        let options = ToolOptions::merge(
            tool.descriptor(),
            supplied.as_object().unwrap(),
            UnknownOptionPolicy::Passthrough,
        )
        .unwrap();
        tool.run(input, &options).unwrap()
    }

    #[test]
    fn test_sha256_default() {
        assert_eq!(
            run("abc", json!({})),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_md5_uppercase() {
        assert_eq!(
            run("abc", json!({"algorithm": "md5", "uppercase": true})),
            "900150983CD24FB0D6963F7D28E17F72"
        );
    }

    #[test]
    fn test_sha512_length_and_base64() {
        assert_eq!(run("abc", json!({"algorithm": "sha512"})).len(), 128);
        assert_eq!(
            run("abc", json!({"algorithm": "md5", "format": "base64"})),
            "kAFQmDzST7DWlj99KOF/cg=="
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(run("", json!({})), "");
    }
}

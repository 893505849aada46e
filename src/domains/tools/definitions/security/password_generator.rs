//! Random password generator.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

const MIN_LENGTH: i64 = 4;
const MAX_LENGTH: i64 = 256;

/// Generates a random password from the selected character classes.
///
/// The input text is ignored. Every selected class contributes at least one
/// character when the length allows it.
pub struct PasswordGeneratorTool {
    descriptor: ToolDescriptor,
}

impl PasswordGeneratorTool {
    pub const ID: &'static str = "password-generator";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Security)
            .icon("shield")
            .option(OptionSpec::integer("length", 12, "Password length (4-256)"))
            .option(OptionSpec::boolean("includeUppercase", true, "Include uppercase letters"))
            .option(OptionSpec::boolean("includeLowercase", true, "Include lowercase letters"))
            .option(OptionSpec::boolean("includeNumbers", true, "Include digits"))
            .option(OptionSpec::boolean("includeSymbols", true, "Include symbols"))
            .content(
                Locale::En,
                "Password Generator",
                "Generate strong random passwords",
                None,
            )
            .content(Locale::Zh, "密码生成器", "生成安全的随机密码", None)
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for PasswordGeneratorTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn run(&self, _input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        let length = options.integer("length")?.clamp(MIN_LENGTH, MAX_LENGTH) as usize;

        let classes: Vec<Vec<char>> = [
            ("includeUppercase", UPPERCASE),
            ("includeLowercase", LOWERCASE),
            ("includeNumbers", DIGITS),
            ("includeSymbols", SYMBOLS),
        ]
        .into_iter()
        .filter_map(|(name, set)| match options.bool(name) {
            Ok(true) => Some(Ok(set.chars().collect())),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<Result<_, _>>()?;

        if classes.is_empty() {
            return Err(ToolError::transform(
                "select at least one character class",
            ));
        }

        let charset: Vec<char> = classes.iter().flatten().copied().collect();
        let mut rng = rand::thread_rng();

        let mut password: Vec<char> = classes
            .iter()
            .filter_map(|class| class.choose(&mut rng).copied())
            .collect();
        while password.len() < length {
            password.push(charset[rng.gen_range(0..charset.len())]);
        }
        password.shuffle(&mut rng);

        Ok(password.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::UnknownOptionPolicy;
    use serde_json::{Value, json};

    fn run(supplied: Value) -> Result<String, ToolError> {
        let tool = PasswordGeneratorTool::new().unwrap();
        let options = ToolOptions::merge(
            tool.descriptor(),
            supplied.as_object().unwrap(),
            UnknownOptionPolicy::Passthrough,
        )?;
        tool.run("", &options)
    }

    #[test]
    fn test_default_length_and_classes() {
        let pw = run(json!({})).unwrap();
        assert_eq!(pw.chars().count(), 12);
        assert!(pw.chars().any(|c| c.is_ascii_uppercase()));
        assert!(pw.chars().any(|c| c.is_ascii_lowercase()));
        assert!(pw.chars().any(|c| c.is_ascii_digit()));
        assert!(pw.chars().any(|c| SYMBOLS.contains(c)));
    }

    #[test]
    fn test_digits_only() {
        let pw = run(json!({
            "length": 20,
            "includeUppercase": false,
            "includeLowercase": false,
            "includeSymbols": false
        }))
        .unwrap();
        assert_eq!(pw.len(), 20);
        assert!(pw.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_length_is_clamped() {
        assert_eq!(run(json!({"length": 1})).unwrap().len(), 4);
        assert_eq!(run(json!({"length": "1000"})).unwrap().len(), 256);
    }

    #[test]
    fn test_no_classes_fails() {
        let err = run(json!({
            "includeUppercase": false,
            "includeLowercase": false,
            "includeNumbers": false,
            "includeSymbols": false
        }))
        .unwrap_err();
        assert!(matches!(err, ToolError::TransformFailure(_)));
    }
}

//! Identifier generator.
//!
//! The input is the number of identifiers to produce (1 when blank or not a
//! positive number, at most 1000).

use rand::Rng;
use rand::distributions::Alphanumeric;
use uuid::Uuid;

use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

pub const MAX_COUNT: usize = 1000;
const SHORT_LENGTH: usize = 22;

/// Generates UUIDs and other random identifiers.
pub struct UuidGeneratorTool {
    descriptor: ToolDescriptor,
}

impl UuidGeneratorTool {
    pub const ID: &'static str = "uuid-generator";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Utility)
            .icon("hash")
            .option(OptionSpec::choice(
                "format",
                &["uuid4", "uuid7", "short", "numeric"],
                "uuid4",
                "UUID v4 (random), UUID v7 (time-ordered), short alphanumeric id or numeric id",
            ))
            .option(OptionSpec::boolean("uppercase", false, "Uppercase output"))
            .option(OptionSpec::boolean("hyphens", true, "Keep hyphens in UUIDs"))
            .content(
                Locale::En,
                "UUID Generator",
                "Generate UUIDs and unique identifiers",
                Some("Number of identifiers (default 1)"),
            )
            .content(
                Locale::Zh,
                "UUID 生成器",
                "生成 UUID 和唯一标识符",
                Some("生成数量（默认 1）"),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for UuidGeneratorTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn validate(&self, input: &str) -> bool {
        let text = input.trim();
        text.is_empty()
            || text
                .parse::<usize>()
                .is_ok_and(|n| (1..=MAX_COUNT).contains(&n))
    }

    fn run(&self, input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        let count = input
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(1)
            .min(MAX_COUNT);

        let format = options.str("format")?;
        let uppercase = options.bool("uppercase")?;
        let hyphens = options.bool("hyphens")?;

        let mut rng = rand::thread_rng();
        let ids: Vec<String> = (0..count)
            .map(|_| {
                let id = match format {
                    "uuid7" => render_uuid(Uuid::now_v7(), hyphens),
                    "short" => (&mut rng)
                        .sample_iter(&Alphanumeric)
                        .take(SHORT_LENGTH)
                        .map(char::from)
                        .collect(),
                    "numeric" => rng.gen_range(0..1_000_000_000u64).to_string(),
                    _ => render_uuid(Uuid::new_v4(), hyphens),
                };
                if uppercase { id.to_uppercase() } else { id }
            })
            .collect();

        Ok(ids.join("\n"))
    }
}

fn render_uuid(id: Uuid, hyphens: bool) -> String {
    if hyphens {
        id.hyphenated().to_string()
    } else {
        id.simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::UnknownOptionPolicy;
    use serde_json::{Value, json};

    fn run(input: &str, supplied: Value) -> String {
        let tool = UuidGeneratorTool::new().unwrap();
        let options = ToolOptions::merge(
            tool.descriptor(),
            supplied.as_object().unwrap(),
            UnknownOptionPolicy::Passthrough,
        )
        .unwrap();
        tool.run(input, &options).unwrap()
    }

    #[test]
    fn test_default_single_v4() {
        let out = run("", json!({}));
        let id = Uuid::parse_str(&out).unwrap();
        assert_eq!(id.get_version_num(), 4);
        assert_eq!(out.len(), 36);
    }

    #[test]
    fn test_count_and_unique() {
        let out = run("5", json!({}));
        let ids: std::collections::HashSet<_> = out.lines().collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_invalid_count_falls_back_to_one() {
        assert_eq!(run("abc", json!({})).lines().count(), 1);
        assert_eq!(run("0", json!({})).lines().count(), 1);
        assert_eq!(run("5000", json!({"format": "numeric"})).lines().count(), MAX_COUNT);
    }

    #[test]
    fn test_formatting_options() {
        let out = run("", json!({"format": "uuid7", "hyphens": false, "uppercase": true}));
        assert_eq!(out.len(), 32);
        assert!(!out.contains('-'));
        assert_eq!(out, out.to_uppercase());
        assert_eq!(Uuid::parse_str(&out).unwrap().get_version_num(), 7);
    }

    #[test]
    fn test_short_and_numeric() {
        let short = run("", json!({"format": "short"}));
        assert_eq!(short.len(), SHORT_LENGTH);
        assert!(short.chars().all(|c| c.is_ascii_alphanumeric()));

        let numeric = run("", json!({"format": "numeric"}));
        assert!(numeric.parse::<u64>().unwrap() < 1_000_000_000);
    }

    #[test]
    fn test_validate() {
        let tool = UuidGeneratorTool::new().unwrap();
        assert!(tool.validate(""));
        assert!(tool.validate("10"));
        assert!(!tool.validate("0"));
        assert!(!tool.validate("1001"));
        assert!(!tool.validate("ten"));
    }
}

//! Placeholder text generator.

use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;

use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

const OPENING: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit";

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur", "excepteur", "sint",
    "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia", "deserunt",
    "mollit", "anim", "id", "est", "laborum",
];

const MIN_COUNT: i64 = 1;
const MAX_COUNT: i64 = 50;

/// Generates lorem ipsum paragraphs, sentences, words or characters.
///
/// The input text is ignored.
pub struct LoremGeneratorTool {
    descriptor: ToolDescriptor,
}

impl LoremGeneratorTool {
    pub const ID: &'static str = "lorem-generator";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Text)
            .icon("type")
            .option(OptionSpec::choice(
                "type",
                &["paragraphs", "sentences", "words", "characters"],
                "paragraphs",
                "Unit to generate",
            ))
            .option(OptionSpec::integer("count", 3, "How many units (1-50)"))
            .option(OptionSpec::boolean(
                "startWithLorem",
                true,
                "Begin with the classic \"Lorem ipsum dolor sit amet\"",
            ))
            .content(
                Locale::En,
                "Lorem Ipsum Generator",
                "Generate placeholder lorem ipsum text",
                None,
            )
            .content(Locale::Zh, "Lorem Ipsum 生成器", "生成占位文本", None)
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for LoremGeneratorTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn run(&self, _input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        let count = options.integer("count")?.clamp(MIN_COUNT, MAX_COUNT) as usize;
        let classic = options.bool("startWithLorem")?;
        let mut rng = rand::thread_rng();

        Ok(match options.str("type")? {
            "sentences" => sentences(&mut rng, count, classic).join(" "),
            "words" => words(&mut rng, count).join(" "),
            "characters" => {
                let mut text = String::new();
                while text.chars().count() < count {
                    text.push_str(&sentences(&mut rng, 1, classic && text.is_empty()).join(" "));
                    text.push(' ');
                }
                text.chars().take(count).collect()
            }
            _ => (0..count)
                .map(|i| {
                    let n = rng.gen_range(4..=7);
                    sentences(&mut rng, n, classic && i == 0).join(" ")
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
        })
    }
}

fn words(rng: &mut ThreadRng, count: usize) -> Vec<&'static str> {
    (0..count)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect()
}

fn sentences(rng: &mut ThreadRng, count: usize, classic: bool) -> Vec<String> {
    (0..count)
        .map(|i| {
            if classic && i == 0 {
                return format!("{}.", OPENING);
            }
            let len = rng.gen_range(6..=14);
            let body = words(rng, len).join(" ");
            let mut chars = body.chars();
            match chars.next() {
                Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::UnknownOptionPolicy;
    use serde_json::{Value, json};

    fn run(supplied: Value) -> String {
        let tool = LoremGeneratorTool::new().unwrap();
        let options = ToolOptions::merge(
            tool.descriptor(),
            supplied.as_object().unwrap(),
            UnknownOptionPolicy::Passthrough,
        )
        .unwrap();
        tool.run("", &options).unwrap()
    }

    #[test]
    fn test_default_three_paragraphs() {
        let out = run(json!({}));
        assert_eq!(out.split("\n\n").count(), 3);
        assert!(out.starts_with(OPENING));
    }

    #[test]
    fn test_words() {
        let out = run(json!({"type": "words", "count": 7}));
        assert_eq!(out.split(' ').count(), 7);
        assert!(out.split(' ').all(|w| WORDS.contains(&w)));
    }

    #[test]
    fn test_sentences_without_classic_opening() {
        let out = run(json!({"type": "sentences", "count": 4, "startWithLorem": false}));
        assert_eq!(out.matches('.').count(), 4);
        assert!(out.chars().next().unwrap().is_uppercase());
    }

    #[test]
    fn test_characters_exact_length() {
        let out = run(json!({"type": "characters", "count": 40}));
        assert_eq!(out.chars().count(), 40);
        assert!(out.starts_with("Lorem ipsum"));
    }

    #[test]
    fn test_count_is_clamped() {
        assert_eq!(run(json!({"type": "words", "count": 500})).split(' ').count(), 50);
        assert_eq!(run(json!({"type": "words", "count": -3})).split(' ').count(), 1);
    }
}

//! Text case converter.
//!
//! Each input line is converted independently so multi-line lists keep their
//! shape.

use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

const CASES: &[&str] = &[
    "upper", "lower", "title", "camel", "pascal", "snake", "kebab", "constant",
];

/// Converts text between common letter-case conventions.
pub struct TextCaseTool {
    descriptor: ToolDescriptor,
}

impl TextCaseTool {
    pub const ID: &'static str = "text-case";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Text)
            .icon("case-sensitive")
            .option(OptionSpec::choice("case", CASES, "snake", "Target case"))
            .content(
                Locale::En,
                "Text Case Converter",
                "Convert text between camelCase, snake_case, kebab-case and more",
                Some("Enter text to convert..."),
            )
            .content(
                Locale::Zh,
                "大小写转换",
                "在驼峰、下划线、短横线等命名风格之间转换文本",
                Some("请输入要转换的文本..."),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for TextCaseTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn run(&self, input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        let case = options.str("case")?;
        let lines: Vec<String> = input.lines().map(|line| convert(line, case)).collect();
        Ok(lines.join("\n"))
    }
}

fn convert(line: &str, case: &str) -> String {
    match case {
        "upper" => return line.to_uppercase(),
        "lower" => return line.to_lowercase(),
        _ => {}
    }

    let words = split_words(line);
    match case {
        "title" => words.iter().map(|w| capitalize(w)).collect::<Vec<_>>().join(" "),
        "camel" => words
            .iter()
            .enumerate()
            .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
            .collect(),
        "pascal" => words.iter().map(|w| capitalize(w)).collect(),
        "kebab" => join_lower(&words, "-"),
        "constant" => join_lower(&words, "_").to_uppercase(),
        _ => join_lower(&words, "_"),
    }
}

/// Split on separators and on lower-to-upper / acronym boundaries.
fn split_words(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

fn join_lower(words: &[String], sep: &str) -> String {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::UnknownOptionPolicy;
    use serde_json::json;

    fn run(input: &str, case: &str) -> String {
        let tool = TextCaseTool::new().unwrap();
        let options = ToolOptions::merge(
            tool.descriptor(),
            json!({ "case": case }).as_object().unwrap(),
            UnknownOptionPolicy::Passthrough,
        )
        .unwrap();
        tool.run(input, &options).unwrap()
    }

    #[test]
    fn test_word_splitting() {
        assert_eq!(split_words("parseHTTPResponse2xx"), vec!["parse", "HTTP", "Response2xx"]);
        assert_eq!(split_words("  hello-world_foo bar "), vec!["hello", "world", "foo", "bar"]);
    }

    #[test]
    fn test_each_case() {
        let input = "user account-id";
        assert_eq!(run(input, "upper"), "USER ACCOUNT-ID");
        assert_eq!(run(input, "title"), "User Account Id");
        assert_eq!(run(input, "camel"), "userAccountId");
        assert_eq!(run(input, "pascal"), "UserAccountId");
        assert_eq!(run(input, "snake"), "user_account_id");
        assert_eq!(run(input, "kebab"), "user-account-id");
        assert_eq!(run(input, "constant"), "USER_ACCOUNT_ID");
    }

    #[test]
    fn test_lines_are_independent() {
        assert_eq!(run("firstName\nlastName", "snake"), "first_name\nlast_name");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(run("", "camel"), "");
    }
}

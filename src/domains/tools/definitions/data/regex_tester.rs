//! Regular expression tester.
//!
//! The input is the text to search. The pattern, flags and replacement come
//! from options, and the result is a JSON report of every match.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::domains::tools::definitions::common::to_json_string;
use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchReport {
    #[serde(rename = "match")]
    text: String,
    /// Character offset of the match in the input.
    index: usize,
    /// Length of the match in characters.
    length: usize,
    groups: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TestReport {
    pattern: String,
    flags: String,
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    match_count: usize,
    matches: Vec<MatchReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replace_result: Option<String>,
}

/// Runs a pattern against the input and reports matches and replacements.
pub struct RegexTesterTool {
    descriptor: ToolDescriptor,
}

impl RegexTesterTool {
    pub const ID: &'static str = "regex-tester";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Data)
            .icon("search")
            .option(OptionSpec::string("pattern", "", "Regular expression to test"))
            .option(OptionSpec::string(
                "flags",
                "g",
                "Flags: g (replace all), i (ignore case), m (multi-line), s (dot matches newline), x (verbose)",
            ))
            .option(OptionSpec::string(
                "replacement",
                "",
                "Replacement text; $1, $name refer to capture groups",
            ))
            .content(
                Locale::En,
                "Regex Tester",
                "Test and debug regular expressions with flag support",
                Some("Enter the text to search..."),
            )
            .content(
                Locale::Zh,
                "正则表达式测试器",
                "测试和调试正则表达式，支持多种标志",
                Some("请输入要匹配的文本..."),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for RegexTesterTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn run(&self, input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        let pattern = options.str("pattern")?;
        if pattern.is_empty() {
            return Err(ToolError::configuration("pattern", "must not be empty"));
        }
        let flags = options.str("flags")?;
        let global = flags.contains('g');

        let regex = match build(pattern, flags)? {
            Ok(regex) => regex,
            Err(e) => {
                let report = TestReport {
                    pattern: pattern.to_string(),
                    flags: flags.to_string(),
                    is_valid: false,
                    error: Some(e.to_string()),
                    match_count: 0,
                    matches: Vec::new(),
                    replace_result: None,
                };
                return to_json_string(&report, 2);
            }
        };

        let matches: Vec<MatchReport> = regex
            .captures_iter(input)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(MatchReport {
                    text: whole.as_str().to_string(),
                    index: input[..whole.start()].chars().count(),
                    length: whole.as_str().chars().count(),
                    groups: caps
                        .iter()
                        .skip(1)
                        .map(|g| g.map_or(Value::Null, |m| Value::from(m.as_str())))
                        .collect(),
                })
            })
            .collect();

        let replacement = options.str("replacement")?;
        let replaced = if global {
            regex.replace_all(input, replacement)
        } else {
            regex.replace(input, replacement)
        };

        let report = TestReport {
            pattern: pattern.to_string(),
            flags: flags.to_string(),
            is_valid: true,
            error: None,
            match_count: matches.len(),
            matches,
            replace_result: Some(replaced.into_owned()),
        };
        to_json_string(&report, 2)
    }
}

/// Compile `pattern` with `flags`.
///
/// Unknown flags are an option error; a bad pattern is returned in the inner
/// result so it can be reported.
fn build(pattern: &str, flags: &str) -> Result<Result<Regex, regex::Error>, ToolError> {
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'g' => {}
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            other => {
                return Err(ToolError::configuration(
                    "flags",
                    format!("unsupported flag '{}'", other),
                ));
            }
        }
    }
    Ok(builder.build())
}

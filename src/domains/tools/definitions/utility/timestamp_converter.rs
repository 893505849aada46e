//! Timestamp converter.
//!
//! Converts between Unix timestamps (seconds or milliseconds) and calendar
//! representations. All calendar output is in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::domains::tools::definitions::common::non_blank;
use crate::domains::tools::{
    Category, Locale, OptionSpec, ToolDescriptor, ToolError, ToolOptions, Transform,
};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Converts timestamps and dates between formats.
pub struct TimestampConverterTool {
    descriptor: ToolDescriptor,
}

impl TimestampConverterTool {
    pub const ID: &'static str = "timestamp-converter";

    pub fn new() -> Result<Self, ToolError> {
        let descriptor = ToolDescriptor::builder(Self::ID, Category::Utility)
            .icon("clock")
            .option(OptionSpec::choice(
                "inputFormat",
                &["auto", "timestamp", "timestamp_ms", "iso", "date"],
                "auto",
                "How to read the input; auto treats 10 digits as seconds and 13 as milliseconds",
            ))
            .option(OptionSpec::choice(
                "outputFormat",
                &["iso", "timestamp", "timestamp_ms", "datetime", "date"],
                "iso",
                "Output representation",
            ))
            .content(
                Locale::En,
                "Timestamp Converter",
                "Convert between Unix timestamps and human-readable dates",
                Some("e.g. 1700000000 or 2024-01-01T00:00:00Z"),
            )
            .content(
                Locale::Zh,
                "时间戳转换器",
                "Unix 时间戳与日期格式互相转换",
                Some("例如 1700000000 或 2024-01-01T00:00:00Z"),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Transform for TimestampConverterTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn validate(&self, input: &str) -> bool {
        non_blank(input).is_none_or(|text| parse_input(text, "auto").is_ok())
    }

    fn run(&self, input: &str, options: &ToolOptions) -> Result<String, ToolError> {
        let Some(text) = non_blank(input) else {
            return Ok(String::new());
        };

        let instant = parse_input(text, options.str("inputFormat")?)?;

        Ok(match options.str("outputFormat")? {
            "timestamp" => instant.timestamp().to_string(),
            "timestamp_ms" => instant.timestamp_millis().to_string(),
            "datetime" => instant.format("%Y-%m-%d %H:%M:%S").to_string(),
            "date" => instant.format("%Y-%m-%d").to_string(),
            _ => instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

fn parse_input(text: &str, format: &str) -> Result<DateTime<Utc>, ToolError> {
    let all_digits = text.bytes().all(|b| b.is_ascii_digit());
    match format {
        "timestamp" => from_seconds(text),
        "timestamp_ms" => from_millis(text),
        "auto" if all_digits && text.len() == 10 => from_seconds(text),
        "auto" if all_digits && text.len() == 13 => from_millis(text),
        _ => parse_calendar(text),
    }
}

fn from_seconds(text: &str) -> Result<DateTime<Utc>, ToolError> {
    text.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| invalid(text))
}

fn from_millis(text: &str) -> Result<DateTime<Utc>, ToolError> {
    text.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| invalid(text))
}

fn parse_calendar(text: &str) -> Result<DateTime<Utc>, ToolError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| invalid(text))
}

fn invalid(text: &str) -> ToolError {
    ToolError::transform(format!("invalid date format: {}", text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::UnknownOptionPolicy;
    use serde_json::{Value, json};

    fn run(input: &str, supplied: Value) -> Result<String, ToolError> {
        let tool = TimestampConverterTool::new().unwrap();
        let options = ToolOptions::merge(
            tool.descriptor(),
            supplied.as_object().unwrap(),
            UnknownOptionPolicy::Passthrough,
        )?;
        tool.run(input, &options)
    }

    #[test]
    fn test_auto_seconds_to_iso() {
        assert_eq!(run("1700000000", json!({})).unwrap(), "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn test_auto_millis_to_datetime() {
        assert_eq!(
            run("1700000000123", json!({"outputFormat": "datetime"})).unwrap(),
            "2023-11-14 22:13:20"
        );
    }

    #[test]
    fn test_iso_to_timestamps() {
        assert_eq!(
            run("2024-01-01T00:00:00+02:00", json!({"outputFormat": "timestamp"})).unwrap(),
            "1704060000"
        );
        assert_eq!(
            run("2024-01-01", json!({"outputFormat": "timestamp_ms"})).unwrap(),
            "1704067200000"
        );
    }

    #[test]
    fn test_explicit_seconds_accepts_short_values() {
        assert_eq!(
            run("86400", json!({"inputFormat": "timestamp", "outputFormat": "date"})).unwrap(),
            "1970-01-02"
        );
    }

    #[test]
    fn test_invalid_input_fails() {
        let err = run("not a date", json!({})).unwrap_err();
        assert!(err.to_string().contains("invalid date format"));
    }

    #[test]
    fn test_validate() {
        let tool = TimestampConverterTool::new().unwrap();
        assert!(tool.validate(""));
        assert!(tool.validate("1700000000"));
        assert!(tool.validate("2024-05-01 10:00:00"));
        assert!(!tool.validate("yesterday"));
    }
}

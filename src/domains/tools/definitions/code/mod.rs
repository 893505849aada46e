pub mod json_formatter;
pub mod json_validator;

pub use json_formatter::JsonFormatterTool;
pub use json_validator::JsonValidatorTool;

pub mod timestamp_converter;
pub mod url_analyzer;
pub mod uuid_generator;

pub use timestamp_converter::TimestampConverterTool;
pub use url_analyzer::UrlAnalyzerTool;
pub use uuid_generator::UuidGeneratorTool;

pub mod lorem_generator;
pub mod text_case;

pub use lorem_generator::LoremGeneratorTool;
pub use text_case::TextCaseTool;

pub mod base64_encoder;
pub mod regex_tester;
pub mod url_encoder;

pub use base64_encoder::Base64EncoderTool;
pub use regex_tester::RegexTesterTool;
pub use url_encoder::UrlEncoderTool;

pub mod hash_generator;
pub mod password_generator;

pub use hash_generator::HashGeneratorTool;
pub use password_generator::PasswordGeneratorTool;

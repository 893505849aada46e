//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: the transform catalog and the processing pipeline
//! - **usage**: the usage event log and statistics
//! - **resources**: catalog and statistics exposed as MCP resources

pub mod resources;
pub mod tools;
pub mod usage;

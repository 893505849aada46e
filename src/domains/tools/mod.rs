//! Tools domain module.
//!
//! This module holds the transform catalog and everything needed to run a
//! transform. Each catalog entry is exposed to MCP clients as a tool.
//!
//! ## Architecture
//!
//! - `descriptor.rs` - Static identity, categories and option schema of a tool
//! - `options.rs` - Merging and coercion of caller options
//! - `handlers.rs` - The `Transform` trait and the `ProcessingResult` envelope
//! - `registry.rs` - The in-memory catalog (lookup, filter, search)
//! - `pipeline.rs` - Runs one invocation and records its usage
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `definitions/` - Built-in transforms (one file per tool)
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a file under the matching category in `definitions/`
//! 2. Implement `Transform` with a descriptor built in `new()`
//! 3. Add it to `definitions::all_tools()`
//!
//! Routes, resources and HTTP dispatch pick it up from the registry.

pub mod definitions;
mod descriptor;
mod error;
mod handlers;
mod options;
mod pipeline;
mod registry;
pub mod router;

pub use descriptor::{
    Category, Locale, LocalizedContent, OptionKind, OptionSpec, ToolDescriptor,
    ToolDescriptorBuilder, ToolInfo,
};
pub use error::ToolError;
pub use handlers::{ProcessingResult, Transform};
pub use options::{ToolOptions, UnknownOptionPolicy};
pub use pipeline::ProcessingPipeline;
pub use registry::ToolRegistry;
pub use router::{ToolCallParams, build_tool_router, call_result, tool_models};

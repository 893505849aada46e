//! Resources domain module.
//!
//! Exposes the tool catalog and usage statistics as read-only MCP resources
//! under the `toolkit://` scheme.
//!
//! ## Architecture
//!
//! - `definitions/` - Resource and template metadata (catalog, stats)
//! - `registry.rs` - Central resource registration
//! - `handlers.rs` - URI parsing into typed requests
//! - `service.rs` - Resource service for listing and reading
//!
//! ## Adding a New Resource
//!
//! 1. Add a definition in `definitions/`
//! 2. Register it in `registry.rs`
//! 3. Route its URI in `handlers.rs` and answer it in `service.rs`

pub mod definitions;
mod error;
mod handlers;
mod registry;
mod service;

pub use definitions::{ResourceDefinition, ResourceTemplateDefinition};
pub use error::ResourceError;
pub use handlers::{DEFAULT_SUMMARY_DAYS, ParsedRequest, ResourceRequest, SCHEME};
pub use registry::{get_all_resource_templates, get_all_resources, resource_uris};
pub use service::ResourceService;

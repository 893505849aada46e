//! Resource definitions module.
//!
//! Each definition carries the metadata a client sees when listing
//! resources. Content is computed on read from the live catalog and usage
//! log, see `handlers.rs` and `service.rs`.
//!
//! ## Adding a New Resource
//!
//! 1. Add a definition type here (or in a new file) implementing
//!    `ResourceDefinition` or `ResourceTemplateDefinition`
//! 2. Register it in `registry.rs`
//! 3. Route its URI in `handlers.rs`

pub mod catalog;
pub mod stats;

pub use catalog::{
    CatalogCategoriesResource, CatalogOverviewResource, CatalogToolsResource,
    CategoryToolsTemplate, SearchToolsTemplate, ToolDetailTemplate,
};
pub use stats::{StatsSnapshotResource, ToolStatsTemplate};

/// Trait for fixed-URI resources.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str = "application/json";
}

/// Trait for parameterized resources described by an RFC 6570 URI template.
pub trait ResourceTemplateDefinition {
    const URI_TEMPLATE: &'static str;
    const NAME: &'static str;
    const TITLE: &'static str;
    const DESCRIPTION: &'static str;
    const MIME_TYPE: &'static str = "application/json";
}

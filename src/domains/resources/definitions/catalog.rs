//! Catalog resources.
//!
//! Catalog URIs accept an optional `?locale=` query (`en`, `zh`, `ja`)
//! selecting the language of names and descriptions.

use super::{ResourceDefinition, ResourceTemplateDefinition};

/// Every registered tool, in catalog order.
pub struct CatalogToolsResource;

impl ResourceDefinition for CatalogToolsResource {
    const URI: &'static str = "toolkit://catalog/tools";
    const NAME: &'static str = "Tool Catalog";
    const DESCRIPTION: &'static str =
        "All available transforms with their category, icon and option schema";
}

/// The fixed set of catalog categories.
pub struct CatalogCategoriesResource;

impl ResourceDefinition for CatalogCategoriesResource {
    const URI: &'static str = "toolkit://catalog/categories";
    const NAME: &'static str = "Tool Categories";
    const DESCRIPTION: &'static str = "Names of every tool category";
}

/// Catalog size per category plus headline usage numbers.
pub struct CatalogOverviewResource;

impl ResourceDefinition for CatalogOverviewResource {
    const URI: &'static str = "toolkit://catalog/overview";
    const NAME: &'static str = "Catalog Overview";
    const DESCRIPTION: &'static str =
        "Number of tools per category together with total and today's usage";
}

pub struct ToolDetailTemplate;

impl ResourceTemplateDefinition for ToolDetailTemplate {
    const URI_TEMPLATE: &'static str = "toolkit://catalog/tools/{id}";
    const NAME: &'static str = "Tool Details";
    const TITLE: &'static str = "Look Up a Tool";
    const DESCRIPTION: &'static str = "Descriptor of a single tool by id";
}

pub struct SearchToolsTemplate;

impl ResourceTemplateDefinition for SearchToolsTemplate {
    const URI_TEMPLATE: &'static str = "toolkit://catalog/search/{query}";
    const NAME: &'static str = "Tool Search";
    const TITLE: &'static str = "Search Tools";
    const DESCRIPTION: &'static str =
        "Case-insensitive search over tool names and descriptions (percent-encode the query)";
}

pub struct CategoryToolsTemplate;

impl ResourceTemplateDefinition for CategoryToolsTemplate {
    const URI_TEMPLATE: &'static str = "toolkit://catalog/category/{category}";
    const NAME: &'static str = "Tools by Category";
    const TITLE: &'static str = "Browse a Category";
    const DESCRIPTION: &'static str =
        "Tools of one category: code, data, security, utility, design or text";
}

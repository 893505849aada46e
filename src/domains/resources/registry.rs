//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the definition in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, Resource, ResourceTemplate};

use super::definitions::{
    CatalogCategoriesResource, CatalogOverviewResource, CatalogToolsResource,
    CategoryToolsTemplate, ResourceDefinition, ResourceTemplateDefinition, SearchToolsTemplate,
    StatsSnapshotResource, ToolDetailTemplate, ToolStatsTemplate,
};

/// Create an annotated resource from a definition.
fn build_resource<R: ResourceDefinition>() -> Resource {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());
    raw.no_annotation()
}

/// Create an annotated resource template from a definition.
fn build_template<T: ResourceTemplateDefinition>() -> ResourceTemplate {
    RawResourceTemplate {
        uri_template: T::URI_TEMPLATE.to_string(),
        name: T::NAME.to_string(),
        title: Some(T::TITLE.to_string()),
        description: Some(T::DESCRIPTION.to_string()),
        mime_type: Some(T::MIME_TYPE.to_string()),
    }
    .no_annotation()
}

/// All fixed-URI resources, in listing order.
pub fn get_all_resources() -> Vec<Resource> {
    vec![
        build_resource::<CatalogToolsResource>(),
        build_resource::<CatalogCategoriesResource>(),
        build_resource::<CatalogOverviewResource>(),
        build_resource::<StatsSnapshotResource>(),
    ]
}

/// All resource templates, in listing order.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        build_template::<ToolDetailTemplate>(),
        build_template::<SearchToolsTemplate>(),
        build_template::<CategoryToolsTemplate>(),
        build_template::<ToolStatsTemplate>(),
    ]
}

/// URIs of the fixed resources.
pub fn resource_uris() -> Vec<&'static str> {
    vec![
        CatalogToolsResource::URI,
        CatalogCategoriesResource::URI,
        CatalogOverviewResource::URI,
        StatsSnapshotResource::URI,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources();
        assert_eq!(resources.len(), 4);

        let uris: Vec<_> = resources.iter().map(|r| r.raw.uri.as_str()).collect();
        assert_eq!(uris, resource_uris());
        assert!(
            resources
                .iter()
                .all(|r| r.raw.mime_type.as_deref() == Some("application/json"))
        );
    }

    #[test]
    fn test_get_all_resource_templates() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 4);

        let uri_templates: Vec<_> = templates
            .iter()
            .map(|t| t.raw.uri_template.as_str())
            .collect();
        assert!(uri_templates.contains(&"toolkit://catalog/tools/{id}"));
        assert!(uri_templates.contains(&"toolkit://catalog/search/{query}"));
        assert!(uri_templates.contains(&"toolkit://catalog/category/{category}"));
        assert!(uri_templates.contains(&"toolkit://stats/tools/{id}"));
    }
}

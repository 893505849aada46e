//! Resource service implementation.
//!
//! The ResourceService exposes the tool catalog and usage statistics as
//! read-only JSON documents. Content is computed on every read from the
//! shared [`ToolRegistry`] and [`UsageLog`], so it always reflects the
//! current state.
//!
//! The query helpers (`list_tools`, `stats`, ...) are shared with the HTTP
//! JSON-RPC methods that return the same documents without a resource URI.

use std::sync::Arc;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use serde::Serialize;
use tracing::{debug, info};

use super::error::ResourceError;
use super::handlers::{ParsedRequest, ResourceRequest};
use super::registry::{get_all_resource_templates, get_all_resources};
use crate::domains::tools::{Category, Locale, ToolInfo, ToolRegistry};
use crate::domains::usage::{
    CatalogOverview, StatsQuery, StatsSnapshot, ToolUsageSummary, UsageAggregator, UsageLog,
    now_ms,
};

/// Service for listing and reading catalog and statistics resources.
pub struct ResourceService {
    registry: Arc<ToolRegistry>,
    usage: Arc<UsageLog>,
    aggregator: UsageAggregator,
    resources: Vec<Resource>,
    templates: Vec<ResourceTemplate>,
}

impl ResourceService {
    pub fn new(
        registry: Arc<ToolRegistry>,
        usage: Arc<UsageLog>,
        aggregator: UsageAggregator,
    ) -> Self {
        let resources = get_all_resources();
        let templates = get_all_resource_templates();
        info!(
            "Initializing ResourceService with {} resources and {} templates",
            resources.len(),
            templates.len()
        );

        Self {
            registry,
            usage,
            aggregator,
            resources,
            templates,
        }
    }

    /// List all fixed-URI resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources.clone()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let ParsedRequest { request, locale } = ParsedRequest::parse(uri)?;
        debug!("Reading resource {} as {:?}", uri, request);

        let text = match request {
            ResourceRequest::CatalogTools => to_json(&self.list_tools(locale))?,
            ResourceRequest::CatalogCategories => to_json(&self.list_categories())?,
            ResourceRequest::CatalogOverview => to_json(&self.overview().await)?,
            ResourceRequest::StatsSnapshot(query) => to_json(&self.stats(&query).await)?,
            ResourceRequest::Tool(id) => to_json(&self.get_tool(&id, locale)?)?,
            ResourceRequest::Search(query) => to_json(&self.search_tools(&query, locale))?,
            ResourceRequest::Category(category) => {
                to_json(&self.tools_in_category(category, locale))?
            }
            ResourceRequest::ToolStats { tool_id, days } => {
                to_json(&self.tool_stats(&tool_id, days).await?)?
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }

    // ========================================================================
    // Catalog queries
    // ========================================================================

    /// Every registered tool, in catalog order.
    pub fn list_tools(&self, locale: Locale) -> Vec<ToolInfo> {
        self.registry
            .list_all()
            .iter()
            .map(|t| t.descriptor().info(locale))
            .collect()
    }

    /// One tool by id.
    pub fn get_tool(&self, id: &str, locale: Locale) -> Result<ToolInfo, ResourceError> {
        self.registry
            .get(id)
            .map(|t| t.descriptor().info(locale))
            .ok_or_else(|| ResourceError::not_found(format!("tool {}", id)))
    }

    /// Tools whose name or description contains `query`. A blank query matches nothing.
    pub fn search_tools(&self, query: &str, locale: Locale) -> Vec<ToolInfo> {
        self.registry
            .search_in(query, locale)
            .iter()
            .map(|t| t.descriptor().info(locale))
            .collect()
    }

    pub fn tools_in_category(&self, category: Category, locale: Locale) -> Vec<ToolInfo> {
        self.registry
            .list_by_category(category)
            .iter()
            .map(|t| t.descriptor().info(locale))
            .collect()
    }

    pub fn list_categories(&self) -> Vec<&'static str> {
        self.registry.categories()
    }

    // ========================================================================
    // Usage queries
    // ========================================================================

    /// Full statistics snapshot at the current time.
    pub async fn stats(&self, query: &StatsQuery) -> StatsSnapshot {
        let events = self.usage.all().await;
        self.aggregator
            .snapshot(&events, query, now_ms(), |id| self.registry.display_name(id))
    }

    /// Usage summary of one registered tool over the last `days` days.
    pub async fn tool_stats(
        &self,
        tool_id: &str,
        days: u32,
    ) -> Result<ToolUsageSummary, ResourceError> {
        if self.registry.get(tool_id).is_none() {
            return Err(ResourceError::not_found(format!("tool {}", tool_id)));
        }
        let events = self.usage.all().await;
        Ok(self
            .aggregator
            .tool_summary(&events, tool_id, days, now_ms()))
    }

    pub async fn overview(&self) -> CatalogOverview {
        let events = self.usage.all().await;
        self.aggregator.overview(&events, &self.registry, now_ms())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ResourceError> {
    serde_json::to_string_pretty(value).map_err(|e| ResourceError::internal(e.to_string()))
}

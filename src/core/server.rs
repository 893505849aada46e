//! Toolkit server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools, usage and resources domains.
//!
//! ## Tool Architecture
//!
//! Transforms are defined in `domains/tools/definitions/`, one file per tool,
//! and collected into the [`ToolRegistry`] catalog. The ToolRouter is built
//! from that catalog in `domains/tools/router.rs`, and every call goes through
//! the shared [`ProcessingPipeline`], so MCP and HTTP invocations are timed and
//! recorded the same way.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    resources::{ResourceError, ResourceService},
    tools::{
        Locale, ProcessingPipeline, ToolCallParams, ToolInfo, ToolRegistry, build_tool_router,
        call_result, tool_models,
    },
    usage::{
        JsonFileStore, StatsQuery, StatsSnapshot, ToolUsageSummary, UsageAggregator, UsageError,
        UsageLog,
    },
};

const INSTRUCTIONS: &str = "Transform toolkit: every tool takes an `input` string and an \
    optional `options` object and returns a processing envelope. Browse the catalog and usage \
    statistics through the toolkit:// resources.";

/// The main toolkit server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. Clones share
/// the same catalog, pipeline and usage log.
#[derive(Clone)]
pub struct ToolkitServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Runs transforms and records usage.
    pipeline: Arc<ProcessingPipeline>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl ToolkitServer {
    /// Build the server from configuration.
    ///
    /// Opens the usage log on the configured file (or in memory) and loads
    /// the default catalog.
    pub async fn from_config(config: Config) -> crate::Result<Self> {
        let registry = Arc::new(ToolRegistry::default_catalog()?);

        let usage = match &config.stats.file {
            Some(path) => {
                UsageLog::open(config.stats.capacity, Arc::new(JsonFileStore::new(path))).await
            }
            None => UsageLog::in_memory(config.stats.capacity),
        };

        Ok(Self::with_parts(config, registry, Arc::new(usage)))
    }

    /// Assemble the server from an existing catalog and usage log.
    pub fn with_parts(config: Config, registry: Arc<ToolRegistry>, usage: Arc<UsageLog>) -> Self {
        let config = Arc::new(config);

        let aggregator = match config.stats.utc_offset_minutes {
            Some(minutes) => UsageAggregator::with_offset_minutes(minutes),
            None => UsageAggregator::local(),
        };

        let pipeline = Arc::new(ProcessingPipeline::new(
            registry.clone(),
            usage.clone(),
            config.tools.clone(),
        ));
        let resource_service = Arc::new(ResourceService::new(registry, usage, aggregator));

        info!(
            "Toolkit server ready with {} tools",
            pipeline.registry().len()
        );

        Self {
            tool_router: build_tool_router::<Self>(pipeline.clone()),
            config,
            pipeline,
            resource_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Whether the statistics admin methods may be called.
    pub fn admin_enabled(&self) -> bool {
        self.config.stats.admin_enabled
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        tool_models(self.pipeline.registry())
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "outputSchema": t.output_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// `client_context` (usually the caller's user agent) is stored on the
    /// usage event. Malformed arguments are rejected before the pipeline runs;
    /// everything else, including an unknown tool, comes back as an envelope.
    #[instrument(skip(self, arguments, client_context))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
        client_context: Option<String>,
    ) -> Result<serde_json::Value, String> {
        let params: ToolCallParams = serde_json::from_value(arguments)
            .map_err(|e| format!("Invalid arguments for {}: {}", name, e))?;

        let result = self
            .pipeline
            .process_with_context(name, &params.input, &params.options, client_context)
            .await;

        serde_json::to_value(call_result(&result)).map_err(|e| e.to_string())
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> Result<serde_json::Value, ResourceError> {
        let result = self.resource_service.read_resource(uri).await?;
        Ok(serde_json::json!({
            "contents": result.contents
        }))
    }

    /// List all available resource templates (for HTTP transport).
    pub async fn list_resource_templates(&self) -> Vec<serde_json::Value> {
        let templates = self.resource_service.list_resource_templates().await;

        templates
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "uriTemplate": t.raw.uri_template,
                    "name": t.raw.name,
                    "title": t.raw.title,
                    "description": t.raw.description,
                    "mimeType": t.raw.mime_type
                })
            })
            .collect()
    }

    // ========================================================================
    // Catalog and statistics
    // ========================================================================

    pub fn catalog(&self, locale: Locale) -> Vec<ToolInfo> {
        self.resource_service.list_tools(locale)
    }

    pub fn get_tool(&self, id: &str, locale: Locale) -> Result<ToolInfo, ResourceError> {
        self.resource_service.get_tool(id, locale)
    }

    pub fn search_tools(&self, query: &str, locale: Locale) -> Vec<ToolInfo> {
        self.resource_service.search_tools(query, locale)
    }

    pub fn categories(&self) -> Vec<&'static str> {
        self.resource_service.list_categories()
    }

    pub async fn stats(&self, query: &StatsQuery) -> StatsSnapshot {
        self.resource_service.stats(query).await
    }

    pub async fn tool_stats(
        &self,
        tool_id: &str,
        days: u32,
    ) -> Result<ToolUsageSummary, ResourceError> {
        self.resource_service.tool_stats(tool_id, days).await
    }

    /// Pretty-printed JSON array of every retained event.
    pub async fn export_stats(&self) -> Result<String, UsageError> {
        self.pipeline.usage().export_snapshot().await
    }

    /// Write the export to `target` (a file, or a directory to place a dated file in).
    pub async fn export_stats_to(
        &self,
        target: &Path,
    ) -> Result<std::path::PathBuf, UsageError> {
        self.pipeline.usage().export_to(target).await
    }

    pub async fn clear_stats(&self) -> Result<(), UsageError> {
        self.pipeline.usage().clear().await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for ToolkitServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| match e {
                ResourceError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
                ResourceError::InvalidUri(_) => McpError::invalid_params(e.to_string(), None),
                ResourceError::Internal(_) => McpError::internal_error(e.to_string(), None),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn server() -> ToolkitServer {
        ToolkitServer::with_parts(
            Config::default(),
            Arc::new(ToolRegistry::default_catalog().unwrap()),
            Arc::new(UsageLog::in_memory(100)),
        )
    }

    #[tokio::test]
    async fn test_call_tool_records_context() {
        let server = server();
        let result = server
            .call_tool(
                "json-formatter",
                serde_json::json!({"input": "{\"a\":1}"}),
                Some("curl/8.0".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"]["result"], "{\n  \"a\": 1\n}");

        let events = server.pipeline.usage().all().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].client_context.as_deref(), Some("curl/8.0"));
    }

    #[tokio::test]
    async fn test_call_unknown_tool_is_failure_envelope() {
        let server = server();
        let result = server
            .call_tool("nope", serde_json::json!({"input": "x"}), None)
            .await
            .unwrap();

        assert_eq!(result["isError"], true);
        assert_eq!(result["structuredContent"]["processingTimeMs"], 0);
        assert_eq!(server.stats(&StatsQuery::default()).await.total_uses, 1);
    }

    #[tokio::test]
    async fn test_call_tool_rejects_malformed_arguments() {
        let server = server();
        let result = server
            .call_tool("json-formatter", serde_json::json!({"input": 5}), None)
            .await;
        assert!(result.is_err());
        assert_eq!(server.stats(&StatsQuery::default()).await.total_uses, 0);
    }

    #[tokio::test]
    async fn test_listings() {
        let server = server();
        assert_eq!(server.list_tools().len(), 12);
        assert_eq!(server.list_resources().await.len(), 4);
        assert_eq!(server.list_resource_templates().await.len(), 4);
        assert_eq!(server.catalog(Locale::En).len(), 12);
        assert!(server.categories().contains(&"text"));
    }

    #[tokio::test]
    async fn test_from_config_persists_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("usage.json");

        let mut config = Config::default();
        config.stats.file = Some(path.clone());

        let server = ToolkitServer::from_config(config.clone()).await.unwrap();
        server
            .call_tool("text-case", serde_json::json!({"input": "Hello World"}), None)
            .await
            .unwrap();

        let reopened = ToolkitServer::from_config(config).await.unwrap();
        assert_eq!(reopened.stats(&StatsQuery::default()).await.total_uses, 1);

        reopened.clear_stats().await.unwrap();
        assert_eq!(reopened.stats(&StatsQuery::default()).await.total_uses, 0);
    }

    #[tokio::test]
    async fn test_export_stats() {
        let server = server();
        server
            .call_tool("uuid-generator", serde_json::json!({"input": "2"}), None)
            .await
            .unwrap();

        let exported: serde_json::Value =
            serde_json::from_str(&server.export_stats().await.unwrap()).unwrap();
        assert_eq!(exported.as_array().unwrap().len(), 1);
        assert_eq!(exported[0]["toolId"], "uuid-generator");

        let dir = TempDir::new().unwrap();
        let written = server.export_stats_to(dir.path()).await.unwrap();
        assert!(written.starts_with(dir.path()));
        assert!(written.exists());
    }
}

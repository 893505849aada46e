//! Tool Router - exposes every registered transform as an MCP tool.
//!
//! Routes are generated from the registry at startup, so adding a transform
//! to the catalog is enough to publish it. Every tool takes the same
//! arguments (`input` plus an `options` object) and returns the processing
//! envelope as structured content.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter, schema_for_type},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;

use super::descriptor::{Locale, OptionKind, ToolDescriptor};
use super::handlers::{ProcessingResult, Transform};
use super::pipeline::ProcessingPipeline;
use super::registry::ToolRegistry;

// ============================================================================
// Call Parameters
// ============================================================================

/// Arguments accepted by every transform tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ToolCallParams {
    /// Text to transform.
    #[serde(default)]
    pub input: String,

    /// Option values, merged over the tool's declared defaults.
    #[serde(default)]
    pub options: Map<String, Value>,
}

// ============================================================================
// Tool Models
// ============================================================================

/// MCP tool model for one transform.
pub fn tool_model(tool: &dyn Transform) -> Tool {
    let descriptor = tool.descriptor();
    Tool {
        name: descriptor.id().to_string().into(),
        description: Some(descriptor.description().to_string().into()),
        input_schema: Arc::new(input_schema(descriptor)),
        annotations: None,
        output_schema: Some(schema_for_type::<ProcessingResult>().into()),
        icons: None,
        meta: None,
        title: Some(descriptor.name().to_string()),
    }
}

/// MCP tool models for the whole catalog, in registration order.
pub fn tool_models(registry: &ToolRegistry) -> Vec<Tool> {
    registry
        .list_all()
        .iter()
        .map(|tool| tool_model(tool.as_ref()))
        .collect()
}

fn input_schema(descriptor: &ToolDescriptor) -> JsonObject {
    let mut options = Map::new();
    for option in descriptor.options() {
        let mut property = json!({
            "type": option.kind.schema_type(),
            "description": option.description,
            "default": option.default_value,
        });
        if let OptionKind::Choice(choices) = &option.kind {
            property["enum"] = json!(choices);
        }
        options.insert(option.name.clone(), property);
    }

    let input_description = descriptor
        .localized_content(Locale::DEFAULT)
        .input_placeholder
        .clone()
        .unwrap_or_else(|| "Text to transform".to_string());

    let schema = json!({
        "type": "object",
        "properties": {
            "input": {
                "type": "string",
                "description": input_description,
            },
            "options": {
                "type": "object",
                "properties": options,
                "additionalProperties": true,
            },
        },
    });

    schema.as_object().cloned().unwrap_or_default()
}

/// Convert a processing envelope into an MCP tool result.
///
/// The text content carries the output (or the error message); the full
/// envelope is attached as structured content.
pub fn call_result(result: &ProcessingResult) -> CallToolResult {
    let text = result
        .result()
        .or(result.error())
        .unwrap_or_default()
        .to_string();

    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: serde_json::to_value(result).ok(),
        is_error: Some(!result.is_success()),
        meta: None,
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Create the route for one transform.
pub fn create_route<S>(tool: &Arc<dyn Transform>, pipeline: Arc<ProcessingPipeline>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let id = tool.descriptor().id().to_string();
    ToolRoute::new_dyn(tool_model(tool.as_ref()), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let pipeline = pipeline.clone();
        let id = id.clone();
        async move {
            let params: ToolCallParams = serde_json::from_value(Value::Object(args))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
            let result = pipeline.process(&id, &params.input, &params.options).await;
            Ok(call_result(&result))
        }
        .boxed()
    })
}

/// Build the tool router with one route per registered transform.
pub fn build_tool_router<S>(pipeline: Arc<ProcessingPipeline>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let tools = pipeline.registry().list_all();
    debug!("Building tool router with {} tools", tools.len());

    tools.iter().fold(ToolRouter::new(), |router, tool| {
        router.with_route(create_route(tool, pipeline.clone()))
    })
}

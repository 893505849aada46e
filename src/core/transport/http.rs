//! HTTP transport implementation.
//!
//! HTTP server with JSON-RPC over POST requests, so plain HTTP clients (curl,
//! browsers, dashboards) can use the toolkit. Besides the MCP methods it
//! serves catalog and statistics queries directly, and, when enabled, the
//! statistics admin methods.
//!
//! The request's `User-Agent` is stored as the client context of every
//! usage event recorded through `tools/call`.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use http::{HeaderMap, StatusCode, header::USER_AGENT};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::path::PathBuf;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::ToolkitServer;
use crate::domains::resources::{DEFAULT_SUMMARY_DAYS, ResourceError};
use crate::domains::tools::Locale;
use crate::domains::usage::{StatsQuery, export_file_name};

const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }

    /// Map a resource error onto a JSON-RPC error.
    fn resource_error(id: Option<Value>, err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound(_) => Self::error(id, -32002, err.to_string()),
            ResourceError::InvalidUri(_) => Self::invalid_params(id, err.to_string()),
            ResourceError::Internal(_) => Self::internal_error(id, err.to_string()),
        }
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: ToolkitServer,
    rpc_path: String,
}

// ============================================================================
// Method parameters
// ============================================================================

#[derive(Debug, Deserialize)]
struct ToolCallRequest {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ResourceReadRequest {
    uri: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogRequest {
    id: Option<String>,
    locale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchRequest {
    query: String,
    locale: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolStatsRequest {
    id: String,
    #[serde(default)]
    days: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExportRequest {
    path: Option<PathBuf>,
}

fn locale_of(tag: Option<&str>) -> Locale {
    tag.map(Locale::from_tag).unwrap_or_default()
}

/// Deserialize required params.
fn required<T: DeserializeOwned>(
    id: &Option<Value>,
    params: Option<Value>,
) -> Result<T, JsonRpcResponse> {
    let params =
        params.ok_or_else(|| JsonRpcResponse::invalid_params(id.clone(), "Missing params"))?;
    serde_json::from_value(params)
        .map_err(|e| JsonRpcResponse::invalid_params(id.clone(), e.to_string()))
}

/// Deserialize optional params, falling back to the type's default.
fn optional<T: DeserializeOwned + Default>(
    id: &Option<Value>,
    params: Option<Value>,
) -> Result<T, JsonRpcResponse> {
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(p) => serde_json::from_value(p)
            .map_err(|e| JsonRpcResponse::invalid_params(id.clone(), e.to_string())),
    }
}

// ============================================================================
// Transport
// ============================================================================

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum application for `server`.
    pub fn router(&self, server: ToolkitServer) -> Router {
        let state = AppState {
            server,
            rpc_path: self.config.rpc_path.clone(),
        };

        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: ToolkitServer) -> TransportResult<()> {
        let addr = self.address();
        let admin = server.admin_enabled();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");
        if admin {
            info!("  → Admin methods: admin/stats/export, admin/stats/clear");
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "documentation": format!("Send POST requests to {} with JSON-RPC messages", state.rpc_path)
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let response = process_request(&state, request, user_agent).await;

    (StatusCode::OK, Json(response))
}

/// Process a JSON-RPC request and return the response.
async fn process_request(
    state: &AppState,
    request: JsonRpcRequest,
    user_agent: Option<String>,
) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    let server = &state.server;
    let JsonRpcRequest {
        id, method, params, ..
    } = request;

    let outcome = match method.as_str() {
        "initialize" => Ok(handle_initialize(server)),
        "tools/list" => Ok(json!({ "tools": server.list_tools() })),
        "tools/call" => handle_tools_call(server, &id, params, user_agent).await,
        "resources/list" => Ok(json!({ "resources": server.list_resources().await })),
        "resources/templates/list" => Ok(json!({
            "resourceTemplates": server.list_resource_templates().await
        })),
        "resources/read" => handle_resources_read(server, &id, params).await,
        "catalog/get" => handle_catalog_get(server, &id, params),
        "catalog/search" => handle_catalog_search(server, &id, params),
        "catalog/categories" => Ok(json!({ "categories": server.categories() })),
        "stats/get" => handle_stats_get(server, &id, params).await,
        "stats/tool" => handle_stats_tool(server, &id, params).await,
        "admin/stats/export" | "admin/stats/clear" if !server.admin_enabled() => {
            warn!("Rejected admin method {} (admin disabled)", method);
            Err(JsonRpcResponse::method_not_found(id.clone()))
        }
        "admin/stats/export" => handle_admin_export(server, &id, params).await,
        "admin/stats/clear" => handle_admin_clear(server, &id).await,
        m if m.starts_with("notifications/") => {
            info!("Received notification: {}", m);
            Ok(Value::Null)
        }
        _ => {
            warn!("Unknown method: {}", method);
            Err(JsonRpcResponse::method_not_found(id.clone()))
        }
    };

    match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(response) => response,
    }
}

fn handle_initialize(server: &ToolkitServer) -> Value {
    info!("Processing initialize request");
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        }
    })
}

async fn handle_tools_call(
    server: &ToolkitServer,
    id: &Option<Value>,
    params: Option<Value>,
    user_agent: Option<String>,
) -> Result<Value, JsonRpcResponse> {
    let call: ToolCallRequest = required(id, params)?;
    let arguments = call.arguments.unwrap_or_else(|| json!({}));

    server
        .call_tool(&call.name, arguments, user_agent)
        .await
        .map_err(|e| JsonRpcResponse::invalid_params(id.clone(), e))
}

async fn handle_resources_read(
    server: &ToolkitServer,
    id: &Option<Value>,
    params: Option<Value>,
) -> Result<Value, JsonRpcResponse> {
    let read: ResourceReadRequest = required(id, params)?;
    server
        .read_resource(&read.uri)
        .await
        .map_err(|e| JsonRpcResponse::resource_error(id.clone(), e))
}

fn handle_catalog_get(
    server: &ToolkitServer,
    id: &Option<Value>,
    params: Option<Value>,
) -> Result<Value, JsonRpcResponse> {
    let req: CatalogRequest = optional(id, params)?;
    let locale = locale_of(req.locale.as_deref());

    match req.id {
        Some(tool_id) => {
            let tool = server
                .get_tool(&tool_id, locale)
                .map_err(|e| JsonRpcResponse::resource_error(id.clone(), e))?;
            Ok(json!({ "tool": tool }))
        }
        None => Ok(json!({ "tools": server.catalog(locale) })),
    }
}

fn handle_catalog_search(
    server: &ToolkitServer,
    id: &Option<Value>,
    params: Option<Value>,
) -> Result<Value, JsonRpcResponse> {
    let req: SearchRequest = optional(id, params)?;
    let locale = locale_of(req.locale.as_deref());
    Ok(json!({ "tools": server.search_tools(&req.query, locale) }))
}

async fn handle_stats_get(
    server: &ToolkitServer,
    id: &Option<Value>,
    params: Option<Value>,
) -> Result<Value, JsonRpcResponse> {
    let query: StatsQuery = optional(id, params)?;
    serde_json::to_value(server.stats(&query).await)
        .map_err(|e| JsonRpcResponse::internal_error(id.clone(), e.to_string()))
}

async fn handle_stats_tool(
    server: &ToolkitServer,
    id: &Option<Value>,
    params: Option<Value>,
) -> Result<Value, JsonRpcResponse> {
    let req: ToolStatsRequest = required(id, params)?;
    let summary = server
        .tool_stats(&req.id, req.days.unwrap_or(DEFAULT_SUMMARY_DAYS))
        .await
        .map_err(|e| JsonRpcResponse::resource_error(id.clone(), e))?;
    serde_json::to_value(summary)
        .map_err(|e| JsonRpcResponse::internal_error(id.clone(), e.to_string()))
}

async fn handle_admin_export(
    server: &ToolkitServer,
    id: &Option<Value>,
    params: Option<Value>,
) -> Result<Value, JsonRpcResponse> {
    let req: ExportRequest = optional(id, params)?;
    let internal = |e: crate::domains::usage::UsageError| {
        JsonRpcResponse::internal_error(id.clone(), e.to_string())
    };

    match req.path {
        Some(target) => {
            let written = server.export_stats_to(&target).await.map_err(internal)?;
            Ok(json!({ "path": written }))
        }
        None => {
            let content = server.export_stats().await.map_err(internal)?;
            Ok(json!({ "fileName": export_file_name(), "content": content }))
        }
    }
}

async fn handle_admin_clear(
    server: &ToolkitServer,
    id: &Option<Value>,
) -> Result<Value, JsonRpcResponse> {
    server
        .clear_stats()
        .await
        .map_err(|e| JsonRpcResponse::internal_error(id.clone(), e.to_string()))?;
    Ok(json!({ "cleared": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::tools::ToolRegistry;
    use crate::domains::usage::UsageLog;
    use axum::body::Body;
    use http::Request;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(admin: bool) -> Router {
        let mut config = Config::default();
        config.stats.admin_enabled = admin;
        let server = ToolkitServer::with_parts(
            config,
            Arc::new(ToolRegistry::default_catalog().unwrap()),
            Arc::new(UsageLog::in_memory(100)),
        );
        HttpTransport::new(HttpConfig::default()).router(server)
    }

    async fn rpc(app: &Router, method: &str, params: Value) -> Value {
        let body = json!({"jsonrpc": "2.0", "id": 1, "method": method, "params": params});
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/mcp")
                    .header("Content-Type", "application/json")
                    .header("User-Agent", "toolkit-test/1.0")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(false)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_tools_call_and_stats() {
        let app = app(false);

        let listed = rpc(&app, "tools/list", Value::Null).await;
        assert_eq!(listed["result"]["tools"].as_array().unwrap().len(), 12);

        let called = rpc(
            &app,
            "tools/call",
            json!({"name": "base64-encoder", "arguments": {"input": "hi"}}),
        )
        .await;
        assert_eq!(called["result"]["structuredContent"]["result"], "aGk=");

        let stats = rpc(&app, "stats/get", json!({"recentLimit": 1})).await;
        assert_eq!(stats["result"]["totalUses"], 1);
        assert_eq!(
            stats["result"]["recentActivity"][0]["toolId"],
            "base64-encoder"
        );

        let tool = rpc(&app, "stats/tool", json!({"id": "base64-encoder"})).await;
        assert_eq!(tool["result"]["periodDays"], 7);
        assert_eq!(tool["result"]["successes"], 1);
    }

    #[tokio::test]
    async fn test_catalog_methods() {
        let app = app(false);

        let one = rpc(&app, "catalog/get", json!({"id": "regex-tester"})).await;
        assert_eq!(one["result"]["tool"]["category"], "data");

        let missing = rpc(&app, "catalog/get", json!({"id": "nope"})).await;
        assert_eq!(missing["error"]["code"], -32002);

        let found = rpc(&app, "catalog/search", json!({"query": "uuid"})).await;
        assert_eq!(found["result"]["tools"][0]["id"], "uuid-generator");

        let categories = rpc(&app, "catalog/categories", Value::Null).await;
        assert!(!categories["result"]["categories"].as_array().unwrap().is_empty());

        let read = rpc(
            &app,
            "resources/read",
            json!({"uri": "toolkit://catalog/overview"}),
        )
        .await;
        assert!(read["result"]["contents"][0]["text"].is_string());
    }

    #[tokio::test]
    async fn test_admin_methods_gated() {
        let closed = app(false);
        let denied = rpc(&closed, "admin/stats/clear", Value::Null).await;
        assert_eq!(denied["error"]["code"], -32601);

        let open = app(true);
        rpc(
            &open,
            "tools/call",
            json!({"name": "text-case", "arguments": {"input": "a b", "options": {"case": "upper"}}}),
        )
        .await;

        let exported = rpc(&open, "admin/stats/export", Value::Null).await;
        let content = exported["result"]["content"].as_str().unwrap();
        let events: Value = serde_json::from_str(content).unwrap();
        assert_eq!(events[0]["clientContext"], "toolkit-test/1.0");

        let cleared = rpc(&open, "admin/stats/clear", Value::Null).await;
        assert_eq!(cleared["result"]["cleared"], true);
        let stats = rpc(&open, "stats/get", Value::Null).await;
        assert_eq!(stats["result"]["totalUses"], 0);
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let app = app(false);
        let unknown = rpc(&app, "does/not/exist", Value::Null).await;
        assert_eq!(unknown["error"]["code"], -32601);

        let missing = rpc(&app, "tools/call", Value::Null).await;
        assert_eq!(missing["error"]["code"], -32602);
    }
}

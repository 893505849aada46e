//! Processing Pipeline - runs one invocation end to end.
//!
//! The pipeline resolves a tool, merges options, times the transform and
//! folds every possible outcome (unknown tool, bad option, transform error,
//! panic, deadline) into a [`ProcessingResult`]. Each call appends exactly one
//! [`UsageEvent`] to the usage log. Nothing is retried or cached.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use super::error::ToolError;
use super::handlers::{ProcessingResult, Transform};
use super::options::ToolOptions;
use super::registry::ToolRegistry;
use crate::core::config::ToolsConfig;
use crate::domains::usage::{UsageEvent, UsageLog};

/// Executes transforms and records their usage.
pub struct ProcessingPipeline {
    registry: Arc<ToolRegistry>,
    usage: Arc<UsageLog>,
    config: ToolsConfig,
}

impl ProcessingPipeline {
    /// Create a pipeline over `registry` that records into `usage`.
    pub fn new(registry: Arc<ToolRegistry>, usage: Arc<UsageLog>, config: ToolsConfig) -> Self {
        Self {
            registry,
            usage,
            config,
        }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn usage(&self) -> &Arc<UsageLog> {
        &self.usage
    }

    /// Process `input` with the tool `tool_id`.
    pub async fn process(
        &self,
        tool_id: &str,
        input: &str,
        options: &Map<String, Value>,
    ) -> ProcessingResult {
        self.process_with_context(tool_id, input, options, None).await
    }

    /// Process `input`, tagging the usage event with `client_context`.
    #[instrument(skip(self, input, options, client_context), fields(tool_id = %tool_id))]
    pub async fn process_with_context(
        &self,
        tool_id: &str,
        input: &str,
        options: &Map<String, Value>,
        client_context: Option<String>,
    ) -> ProcessingResult {
        let result = match self.registry.get(tool_id) {
            Some(tool) => self.execute(tool, input, options).await,
            None => {
                warn!("Unknown tool requested: {}", tool_id);
                ProcessingResult::failure(ToolError::not_found(tool_id).to_string(), 0)
            }
        };

        let event = UsageEvent::now(tool_id, result.is_success(), result.processing_time_ms())
            .with_client_context(client_context);
        self.usage.append(event).await;

        result
    }

    async fn execute(
        &self,
        tool: Arc<dyn Transform>,
        input: &str,
        options: &Map<String, Value>,
    ) -> ProcessingResult {
        let started = Instant::now();
        let outcome = self.run_transform(tool, input, options).await;
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok(output) => {
                debug!("Transform succeeded in {} ms", elapsed);
                ProcessingResult::success(output, elapsed)
            }
            Err(e) => {
                warn!(kind = e.kind(), "Transform failed in {} ms: {}", elapsed, e);
                ProcessingResult::failure(e.to_string(), elapsed)
            }
        }
    }

    async fn run_transform(
        &self,
        tool: Arc<dyn Transform>,
        input: &str,
        options: &Map<String, Value>,
    ) -> Result<String, ToolError> {
        let options = ToolOptions::merge(tool.descriptor(), options, self.config.unknown_options)?;
        let id = tool.descriptor().id().to_string();
        let input = input.to_string();

        let task = tokio::task::spawn_blocking(move || tool.run(&input, &options));

        let joined = match self.config.timeout_ms {
            Some(limit_ms) => {
                match tokio::time::timeout(Duration::from_millis(limit_ms), task).await {
                    Ok(joined) => joined,
                    Err(_) => return Err(ToolError::timeout(id, limit_ms)),
                }
            }
            None => task.await,
        };

        joined.map_err(|e| {
            if e.is_panic() {
                ToolError::internal(format!("tool {} panicked", id))
            } else {
                ToolError::internal(format!("tool {} was cancelled", id))
            }
        })?
    }
}

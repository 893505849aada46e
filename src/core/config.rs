//! Configuration management for the toolkit server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::transport::TransportConfig;
use crate::domains::tools::UnknownOptionPolicy;
use crate::domains::usage::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the toolkit server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Tool invocation configuration.
    pub tools: ToolsConfig,

    /// Usage statistics configuration.
    pub stats: StatsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// How tool invocations are run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Deadline for a single transform in milliseconds. `None` disables it.
    pub timeout_ms: Option<u64>,

    /// Handling of option keys a tool does not declare.
    pub unknown_options: UnknownOptionPolicy,
}

/// Where and how usage events are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Maximum number of retained events.
    pub capacity: usize,

    /// JSON file the log persists to. `None` keeps events in memory only.
    pub file: Option<PathBuf>,

    /// UTC offset used for "today" and the histograms. `None` follows the host's time zone.
    pub utc_offset_minutes: Option<i32>,

    /// Expose the export/clear admin methods over HTTP.
    pub admin_enabled: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            file: None,
            utc_offset_minutes: None,
            admin_enabled: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "transform-toolkit".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            tools: ToolsConfig::default(),
            stats: StatsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `TOOLKIT_`.
    /// For example: `TOOLKIT_SERVER_NAME`, `TOOLKIT_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("TOOLKIT_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("TOOLKIT_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(timeout) = std::env::var("TOOLKIT_TOOL_TIMEOUT_MS") {
            match timeout.parse::<u64>() {
                Ok(0) => config.tools.timeout_ms = None,
                Ok(ms) => config.tools.timeout_ms = Some(ms),
                Err(_) => warn!("Ignoring invalid TOOLKIT_TOOL_TIMEOUT_MS: {}", timeout),
            }
        }

        if let Ok(policy) = std::env::var("TOOLKIT_UNKNOWN_OPTIONS") {
            match UnknownOptionPolicy::parse(&policy) {
                Some(p) => config.tools.unknown_options = p,
                None => warn!("Ignoring invalid TOOLKIT_UNKNOWN_OPTIONS: {}", policy),
            }
        }

        if let Ok(capacity) = std::env::var("TOOLKIT_STATS_CAPACITY") {
            match capacity.parse::<usize>() {
                Ok(n) if n > 0 => config.stats.capacity = n,
                _ => warn!("Ignoring invalid TOOLKIT_STATS_CAPACITY: {}", capacity),
            }
        }

        if let Ok(file) = std::env::var("TOOLKIT_STATS_FILE") {
            if !file.trim().is_empty() {
                config.stats.file = Some(PathBuf::from(file));
                info!("Usage statistics persisted to {:?}", config.stats.file);
            }
        }

        if let Ok(offset) = std::env::var("TOOLKIT_STATS_UTC_OFFSET_MINUTES") {
            match offset.parse::<i32>() {
                Ok(minutes) => config.stats.utc_offset_minutes = Some(minutes),
                Err(_) => warn!("Ignoring invalid TOOLKIT_STATS_UTC_OFFSET_MINUTES: {}", offset),
            }
        }

        if let Ok(admin) = std::env::var("TOOLKIT_STATS_ADMIN") {
            config.stats.admin_enabled = parse_flag(&admin);
            if config.stats.admin_enabled {
                warn!("Statistics admin methods enabled over HTTP");
            }
        }

        config
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

//! Transport configuration types.
//!
//! The transport is chosen with `TOOLKIT_TRANSPORT` (`stdio`, `tcp` or
//! `http`); an unknown or missing value falls back to the first enabled
//! transport in that order.

use serde::{Deserialize, Serialize};
#[cfg(any(feature = "tcp", feature = "http"))]
use std::str::FromStr;

#[cfg(feature = "tcp")]
const DEFAULT_TCP_PORT: u16 = 3000;

#[cfg(feature = "http")]
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Selected transport and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// Line-delimited JSON-RPC over TCP.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Path of the JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Allow any origin, for browser dashboards.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

/// Parse `key` from the environment, falling back to `default` when unset or invalid.
#[cfg(any(feature = "tcp", feature = "http"))]
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(feature = "tcp")]
impl TcpConfig {
    fn from_env() -> Self {
        Self {
            port: env_or("TOOLKIT_TCP_PORT", DEFAULT_TCP_PORT),
            host: env_or("TOOLKIT_TCP_HOST", default_host()),
        }
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_TCP_PORT,
            host: default_host(),
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    fn from_env() -> Self {
        let enable_cors = std::env::var("TOOLKIT_HTTP_CORS")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "off"))
            .unwrap_or_else(|_| default_cors());

        Self {
            port: env_or("TOOLKIT_HTTP_PORT", DEFAULT_HTTP_PORT),
            host: env_or("TOOLKIT_HTTP_HOST", default_host()),
            rpc_path: env_or("TOOLKIT_HTTP_PATH", default_rpc_path()),
            enable_cors,
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::fallback()
    }
}

impl TransportConfig {
    /// Load the transport selection from environment variables.
    pub fn from_env() -> Self {
        let transport = std::env::var("TOOLKIT_TRANSPORT")
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(TcpConfig::from_env()),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            _ => Self::fallback(),
        }
    }

    #[cfg(feature = "stdio")]
    fn fallback() -> Self {
        Self::Stdio
    }

    #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
    fn fallback() -> Self {
        Self::Tcp(TcpConfig::from_env())
    }

    #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
    fn fallback() -> Self {
        Self::Http(HttpConfig::from_env())
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}

#[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[cfg(feature = "stdio")]
    #[test]
    fn test_defaults_to_stdio() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("TOOLKIT_TRANSPORT");
        }
        let config = TransportConfig::from_env();
        assert!(matches!(config, TransportConfig::Stdio));
        assert_eq!(config.description(), "STDIO (standard MCP mode)");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOOLKIT_TRANSPORT", "HTTP");
            std::env::set_var("TOOLKIT_HTTP_PORT", "9090");
            std::env::set_var("TOOLKIT_HTTP_CORS", "false");
        }
        let config = TransportConfig::from_env();
        unsafe {
            std::env::remove_var("TOOLKIT_TRANSPORT");
            std::env::remove_var("TOOLKIT_HTTP_PORT");
            std::env::remove_var("TOOLKIT_HTTP_CORS");
        }

        match config {
            TransportConfig::Http(http) => {
                assert_eq!(http.port, 9090);
                assert_eq!(http.rpc_path, "/mcp");
                assert!(!http.enable_cors);
            }
            other => panic!("expected HTTP transport, got {:?}", other),
        }
    }
}

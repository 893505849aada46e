//! Transport layer for the toolkit server.
//!
//! - **STDIO** (`stdio`, default): one MCP session over stdin/stdout
//! - **TCP** (`tcp`): one MCP session per accepted connection
//! - **HTTP** (`http`): stateless JSON-RPC over POST, plus catalog, stats and
//!   admin methods for plain HTTP clients
//!
//! All transports share a single [`ToolkitServer`](crate::core::ToolkitServer),
//! so every session sees the same catalog and usage log.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;

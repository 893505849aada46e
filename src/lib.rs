//! Transform Toolkit Server
//!
//! An MCP server exposing a catalog of text and data transforms (JSON
//! formatting, encoders, hashing, generators, converters) together with
//! usage analytics over every invocation.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: transform catalog, option handling and the processing pipeline
//!   - **usage**: bounded usage log, persistence and statistics aggregation
//!   - **resources**: catalog and statistics as `toolkit://` resources
//!
//! # Example
//!
//! ```rust,no_run
//! use transform_toolkit_server::core::{Config, ToolkitServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = ToolkitServer::from_config(config).await?;
//!     // Start a transport...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, Result, ToolkitServer};

//! # hfgen MCP - Model Context Protocol Server
//!
//! Exposes the hfgen tool catalog to any MCP client (Claude Desktop, IDE
//! integrations, agents) over stdio.
//!
//! ## Features
//!
//! - **Tool discovery**: `tools/list` returns the registry catalog
//! - **Tool calls**: `tools/call` is routed through the [`hfgen_tools::Dispatcher`]
//! - **Cancellation**: a cancelled request abandons its in-flight inference call
//!
//! ## Example
//!
//! ```rust,no_run
//! use hfgen_mcp::McpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fails immediately if HF_TOKEN is not set
//!     let server = McpServer::from_env()?;
//!     server.serve_stdio().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod error;
pub mod server;

pub use adapter::{AdaptedCatalog, to_mcp_content, to_mcp_tool};
pub use error::{McpError, McpResult};
pub use server::{McpServer, RunningServer, ServerIdentity};

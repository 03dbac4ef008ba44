//! # hfgen
//!
//! An MCP server that exposes HuggingFace text generation as a tool.
//!
//! This facade re-exports the workspace crates:
//!
//! - [`hfgen_core`]: tool contract, argument schemas, errors, gateway contract, configuration
//! - [`hfgen_tools`]: tool registry, dispatcher and the `text_generation` tool
//! - [`hfgen_mcp`]: the MCP protocol server

pub use hfgen_core::{
    ArgValue, ConfigurationError, ContentBlock, DispatchError, ExecutionResult, GatewayError,
    GenerationRequest, InferenceGateway, JsonObject, PropertySchema, PropertyType, SchemaNode,
    ServerConfig, Tool, ToolDescriptor, ToolInvocation,
};
pub use hfgen_mcp::{McpError, McpServer, RunningServer};
pub use hfgen_tools::{Dispatcher, HuggingFaceGateway, ToolRegistry};

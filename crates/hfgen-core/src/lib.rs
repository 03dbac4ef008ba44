//! # hfgen Core
//!
//! Core traits and types for the hfgen tool server.
//! This crate provides the building blocks shared by the tool registry,
//! the dispatcher and the MCP protocol server:
//!
//! - **[Tool]** and **[ToolDescriptor]**: invocable capabilities and how they are advertised
//! - **[SchemaNode]**: declarative input contract with typed argument coercion
//! - **[InferenceGateway]**: the contract of the remote text generation provider
//! - **[ServerConfig]**: startup configuration loaded once from the environment

pub mod config;
pub mod error;
pub mod gateway;
pub mod schema;
pub mod secret;
pub mod tool;

pub use config::{ConfigurationError, ServerConfig, ServerConfigBuilder};
pub use error::{ArgumentError, DispatchError, DispatchResult, GatewayError, SchemaError};
pub use gateway::{GenerationRequest, InferenceGateway};
pub use schema::{ArgValue, Arguments, JsonObject, PropertySchema, PropertyType, SchemaNode};
pub use secret::{Secret, SecretString};
pub use tool::{ContentBlock, ExecutionResult, FailureReason, Tool, ToolDescriptor, ToolInvocation};

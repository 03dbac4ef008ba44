//! # hfgen Tools
//!
//! The tool catalog and everything needed to invoke it:
//!
//! - **Registry** ([`ToolRegistry`]): the static catalog of invocable tools
//! - **Dispatcher** ([`Dispatcher`]): resolves a `(name, arguments)` call against the
//!   catalog and normalizes the outcome into content blocks
//! - **Standard tools** ([`standard`]): `text_generation` and the HuggingFace
//!   inference gateway it calls

/// Routing of tool calls to handlers.
pub mod dispatcher;
/// Tool catalog.
pub mod registry;
/// Standard tool library.
pub mod standard;

pub use dispatcher::Dispatcher;
pub use registry::{RegistryError, ToolRegistry};
pub use standard::{HuggingFaceGateway, TextGenerationTool};

pub use hfgen_core::{ContentBlock, ExecutionResult, Tool, ToolDescriptor, ToolInvocation};

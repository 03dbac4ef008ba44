//! # Standard Tool Library
//!
//! The tools shipped in the production catalog and the HTTP gateway they
//! depend on.

pub mod huggingface;
pub mod text_generation;

pub use huggingface::HuggingFaceGateway;
pub use text_generation::TextGenerationTool;

use hfgen_core::{SchemaError, ToolDescriptor};

/// Descriptors of the standard catalog, available without a gateway.
pub fn descriptors() -> Result<Vec<ToolDescriptor>, SchemaError> {
    Ok(vec![text_generation::descriptor()?])
}

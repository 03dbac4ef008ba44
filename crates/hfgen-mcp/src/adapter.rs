//! Adapter to convert hfgen tool descriptors and results to MCP format

use hfgen_core::{ContentBlock, ToolDescriptor};
use hfgen_tools::ToolRegistry;
use rmcp::model::{Content, JsonObject, Tool};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{McpError, McpResult};

/// Convert a descriptor to an MCP tool definition.
///
/// `inputSchema` is the serialized [`hfgen_core::SchemaNode`].
pub fn to_mcp_tool(descriptor: &ToolDescriptor) -> McpResult<Tool> {
    let schema: JsonObject = match serde_json::to_value(descriptor.input_schema())? {
        Value::Object(map) => map,
        other => {
            return Err(McpError::InternalError(format!(
                "input schema of '{}' serialized to {} instead of an object",
                descriptor.name(),
                other
            )));
        }
    };

    Ok(Tool::new(
        descriptor.name().to_string(),
        descriptor.description().to_string(),
        Arc::new(schema),
    ))
}

/// Convert dispatcher output to MCP content.
pub fn to_mcp_content(blocks: Vec<ContentBlock>) -> Vec<Content> {
    blocks
        .into_iter()
        .map(|block| match block {
            ContentBlock::Text { text } => Content::text(text),
        })
        .collect()
}

/// The registry catalog, converted once to MCP tool definitions.
///
/// The registry never changes after startup, so `tools/list` can serve this
/// snapshot without touching the registry again.
#[derive(Debug, Clone, Default)]
pub struct AdaptedCatalog {
    tools: Vec<Tool>,
}

impl AdaptedCatalog {
    pub fn from_registry(registry: &ToolRegistry) -> McpResult<Self> {
        let tools = registry
            .list_tools()
            .iter()
            .map(to_mcp_tool)
            .collect::<McpResult<Vec<_>>>()?;
        Ok(Self { tools })
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

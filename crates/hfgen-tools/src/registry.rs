use hfgen_core::{InferenceGateway, SchemaError, Tool, ToolDescriptor};
use std::sync::Arc;

use crate::standard::TextGenerationTool;

/// Errors raised while building a tool catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Tool '{name}' is already registered")]
    DuplicateTool { name: String },

    #[error("Invalid tool declaration: {0}")]
    Schema(#[from] SchemaError),
}

/// Static catalog of invocable tools.
///
/// The registry is built once at startup and only read afterwards, so it can
/// be shared behind an `Arc` by concurrently running calls. Tools are listed
/// in registration order.
///
/// # Example
///
/// ```rust
/// use hfgen_testing::MockTool;
/// use hfgen_tools::ToolRegistry;
/// use std::sync::Arc;
///
/// let registry = ToolRegistry::new()
///     .try_with_tool(Arc::new(MockTool::new("echo")))
///     .unwrap();
///
/// assert_eq!(registry.tool_names(), vec!["echo"]);
/// assert!(registry.find("echo").is_some());
/// ```
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// The production catalog: `text_generation` backed by `gateway`.
    pub fn standard(gateway: Arc<dyn InferenceGateway>) -> Result<Self, RegistryError> {
        Self::new().try_with_tool(Arc::new(TextGenerationTool::new(gateway)?))
    }

    /// Add a tool using the builder pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTool`] if a tool with the same name exists.
    pub fn try_with_tool(mut self, tool: Arc<dyn Tool>) -> Result<Self, RegistryError> {
        self.register(tool)?;
        Ok(self)
    }

    /// Add a tool using the builder pattern.
    ///
    /// # Panics
    ///
    /// Panics if the name is already registered. Use `try_with_tool` for error handling.
    pub fn with_tool(self, tool: Arc<dyn Tool>) -> Self {
        self.try_with_tool(tool).expect("Unique tool name")
    }

    /// Register a tool in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        if self.find(tool.name()).is_some() {
            return Err(RegistryError::DuplicateTool {
                name: tool.name().to_string(),
            });
        }
        tracing::debug!(tool = %tool.name(), "Registered tool");
        self.tools.push(tool);
        Ok(())
    }

    /// Descriptors of every registered tool, in registration order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|tool| tool.descriptor().clone())
            .collect()
    }

    /// Find a tool by name.
    pub fn find(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hfgen_testing::{MockGateway, MockTool};

    #[test]
    fn test_standard_catalog() {
        let registry = ToolRegistry::standard(Arc::new(MockGateway::new())).unwrap();

        let tools = registry.list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name(), "text_generation");
        assert_eq!(
            tools[0].input_schema().required().iter().collect::<Vec<_>>(),
            vec!["prompt"]
        );
    }

    #[test]
    fn test_list_tools_is_stable() {
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(MockTool::new("first")))
            .with_tool(Arc::new(MockTool::new("second")));

        assert_eq!(registry.list_tools(), registry.list_tools());
        assert_eq!(registry.tool_names(), vec!["first", "second"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = ToolRegistry::new()
            .with_tool(Arc::new(MockTool::new("echo")))
            .try_with_tool(Arc::new(MockTool::new("echo")));

        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateTool {
                name: "echo".to_string()
            }
        );
    }

    #[test]
    fn test_find_unknown_tool() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.find("text_generation").is_none());
    }
}

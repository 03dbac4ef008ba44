//! # Mock Tools for Testing
//!
//! A tool with a fixed descriptor that returns predictable results, for
//! exercising the registry and dispatcher independently of text generation.

use async_trait::async_trait;
use hfgen_core::{
    ArgumentError, Arguments, ExecutionResult, FailureReason, PropertySchema, SchemaNode, Tool,
    ToolDescriptor,
};
use std::sync::{Arc, Mutex};

/// A mock tool that echoes its `input` argument or returns a canned result
#[derive(Debug, Clone)]
pub struct MockTool {
    descriptor: ToolDescriptor,
    result: Option<ExecutionResult>,
    call_history: Arc<Mutex<Vec<Arguments>>>,
}

impl MockTool {
    /// Create a mock tool accepting a single required string `input`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid tool name.
    pub fn new(name: impl Into<String>) -> Self {
        let schema = SchemaNode::object()
            .property(
                "input",
                PropertySchema::string().with_description("Text to echo back"),
            )
            .require("input");
        Self::with_schema(name, schema)
    }

    /// Create a mock tool with a custom input schema.
    ///
    /// # Panics
    ///
    /// Panics if the name or schema is invalid.
    pub fn with_schema(name: impl Into<String>, schema: SchemaNode) -> Self {
        let name = name.into();
        let descriptor = ToolDescriptor::new(name.clone(), format!("Mock tool {name}"), schema)
            .expect("valid mock tool descriptor");
        Self {
            descriptor,
            result: None,
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always succeed with `output`
    pub fn with_response(mut self, output: impl Into<String>) -> Self {
        self.result = Some(ExecutionResult::success(output));
        self
    }

    /// Always fail with `message`
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.result = Some(ExecutionResult::failed(FailureReason::Custom {
            category: "mock_failure".to_string(),
            message: message.into(),
        }));
        self
    }

    /// Get the number of times this tool has been called
    pub fn call_count(&self) -> usize {
        self.history().len()
    }

    /// Resolved arguments of every call, oldest first
    pub fn call_history(&self) -> Vec<Arguments> {
        self.history().clone()
    }

    fn history(&self) -> std::sync::MutexGuard<'_, Vec<Arguments>> {
        self.call_history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Tool for MockTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn call(&self, arguments: Arguments) -> Result<ExecutionResult, ArgumentError> {
        self.history().push(arguments.clone());

        if let Some(result) = &self.result {
            return Ok(result.clone());
        }

        let input = arguments.require_str("input")?;
        Ok(ExecutionResult::success(format!("Echo: {}", input)))
    }
}

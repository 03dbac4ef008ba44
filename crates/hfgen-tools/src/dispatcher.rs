use hfgen_core::{ContentBlock, DispatchError, DispatchResult, JsonObject, ToolDescriptor, ToolInvocation};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::registry::ToolRegistry;

/// Routes tool calls to their handlers.
///
/// A call resolves in three steps: look the name up in the catalog, resolve
/// the raw arguments against the tool's schema, then run the handler. Caller
/// mistakes (unknown name, missing or mistyped argument) come back as
/// [`DispatchError`]; provider failures are not errors at this level and come
/// back as ordinary text content.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// The catalog advertised to clients.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.registry.list_tools()
    }

    /// Invoke the named tool with raw caller arguments.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::UnknownTool`] if `name` is not in the catalog
    /// - [`DispatchError::MissingArgument`] if a required argument is absent
    /// - [`DispatchError::InvalidArgument`] if an argument cannot be coerced
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: &JsonObject,
    ) -> DispatchResult<Vec<ContentBlock>> {
        let Some(tool) = self.registry.find(name) else {
            warn!(tool = %name, "Call to unknown tool");
            return Err(DispatchError::unknown_tool(name));
        };

        let resolved = tool
            .descriptor()
            .input_schema()
            .resolve(arguments)
            .map_err(|e| {
                warn!(tool = %name, error = %e, "Rejected tool arguments");
                DispatchError::from_argument(name, e)
            })?;

        info!(tool = %name, arguments = resolved.len(), "Dispatching tool call");

        let result = tool.call(resolved).await.map_err(|e| {
            warn!(tool = %name, error = %e, "Tool rejected argument value");
            DispatchError::from_argument(name, e)
        })?;

        if let Some(reason) = result.failure_reason() {
            warn!(tool = %name, reason = %reason, "Tool call completed with failure");
        } else {
            debug!(tool = %name, "Tool call completed");
        }

        Ok(result.into_content())
    }

    /// Invoke a prepared [`ToolInvocation`].
    pub async fn dispatch(&self, invocation: &ToolInvocation) -> DispatchResult<Vec<ContentBlock>> {
        self.call_tool(&invocation.tool_name, &invocation.arguments)
            .await
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, SchemaError};
use crate::schema::{Arguments, JsonObject, SchemaNode};

/// Maximum length of a tool name.
pub const MAX_TOOL_NAME_LEN: usize = 128;

/// Categorized failure reasons for tool execution.
///
/// A failure is reported to the caller as text content, not as a protocol
/// error, so every variant renders to a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailureReason {
    /// The inference provider could not produce text
    GenerationFailed {
        /// Original error message from the provider or transport
        message: String,
    },
    /// Custom error for tool-specific failures
    Custom {
        /// Error category or code
        category: String,
        /// Error message
        message: String,
    },
}

impl FailureReason {
    /// Get a human-readable error message
    pub fn message(&self) -> String {
        match self {
            FailureReason::GenerationFailed { message } => format!("Generation error: {}", message),
            FailureReason::Custom { category, message } => format!("{}: {}", category, message),
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// The result of executing a tool handler.
///
/// `ExecutionResult` represents either successful execution with output
/// or failed execution with a structured failure reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Tool executed successfully with the given output.
    Success { output: String },

    /// Tool execution failed with a structured reason.
    Failure { reason: FailureReason },
}

impl ExecutionResult {
    pub fn success(output: impl Into<String>) -> Self {
        ExecutionResult::Success {
            output: output.into(),
        }
    }

    pub fn failed(reason: FailureReason) -> Self {
        ExecutionResult::Failure { reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionResult::Failure { .. })
    }

    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match self {
            ExecutionResult::Failure { reason } => Some(reason),
            ExecutionResult::Success { .. } => None,
        }
    }

    /// Convert into the content envelope returned to the caller.
    ///
    /// Failures become text too: the caller always receives a well-formed
    /// result, with the failure message as its content.
    pub fn into_content(self) -> Vec<ContentBlock> {
        match self {
            ExecutionResult::Success { output } => vec![ContentBlock::text(output)],
            ExecutionResult::Failure { reason } => vec![ContentBlock::text(reason.message())],
        }
    }
}

/// A unit of response payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            ContentBlock::Text { text } => text,
        }
    }
}

/// How a tool is advertised to callers: stable name, description and input contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    name: String,
    description: String,
    #[serde(rename = "inputSchema")]
    input_schema: SchemaNode,
}

impl ToolDescriptor {
    /// Create a descriptor, checking the name and the schema invariants.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: SchemaNode,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        validate_tool_name(&name)?;
        input_schema.validate()?;

        Ok(Self {
            name,
            description: description.into(),
            input_schema,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_schema(&self) -> &SchemaNode {
        &self.input_schema
    }
}

fn validate_tool_name(name: &str) -> Result<(), SchemaError> {
    let invalid = |reason: &str| SchemaError::InvalidToolName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.len() > MAX_TOOL_NAME_LEN {
        return Err(invalid("name exceeds 128 characters"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(invalid("only ASCII letters, digits, '_', '-' and '.' are allowed"));
    }
    Ok(())
}

/// A request to invoke a named tool with raw caller arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub tool_name: String,
    pub arguments: JsonObject,
}

impl ToolInvocation {
    pub fn new(tool_name: impl Into<String>, arguments: JsonObject) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }

    /// Invocation without arguments.
    pub fn bare(tool_name: impl Into<String>) -> Self {
        Self::new(tool_name, JsonObject::new())
    }
}

/// Trait defining a capability the server exposes to callers.
///
/// The dispatcher resolves caller arguments against
/// [`ToolDescriptor::input_schema`] before `call` runs, so handlers receive
/// typed values with defaults already applied.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use hfgen_core::{
///     ArgumentError, Arguments, ExecutionResult, PropertySchema, SchemaNode, Tool,
///     ToolDescriptor,
/// };
///
/// struct ShoutTool {
///     descriptor: ToolDescriptor,
/// }
///
/// #[async_trait]
/// impl Tool for ShoutTool {
///     fn descriptor(&self) -> &ToolDescriptor {
///         &self.descriptor
///     }
///
///     async fn call(&self, arguments: Arguments) -> Result<ExecutionResult, ArgumentError> {
///         let text = arguments.require_str("text")?;
///         Ok(ExecutionResult::success(text.to_uppercase()))
///     }
/// }
///
/// let descriptor = ToolDescriptor::new(
///     "shout",
///     "Uppercase the input",
///     SchemaNode::object()
///         .property("text", PropertySchema::string())
///         .require("text"),
/// )
/// .unwrap();
/// let tool = ShoutTool { descriptor };
/// assert_eq!(tool.name(), "shout");
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's advertised name, description and input schema.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Returns the unique name identifier for this tool.
    fn name(&self) -> &str {
        self.descriptor().name()
    }

    /// Execute the tool with resolved arguments.
    ///
    /// Return `Err` only for caller mistakes the schema cannot express
    /// (for example a value outside the accepted range). Failures of the
    /// work itself belong in [`ExecutionResult::Failure`].
    async fn call(&self, arguments: Arguments) -> Result<ExecutionResult, ArgumentError>;
}

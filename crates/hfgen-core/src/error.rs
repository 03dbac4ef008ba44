//! Error Types
//!
//! Errors are split by who caused them:
//!
//! - [`SchemaError`]: a tool was declared with an inconsistent schema (programmer error,
//!   caught at registration)
//! - [`ArgumentError`] / [`DispatchError`]: the caller sent a call the catalog cannot
//!   honour (unknown tool, missing or mistyped argument). These surface as
//!   protocol-level errors.
//! - [`GatewayError`]: the inference provider failed. These are recovered inside the
//!   dispatcher and reported to the caller as ordinary text content.

use thiserror::Error;

use crate::schema::PropertyType;
use crate::tool::FailureReason;

/// Result type for dispatching a tool call.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Inconsistent tool declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("required property '{name}' is not declared in the schema")]
    UndeclaredRequired { name: String },

    #[error("default for property '{property}' is {found}, expected {expected}")]
    DefaultTypeMismatch {
        property: String,
        expected: PropertyType,
        found: PropertyType,
    },

    #[error("invalid tool name '{name}': {reason}")]
    InvalidToolName { name: String, reason: String },
}

/// An argument could not be resolved against a tool schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("missing required argument '{argument}'")]
    Missing { argument: String },

    #[error("argument '{argument}' expects {expected}, got {found}")]
    Invalid {
        argument: String,
        expected: PropertyType,
        found: String,
    },
}

impl ArgumentError {
    pub fn argument(&self) -> &str {
        match self {
            ArgumentError::Missing { argument } | ArgumentError::Invalid { argument, .. } => {
                argument
            }
        }
    }
}

/// Caller errors raised while dispatching a tool call.
///
/// Every variant is raised before the tool handler reaches the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The requested name is not in the tool catalog.
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// A required argument resolved to no value.
    #[error("Tool '{tool}' is missing required argument '{argument}'")]
    MissingArgument { tool: String, argument: String },

    /// An argument was present but could not be coerced to its declared type.
    #[error("Tool '{tool}' received invalid argument '{argument}': {reason}")]
    InvalidArgument {
        tool: String,
        argument: String,
        reason: String,
    },
}

impl DispatchError {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        DispatchError::UnknownTool { name: name.into() }
    }

    /// Attach the tool name to an argument resolution failure.
    pub fn from_argument(tool: &str, error: ArgumentError) -> Self {
        match error {
            ArgumentError::Missing { argument } => DispatchError::MissingArgument {
                tool: tool.to_string(),
                argument,
            },
            other => DispatchError::InvalidArgument {
                tool: tool.to_string(),
                argument: other.argument().to_string(),
                reason: other.to_string(),
            },
        }
    }

    pub fn tool_name(&self) -> &str {
        match self {
            DispatchError::UnknownTool { name } => name,
            DispatchError::MissingArgument { tool, .. }
            | DispatchError::InvalidArgument { tool, .. } => tool,
        }
    }
}

/// Failure reported by the inference gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    /// The provider answered with a body we could not interpret.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// The model id cannot be addressed on the inference endpoint.
    #[error("invalid model id: {0}")]
    InvalidModel(String),
}

impl GatewayError {
    /// Transient failures that may succeed if the caller tries again.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Network(_) | GatewayError::Timeout(_) => true,
            GatewayError::Provider { status, .. } => *status == 429 || *status >= 500,
            GatewayError::InvalidResponse(_) | GatewayError::InvalidModel(_) => false,
        }
    }

    /// Map to the failure recorded in a tool's execution result.
    pub fn to_failure_reason(&self) -> FailureReason {
        FailureReason::GenerationFailed {
            message: self.to_string(),
        }
    }
}

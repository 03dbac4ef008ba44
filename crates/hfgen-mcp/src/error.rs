//! MCP error types
//!
//! Errors raised while building or running the protocol server, and their
//! mapping onto JSON-RPC error objects.

use hfgen_core::{ConfigurationError, DispatchError, GatewayError};
use hfgen_tools::RegistryError;
use rmcp::model::{ErrorCode, ErrorData};
use serde_json::json;
use thiserror::Error;

/// MCP operation result type
pub type McpResult<T> = Result<T, McpError>;

/// JSON-RPC code for a request abandoned at the client's request.
pub const REQUEST_CANCELLED: i32 = -32800;

/// Errors that can occur during MCP operations
#[derive(Debug, Error)]
pub enum McpError {
    /// Startup configuration is missing or malformed
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The inference gateway could not be constructed
    #[error("Gateway setup failed: {0}")]
    Gateway(#[from] GatewayError),

    /// The tool catalog could not be built
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The caller sent a call the catalog cannot honour
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The initialize handshake did not complete
    #[error("MCP initialization failed: {0}")]
    InitializeError(String),

    /// Transport error
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The client cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// Internal server error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl McpError {
    /// Errors that prevent the server from starting or continuing to serve.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            McpError::Configuration(_)
                | McpError::Gateway(_)
                | McpError::Registry(_)
                | McpError::InitializeError(_)
                | McpError::TransportError(_)
        )
    }
}

impl From<McpError> for ErrorData {
    fn from(error: McpError) -> Self {
        match error {
            McpError::Dispatch(err) => {
                let data = match &err {
                    DispatchError::UnknownTool { name } => json!({ "tool": name }),
                    DispatchError::MissingArgument { tool, argument }
                    | DispatchError::InvalidArgument { tool, argument, .. } => {
                        json!({ "tool": tool, "argument": argument })
                    }
                };
                ErrorData::invalid_params(err.to_string(), Some(data))
            }
            McpError::Cancelled => ErrorData::new(
                ErrorCode(REQUEST_CANCELLED),
                McpError::Cancelled.to_string(),
                None,
            ),
            other => ErrorData::internal_error(other.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_is_invalid_params() {
        let data: ErrorData = McpError::from(DispatchError::unknown_tool("nonexistent_tool")).into();

        assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(data.message, "Unknown tool: nonexistent_tool");
        assert_eq!(data.data, Some(json!({"tool": "nonexistent_tool"})));
    }

    #[test]
    fn test_missing_argument_carries_argument_name() {
        let err = DispatchError::MissingArgument {
            tool: "text_generation".to_string(),
            argument: "prompt".to_string(),
        };
        let data: ErrorData = McpError::Dispatch(err).into();

        assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(
            data.data,
            Some(json!({"tool": "text_generation", "argument": "prompt"}))
        );
    }

    #[test]
    fn test_cancelled_code() {
        let data: ErrorData = McpError::Cancelled.into();
        assert_eq!(data.code, ErrorCode(REQUEST_CANCELLED));
        assert_eq!(data.message, "Request cancelled");
    }

    #[test]
    fn test_error_fatal() {
        let missing = ConfigurationError::MissingCredential {
            key: "HF_TOKEN".to_string(),
        };
        assert!(McpError::from(missing).is_fatal());
        assert!(McpError::TransportError("closed".to_string()).is_fatal());
        assert!(!McpError::Cancelled.is_fatal());
        assert!(!McpError::from(DispatchError::unknown_tool("x")).is_fatal());
    }

    #[test]
    fn test_configuration_message_passes_through() {
        let err = McpError::from(ConfigurationError::MissingCredential {
            key: "HF_TOKEN".to_string(),
        });
        assert_eq!(err.to_string(), "Environment variable HF_TOKEN is not set");
    }
}

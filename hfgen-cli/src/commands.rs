use hfgen_core::{
    ConfigurationError, DispatchError, GatewayError, JsonObject, SchemaError, ServerConfig,
};
use hfgen_mcp::{McpError, McpServer};
use hfgen_tools::{Dispatcher, HuggingFaceGateway, RegistryError, ToolRegistry, standard};
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Mcp(#[from] McpError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Gateway setup failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Invalid --args: {0}")]
    InvalidArguments(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub async fn run_serve() -> Result<(), CliError> {
    McpServer::from_env()?.serve_stdio().await?;
    Ok(())
}

/// Print the catalog; needs no credential.
pub fn run_tools(out: &mut impl Write) -> Result<(), CliError> {
    let descriptors = standard::descriptors()?;
    writeln!(out, "{}", serde_json::to_string_pretty(&descriptors)?)?;
    Ok(())
}

pub async fn run_call(tool: &str, args: &str, out: &mut impl Write) -> Result<(), CliError> {
    let arguments = parse_arguments(args)?;

    let config = ServerConfig::from_env()?;
    let gateway = HuggingFaceGateway::new(&config)?;
    let registry = ToolRegistry::standard(Arc::new(gateway))?;

    call_with(&Dispatcher::new(Arc::new(registry)), tool, &arguments, out).await
}

async fn call_with(
    dispatcher: &Dispatcher,
    tool: &str,
    arguments: &JsonObject,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for block in dispatcher.call_tool(tool, arguments).await? {
        writeln!(out, "{}", block.as_text())?;
    }
    Ok(())
}

fn parse_arguments(raw: &str) -> Result<JsonObject, CliError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CliError::InvalidArguments(format!(
            "expected a JSON object, got {}",
            other
        ))),
        Err(e) => Err(CliError::InvalidArguments(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hfgen_testing::MockGateway;

    fn dispatcher(gateway: &MockGateway) -> Dispatcher {
        let registry = ToolRegistry::standard(Arc::new(gateway.clone())).unwrap();
        Dispatcher::new(Arc::new(registry))
    }

    #[test]
    fn test_tools_prints_catalog() {
        let mut out = Vec::new();
        run_tools(&mut out).unwrap();

        let catalog: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(catalog[0]["name"], "text_generation");
        assert_eq!(catalog[0]["inputSchema"]["required"], serde_json::json!(["prompt"]));
    }

    #[test]
    fn test_parse_arguments() {
        let args = parse_arguments(r#"{"prompt": "Hello", "max_tokens": 5}"#).unwrap();
        assert_eq!(args.len(), 2);

        assert!(matches!(
            parse_arguments("[1, 2]"),
            Err(CliError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_arguments("{not json"),
            Err(CliError::InvalidArguments(_))
        ));
    }

    #[tokio::test]
    async fn test_call_prints_generated_text() {
        let gateway = MockGateway::new().with_response("Hello", "Hi there");
        let mut out = Vec::new();

        call_with(
            &dispatcher(&gateway),
            "text_generation",
            &parse_arguments(r#"{"prompt": "Hello"}"#).unwrap(),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Hi there\n");
    }

    #[tokio::test]
    async fn test_call_unknown_tool_fails() {
        let gateway = MockGateway::new();
        let mut out = Vec::new();

        let err = call_with(&dispatcher(&gateway), "nonexistent_tool", &JsonObject::new(), &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Unknown tool: nonexistent_tool");
        assert!(out.is_empty());
    }
}

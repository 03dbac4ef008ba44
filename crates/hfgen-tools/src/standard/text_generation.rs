//! The `text_generation` tool: a prompt in, generated text out.

use async_trait::async_trait;
use hfgen_core::{
    ArgumentError, Arguments, ExecutionResult, FailureReason, GenerationRequest,
    InferenceGateway, PropertySchema, SchemaError, SchemaNode, Tool, ToolDescriptor,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const TOOL_NAME: &str = "text_generation";
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
pub const DEFAULT_MAX_TOKENS: i64 = 100;

/// Descriptor advertised for `text_generation`.
pub fn descriptor() -> Result<ToolDescriptor, SchemaError> {
    let schema = SchemaNode::object()
        .property(
            "prompt",
            PropertySchema::string().with_description("Text prompt for generation"),
        )
        .property(
            "model",
            PropertySchema::string()
                .with_default(DEFAULT_MODEL)
                .with_description("Model name on HuggingFace"),
        )
        .property(
            "max_tokens",
            PropertySchema::number()
                .with_default(DEFAULT_MAX_TOKENS)
                .with_description("Maximum number of tokens to generate"),
        )
        .require("prompt");

    ToolDescriptor::new(TOOL_NAME, "Generate text using HuggingFace models", schema)
}

/// Generates text through an [`InferenceGateway`].
///
/// Provider failures, and token budgets no provider would accept, are returned
/// as a failed [`ExecutionResult`] so the caller sees them as text content
/// rather than a protocol error.
pub struct TextGenerationTool {
    descriptor: ToolDescriptor,
    gateway: Arc<dyn InferenceGateway>,
}

impl TextGenerationTool {
    pub fn new(gateway: Arc<dyn InferenceGateway>) -> Result<Self, SchemaError> {
        Ok(Self {
            descriptor: descriptor()?,
            gateway,
        })
    }
}

#[async_trait]
impl Tool for TextGenerationTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn call(&self, arguments: Arguments) -> Result<ExecutionResult, ArgumentError> {
        let prompt = arguments.require_str("prompt")?;
        let model = arguments.require_str("model")?;
        let requested = arguments.require_integer("max_tokens")?;
        let max_tokens = match token_budget(requested) {
            Ok(max_tokens) => max_tokens,
            Err(reason) => {
                warn!(max_tokens = requested, "Token budget out of range");
                return Ok(ExecutionResult::failed(reason));
            }
        };

        let request = GenerationRequest::new(prompt, model, max_tokens);
        debug!(
            model = %request.model,
            max_tokens,
            prompt_chars = request.prompt.chars().count(),
            "Requesting text generation"
        );

        match self.gateway.generate_text(&request).await {
            Ok(text) => {
                info!(
                    model = %request.model,
                    output_chars = text.chars().count(),
                    "Text generation succeeded"
                );
                Ok(ExecutionResult::success(text))
            }
            Err(e) => {
                error!(
                    model = %request.model,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Text generation failed"
                );
                Ok(ExecutionResult::failed(e.to_failure_reason()))
            }
        }
    }
}

fn token_budget(value: i64) -> Result<u32, FailureReason> {
    u32::try_from(value)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| FailureReason::GenerationFailed {
            message: format!("max_tokens must be between 1 and {}, got {}", u32::MAX, value),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hfgen_core::{ArgValue, GatewayError};
    use hfgen_testing::MockGateway;

    fn args(pairs: &[(&str, ArgValue)]) -> Arguments {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn resolved(raw: serde_json::Value) -> Arguments {
        descriptor()
            .unwrap()
            .input_schema()
            .resolve(raw.as_object().unwrap())
            .unwrap()
    }

    #[test]
    fn test_descriptor_shape() {
        let descriptor = descriptor().unwrap();
        let json = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(json["name"], "text_generation");
        assert_eq!(json["description"], "Generate text using HuggingFace models");
        assert_eq!(json["inputSchema"]["type"], "object");
        assert_eq!(json["inputSchema"]["required"], serde_json::json!(["prompt"]));
        assert_eq!(
            json["inputSchema"]["properties"]["model"]["default"],
            DEFAULT_MODEL
        );
        assert_eq!(json["inputSchema"]["properties"]["max_tokens"]["default"], 100);
        assert_eq!(json["inputSchema"]["properties"]["max_tokens"]["type"], "number");
    }

    #[tokio::test]
    async fn test_forwards_explicit_arguments() {
        let gateway = MockGateway::new().with_default_response("Once upon a time");
        let tool = TextGenerationTool::new(Arc::new(gateway.clone())).unwrap();

        let result = tool
            .call(resolved(serde_json::json!({
                "prompt": "Tell me a story",
                "model": "gpt2",
                "max_tokens": "50"
            })))
            .await
            .unwrap();

        assert_eq!(result, ExecutionResult::success("Once upon a time"));
        assert_eq!(
            gateway.last_request().unwrap(),
            GenerationRequest::new("Tell me a story", "gpt2", 50)
        );
    }

    #[tokio::test]
    async fn test_gateway_failure_becomes_failed_result() {
        let gateway = MockGateway::new().with_default_failure(GatewayError::Provider {
            status: 503,
            message: "Model is currently loading".to_string(),
        });
        let tool = TextGenerationTool::new(Arc::new(gateway)).unwrap();

        let result = tool.call(resolved(serde_json::json!({"prompt": "Hi"}))).await.unwrap();

        let message = result.failure_reason().unwrap().message();
        assert!(message.starts_with("Generation error: "));
        assert!(message.contains("Model is currently loading"));
    }

    #[tokio::test]
    async fn test_out_of_range_max_tokens_is_failed_result() {
        let gateway = MockGateway::new();
        let tool = TextGenerationTool::new(Arc::new(gateway.clone())).unwrap();

        for bad in [0_i64, -5, i64::from(u32::MAX) + 1] {
            let result = tool
                .call(args(&[
                    ("prompt", ArgValue::from("Hi")),
                    ("model", ArgValue::from("gpt2")),
                    ("max_tokens", ArgValue::from(bad)),
                ]))
                .await
                .unwrap();

            let message = result.failure_reason().unwrap().message();
            assert!(message.starts_with("Generation error: "), "{}", message);
            assert!(message.contains(&bad.to_string()), "{}", message);
        }
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_forwarded() {
        let gateway = MockGateway::new();
        let tool = TextGenerationTool::new(Arc::new(gateway.clone())).unwrap();

        let result = tool.call(resolved(serde_json::json!({"prompt": ""}))).await.unwrap();

        assert!(result.is_success());
        assert_eq!(gateway.last_request().unwrap().prompt, "");
    }
}

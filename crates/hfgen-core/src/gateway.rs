//! Inference gateway contract.
//!
//! The gateway is the one place a tool call leaves the process. Implementations
//! return the generated text or a [`GatewayError`]; they never panic on provider
//! failures, so the dispatcher can report them to the caller as content.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::GatewayError;

/// Parameters for a single text generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: String,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            max_tokens,
        }
    }
}

/// Remote text generation provider.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Generate a completion for `request.prompt` with `request.model`.
    async fn generate_text(&self, request: &GenerationRequest) -> Result<String, GatewayError>;
}

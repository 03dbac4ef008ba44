//! # HuggingFace Inference Gateway
//!
//! Calls the hosted text-generation task:
//!
//! ```text
//! POST {endpoint}/models/{model}
//! Authorization: Bearer {HF_TOKEN}
//!
//! {"inputs": "...", "parameters": {"max_new_tokens": 100, "return_full_text": false}}
//! ```
//!
//! The provider answers with `[{"generated_text": "..."}]` (or a bare object
//! for some backends). Error bodies look like `{"error": "..."}`.
//!
//! Model ids are caller input: each `/`-separated part is pushed as its own
//! percent-encoded path segment, and `.`/`..`/empty parts are refused, so a
//! model id can never leave `{endpoint}/models/`.

use async_trait::async_trait;
use hfgen_core::{GatewayError, GenerationRequest, InferenceGateway, SecretString, ServerConfig};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Longest provider error body quoted back to the caller.
const MAX_ERROR_CHARS: usize = 512;

#[derive(Debug, Serialize)]
struct TextGenerationPayload<'a> {
    inputs: &'a str,
    parameters: TextGenerationParameters,
}

#[derive(Debug, Serialize)]
struct TextGenerationParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextGenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

/// [`InferenceGateway`] backed by the HuggingFace inference API.
#[derive(Debug, Clone)]
pub struct HuggingFaceGateway {
    http: Client,
    endpoint: Url,
    token: SecretString,
    timeout: Option<Duration>,
}

impl HuggingFaceGateway {
    /// Create a gateway from validated server configuration.
    pub fn new(config: &ServerConfig) -> Result<Self, GatewayError> {
        let mut builder =
            Client::builder().user_agent(format!("hfgen/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let endpoint = Url::parse(&config.inference_endpoint).map_err(|e| {
            GatewayError::Network(format!(
                "Invalid inference endpoint '{}': {}",
                config.inference_endpoint, e
            ))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(GatewayError::Network(format!(
                "Inference endpoint '{}' cannot carry a model path",
                config.inference_endpoint
            )));
        }

        Ok(Self {
            http,
            endpoint,
            token: config.hf_token.clone(),
            timeout: config.request_timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn model_url(&self, model: &str) -> Result<Url, GatewayError> {
        if model
            .split('/')
            .any(|part| part.is_empty() || part == "." || part == "..")
        {
            return Err(GatewayError::InvalidModel(model.to_string()));
        }

        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::InvalidModel(model.to_string()))?
            .pop_if_empty()
            .push("models")
            .extend(model.split('/'));
        Ok(url)
    }
}

#[async_trait]
impl InferenceGateway for HuggingFaceGateway {
    async fn generate_text(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let url = self.model_url(&request.model)?;
        let payload = TextGenerationPayload {
            inputs: &request.prompt,
            parameters: TextGenerationParameters {
                max_new_tokens: request.max_tokens,
                return_full_text: false,
            },
        };

        debug!(url = %url, max_new_tokens = request.max_tokens, "Sending inference request");

        let response = self
            .http
            .post(url.clone())
            .bearer_auth(self.token.expose_as_str())
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Inference provider returned an error");
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                message: provider_message(status, &body),
            });
        }

        let parsed: TextGenerationResponse = serde_json::from_str(&body).map_err(|e| {
            GatewayError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        match parsed {
            TextGenerationResponse::Single(generated) => Ok(generated.generated_text),
            TextGenerationResponse::Batch(batch) => batch
                .into_iter()
                .next()
                .map(|generated| generated.generated_text)
                .ok_or_else(|| {
                    GatewayError::InvalidResponse("provider returned no generations".to_string())
                }),
        }
    }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(error.to_string())
    } else {
        GatewayError::Network(error.to_string())
    }
}

/// Pull the provider's own message out of an error body.
fn provider_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| match value.get("error") {
            Some(Value::String(message)) => Some(message.clone()),
            Some(Value::Array(messages)) => Some(
                messages
                    .iter()
                    .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        });

    let message = match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        None => body.trim().to_string(),
    };

    message.chars().take(MAX_ERROR_CHARS).collect()
}

//! # Environment-Based Configuration
//!
//! Server configuration is loaded once at startup and passed by reference to
//! the gateway and the protocol server. A missing credential fails the load
//! immediately, before any request is served.
//!
//! ## Environment Variables
//!
//! - `HF_TOKEN` - Bearer credential for the inference API (required)
//! - `HF_INFERENCE_ENDPOINT` - Inference API base URL
//!   (default: `https://router.huggingface.co/hf-inference`)
//! - `HFGEN_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds (default: none)
//! - `HFGEN_SERVER_NAME` - Name advertised during the MCP handshake
//!   (default: `huggingface-mcp`)

use std::{env, time::Duration};

use crate::secret::SecretString;

pub const HF_TOKEN_VAR: &str = "HF_TOKEN";
pub const HF_INFERENCE_ENDPOINT_VAR: &str = "HF_INFERENCE_ENDPOINT";
pub const REQUEST_TIMEOUT_VAR: &str = "HFGEN_REQUEST_TIMEOUT_SECS";
pub const SERVER_NAME_VAR: &str = "HFGEN_SERVER_NAME";

pub const DEFAULT_INFERENCE_ENDPOINT: &str = "https://router.huggingface.co/hf-inference";
pub const DEFAULT_SERVER_NAME: &str = "huggingface-mcp";

const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Error type for configuration loading
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Environment variable {key} is not set")]
    MissingCredential { key: String },

    #[error("Invalid environment variable '{key}': {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub hf_token: SecretString,
    pub inference_endpoint: String,
    pub request_timeout: Option<Duration>,
    pub server_name: String,
}

impl ServerConfig {
    /// Load and validate configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingCredential`] when `HF_TOKEN` is
    /// unset or blank, and other variants for malformed optional variables.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        ServerConfigBuilder::from_env()?.build()
    }

    /// Load from an arbitrary key/value source.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        ServerConfigBuilder::from_source(lookup)?.build()
    }

    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }
}

/// Builder for [`ServerConfig`] with environment variable support
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    hf_token: Option<SecretString>,
    inference_endpoint: String,
    request_timeout_secs: Option<u64>,
    server_name: String,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self {
            hf_token: None,
            inference_endpoint: DEFAULT_INFERENCE_ENDPOINT.to_string(),
            request_timeout_secs: None,
            server_name: DEFAULT_SERVER_NAME.to_string(),
        }
    }
}

impl ServerConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::default();

        if let Some(token) = lookup(HF_TOKEN_VAR) {
            builder = builder.hf_token(token);
        }
        if let Some(endpoint) = lookup(HF_INFERENCE_ENDPOINT_VAR) {
            builder = builder.inference_endpoint(endpoint);
        }
        if let Some(timeout) = parse_u64(REQUEST_TIMEOUT_VAR, lookup(REQUEST_TIMEOUT_VAR))? {
            builder = builder.request_timeout_secs(timeout);
        }
        if let Some(name) = lookup(SERVER_NAME_VAR) {
            builder = builder.server_name(name);
        }

        Ok(builder)
    }

    pub fn hf_token(mut self, token: impl Into<String>) -> Self {
        self.hf_token = Some(SecretString::from_string(token.into()));
        self
    }

    pub fn inference_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.inference_endpoint = endpoint.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ServerConfig, ConfigurationError> {
        let hf_token = match self.hf_token {
            Some(token) if !token.expose_as_str().trim().is_empty() => token,
            _ => {
                let error = ConfigurationError::MissingCredential {
                    key: HF_TOKEN_VAR.to_string(),
                };
                tracing::error!(error = %error, "Server configuration rejected");
                return Err(error);
            }
        };

        let endpoint = self.inference_endpoint.trim().trim_end_matches('/').to_string();
        let parsed = url::Url::parse(&endpoint).map_err(|e| ConfigurationError::InvalidEnvVar {
            key: HF_INFERENCE_ENDPOINT_VAR.to_string(),
            message: format!("invalid URL '{endpoint}': {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigurationError::InvalidEnvVar {
                key: HF_INFERENCE_ENDPOINT_VAR.to_string(),
                message: format!("unsupported scheme '{}', expected http or https", parsed.scheme()),
            });
        }

        if let Some(secs) = self.request_timeout_secs {
            if secs == 0 {
                return Err(ConfigurationError::ValidationError(
                    "request_timeout_secs must be greater than 0".to_string(),
                ));
            }
            if secs > MAX_REQUEST_TIMEOUT_SECS {
                return Err(ConfigurationError::ValidationError(format!(
                    "request_timeout_secs must be <= {MAX_REQUEST_TIMEOUT_SECS}"
                )));
            }
        }

        if self.server_name.trim().is_empty() {
            return Err(ConfigurationError::ValidationError(
                "server_name cannot be empty".to_string(),
            ));
        }

        Ok(ServerConfig {
            hf_token,
            inference_endpoint: endpoint,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            server_name: self.server_name,
        })
    }
}

fn parse_u64(key: &str, value: Option<String>) -> Result<Option<u64>, ConfigurationError> {
    match value {
        Some(val) => val
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ConfigurationError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid u64 value '{val}': {e}"),
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_token_fails() {
        let err = ServerConfig::from_source(source(&[])).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingCredential {
                key: "HF_TOKEN".to_string()
            }
        );
        assert!(err.to_string().contains("HF_TOKEN"));
    }

    #[test]
    fn test_blank_token_fails() {
        let err = ServerConfig::from_source(source(&[("HF_TOKEN", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingCredential { .. }));
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_source(source(&[("HF_TOKEN", "hf_test")])).unwrap();
        assert_eq!(config.hf_token.expose_as_str(), "hf_test");
        assert_eq!(config.inference_endpoint, DEFAULT_INFERENCE_ENDPOINT);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.server_name, "huggingface-mcp");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_source(source(&[
            ("HF_TOKEN", "hf_test"),
            ("HF_INFERENCE_ENDPOINT", "http://localhost:8080/"),
            ("HFGEN_REQUEST_TIMEOUT_SECS", "45"),
            ("HFGEN_SERVER_NAME", "custom-hf"),
        ]))
        .unwrap();

        assert_eq!(config.inference_endpoint, "http://localhost:8080");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.server_name, "custom-hf");
    }

    #[test]
    fn test_invalid_timeout_value() {
        let err = ServerConfig::from_source(source(&[
            ("HF_TOKEN", "hf_test"),
            ("HFGEN_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidEnvVar { ref key, .. } if key == "HFGEN_REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn test_builder_validation_timeout() {
        let result = ServerConfig::builder()
            .hf_token("hf_test")
            .request_timeout_secs(0)
            .build();
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("request_timeout_secs must be greater than 0")
        );

        let result = ServerConfig::builder()
            .hf_token("hf_test")
            .request_timeout_secs(601)
            .build();
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("request_timeout_secs must be <= 600")
        );
    }

    #[test]
    fn test_builder_validation_endpoint() {
        let result = ServerConfig::builder()
            .hf_token("hf_test")
            .inference_endpoint("not a url")
            .build();
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidEnvVar { .. })
        ));

        let result = ServerConfig::builder()
            .hf_token("hf_test")
            .inference_endpoint("ftp://example.com")
            .build();
        assert!(result.unwrap_err().to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_config_debug_does_not_leak_token() {
        let config = ServerConfig::builder().hf_token("hf_secret").build().unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hf_secret"));
    }
}

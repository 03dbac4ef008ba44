//! # Mock Inference Gateway
//!
//! A gateway that answers from a table of canned completions keyed by prompt,
//! and records every request so tests can assert what reached the provider.

use async_trait::async_trait;
use hfgen_core::{GatewayError, GenerationRequest, InferenceGateway};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Behavior {
    Respond(String),
    Fail(GatewayError),
    Hang,
}

/// A mock gateway that returns predefined completions based on the prompt
#[derive(Debug, Clone, Default)]
pub struct MockGateway {
    behaviors: HashMap<String, Behavior>,
    default_behavior: Option<Behavior>,
    call_history: Arc<Mutex<Vec<GenerationRequest>>>,
    in_flight: Arc<AtomicUsize>,
}

/// Counts a request as in flight until its future completes or is dropped.
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a completion for a specific prompt
    pub fn with_response(mut self, prompt: impl Into<String>, completion: impl Into<String>) -> Self {
        self.behaviors
            .insert(prompt.into(), Behavior::Respond(completion.into()));
        self
    }

    /// Add a failure for a specific prompt
    pub fn with_failure(mut self, prompt: impl Into<String>, error: GatewayError) -> Self {
        self.behaviors.insert(prompt.into(), Behavior::Fail(error));
        self
    }

    /// Set a completion for any unmatched prompt
    pub fn with_default_response(mut self, completion: impl Into<String>) -> Self {
        self.default_behavior = Some(Behavior::Respond(completion.into()));
        self
    }

    /// Fail every unmatched prompt
    pub fn with_default_failure(mut self, error: GatewayError) -> Self {
        self.default_behavior = Some(Behavior::Fail(error));
        self
    }

    /// Never complete unmatched prompts, like a provider that stops answering.
    pub fn with_hang(mut self) -> Self {
        self.default_behavior = Some(Behavior::Hang);
        self
    }

    /// Get the number of requests this gateway has received
    pub fn call_count(&self) -> usize {
        self.lock_history().len()
    }

    /// Requests that have started but neither completed nor been dropped
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Get the requests this gateway has received, oldest first
    pub fn call_history(&self) -> Vec<GenerationRequest> {
        self.lock_history().clone()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.lock_history().last().cloned()
    }

    /// Reset call history
    pub fn reset(&self) {
        self.lock_history().clear();
    }

    fn lock_history(&self) -> std::sync::MutexGuard<'_, Vec<GenerationRequest>> {
        // A panicking test thread must not hide the history from the others.
        self.call_history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl InferenceGateway for MockGateway {
    async fn generate_text(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        self.lock_history().push(request.clone());
        let _in_flight = InFlightGuard::enter(&self.in_flight);

        let behavior = self
            .behaviors
            .get(&request.prompt)
            .or(self.default_behavior.as_ref())
            .cloned();

        match behavior {
            Some(Behavior::Respond(completion)) => Ok(completion),
            Some(Behavior::Fail(error)) => Err(error),
            Some(Behavior::Hang) => std::future::pending().await,
            None => Ok(format!("Mock completion for: {}", request.prompt)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_and_default_responses() {
        let gateway = MockGateway::new()
            .with_response("Hello", "Hi there")
            .with_default_response("fallback");

        tokio_test::block_on(async {
            let hello = GenerationRequest::new("Hello", "model", 10);
            let other = GenerationRequest::new("Other", "model", 10);

            assert_eq!(gateway.generate_text(&hello).await.unwrap(), "Hi there");
            assert_eq!(gateway.generate_text(&other).await.unwrap(), "fallback");
        });

        assert_eq!(gateway.call_count(), 2);
        assert_eq!(gateway.call_history()[0].prompt, "Hello");
    }

    #[test]
    fn test_failures_are_returned() {
        let gateway = MockGateway::new()
            .with_default_failure(GatewayError::Network("connection refused".to_string()));

        let result = tokio_test::block_on(
            gateway.generate_text(&GenerationRequest::new("Hello", "model", 10)),
        );
        assert_eq!(
            result,
            Err(GatewayError::Network("connection refused".to_string()))
        );
    }

    #[test]
    fn test_unconfigured_gateway_echoes_prompt() {
        let gateway = MockGateway::new();
        let result = tokio_test::block_on(
            gateway.generate_text(&GenerationRequest::new("ping", "model", 5)),
        );
        assert_eq!(result.unwrap(), "Mock completion for: ping");

        gateway.reset();
        assert_eq!(gateway.call_count(), 0);
        assert!(gateway.last_request().is_none());
    }

    #[test]
    fn test_dropped_hang_leaves_flight() {
        let gateway = MockGateway::new().with_hang();
        let request = GenerationRequest::new("Hello", "model", 10);

        let mut pending = tokio_test::task::spawn(gateway.generate_text(&request));
        tokio_test::assert_pending!(pending.poll());
        assert_eq!(gateway.in_flight(), 1);

        drop(pending);
        assert_eq!(gateway.in_flight(), 0);
        assert_eq!(gateway.call_count(), 1);
    }

    #[test]
    fn test_clones_share_history() {
        let gateway = MockGateway::new();
        let observer = gateway.clone();

        tokio_test::block_on(gateway.generate_text(&GenerationRequest::new("a", "m", 1))).unwrap();
        assert_eq!(observer.call_count(), 1);
    }
}

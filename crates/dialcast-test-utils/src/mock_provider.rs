// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock text provider for testing without a live LLM API.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use dialcast_core::types::{GenerationRequest, GenerationResponse};
use dialcast_core::{DialcastError, TextProvider};
use tokio::sync::Mutex;

type Scripted = Result<String, (Option<u16>, String)>;

/// A mock text provider that replays a scripted queue of outcomes.
///
/// Outcomes are consumed FIFO; an empty queue yields a default success so
/// tests that do not care about content never stall. Every request is
/// recorded for assertions on models and prompts.
pub struct MockProvider {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create with a queue of successful responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let provider = Self::new();
        {
            let script = provider.script.clone();
            let mut queue = script.try_lock().expect("fresh mock is uncontended");
            queue.extend(responses.into_iter().map(Ok));
        }
        provider
    }

    /// Queue a successful response.
    pub async fn push_response(&self, text: &str) {
        self.script.lock().await.push_back(Ok(text.to_string()));
    }

    /// Queue a failure carrying an HTTP status.
    pub async fn push_failure(&self, status: u16, message: &str) {
        self.script
            .lock()
            .await
            .push_back(Err((Some(status), message.to_string())));
    }

    /// Queue a failure with no structured status, only message text.
    pub async fn push_transport_failure(&self, message: &str) {
        self.script
            .lock()
            .await
            .push_back(Err((None, message.to_string())));
    }

    /// Handle on the recorded requests, in arrival order.
    pub fn requests(&self) -> Arc<Mutex<Vec<GenerationRequest>>> {
        self.requests.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, DialcastError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        match self.script.lock().await.pop_front() {
            Some(Ok(text)) => Ok(GenerationResponse { text, model }),
            Some(Err((status, message))) => Err(DialcastError::Provider {
                message,
                status,
                source: None,
            }),
            None => Ok(GenerationResponse {
                text: "mock response".to_string(),
                model,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(model: &str) -> GenerationRequest {
        GenerationRequest {
            model: model.to_string(),
            prompt: "say hi".to_string(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let response = provider.generate(request("m")).await.unwrap();
        assert_eq!(response.text, "mock response");
        assert_eq!(response.model, "m");
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let provider =
            MockProvider::with_responses(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(provider.generate(request("m")).await.unwrap().text, "first");
        assert_eq!(
            provider.generate(request("m")).await.unwrap().text,
            "second"
        );
        // Queue exhausted; back to the default.
        assert_eq!(
            provider.generate(request("m")).await.unwrap().text,
            "mock response"
        );
    }

    #[tokio::test]
    async fn queued_failure_is_returned() {
        let provider = MockProvider::new();
        provider.push_failure(503, "overloaded").await;
        let err = provider.generate(request("m")).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn transport_failure_has_no_status() {
        let provider = MockProvider::new();
        provider.push_transport_failure("connection reset").await;
        let err = provider.generate(request("m")).await.unwrap_err();
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn requests_are_recorded() {
        let provider = MockProvider::new();
        let requests = provider.requests();
        provider.generate(request("model-a")).await.unwrap();
        provider.generate(request("model-b")).await.unwrap();

        let seen = requests.lock().await;
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].model, "model-a");
        assert_eq!(seen[1].model, "model-b");
    }
}

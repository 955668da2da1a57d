// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini text provider adapter for the Dialcast campaign dialer.
//!
//! This crate implements [`TextProvider`] against the Gemini generateContent
//! API. It is transport only: the command router and content policy decide
//! which model to request and when to escalate.

pub mod client;
pub mod types;

use async_trait::async_trait;
use dialcast_config::model::GeminiConfig;
use dialcast_core::DialcastError;
use dialcast_core::traits::TextProvider;
use dialcast_core::types::{GenerationRequest, GenerationResponse};
use tracing::info;

use crate::client::GeminiClient;

/// Gemini language provider implementing [`TextProvider`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Creates a new Gemini provider from the gemini configuration section.
    ///
    /// # API Key Resolution
    /// 1. `gemini.api_key` if set
    /// 2. `GEMINI_API_KEY` environment variable
    /// 3. Returns error if neither is available
    pub fn new(config: &GeminiConfig) -> Result<Self, DialcastError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = GeminiClient::new(api_key, config.base_url.clone())?;

        info!(
            command_model = config.command_model,
            primary_model = config.primary_model,
            fallback_model = config.fallback_model,
            "Gemini provider initialized"
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, DialcastError> {
        self.client.generate_content(&request).await
    }
}

/// Resolves the Gemini API key from config, falling back to the environment.
pub fn resolve_api_key(config_key: &Option<String>) -> Result<String, DialcastError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("GEMINI_API_KEY").map_err(|_| {
        DialcastError::Config(
            "Gemini API key not found. Set gemini.api_key in config or GEMINI_API_KEY environment variable.".into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn resolve_api_key_from_config() {
        let result = resolve_api_key(&Some("gk-test-123".into()));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "gk-test-123");
    }

    #[test]
    #[serial]
    fn resolve_api_key_empty_config_falls_back_to_env() {
        // SAFETY: test is serialized; no other thread touches the environment.
        unsafe {
            std::env::set_var("GEMINI_API_KEY", "gk-env");
        }

        assert_eq!(resolve_api_key(&Some(String::new())).unwrap(), "gk-env");

        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn resolve_api_key_missing_everywhere_is_a_config_error() {
        // SAFETY: test is serialized; no other thread touches the environment.
        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
        }

        let err = resolve_api_key(&None).unwrap_err();
        assert!(
            err.to_string().contains("API key not found"),
            "got: {err}"
        );
    }

    #[tokio::test]
    async fn provider_generates_through_trait() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Trait-level text."}], "role": "model"},
                "finishReason": "STOP"
            }]
        });

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let config = GeminiConfig {
            api_key: Some("test-key".into()),
            base_url: server.uri(),
            ..GeminiConfig::default()
        };
        let provider = GeminiProvider::new(&config).unwrap();
        assert_eq!(provider.name(), "gemini");

        let response = provider
            .generate(GenerationRequest {
                model: "gemini-2.0-flash".into(),
                prompt: "Say something".into(),
                temperature: Some(0.1),
                max_output_tokens: Some(256),
            })
            .await
            .unwrap();
        assert_eq!(response.text, "Trait-level text.");
    }
}

// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini generateContent API.
//!
//! Provides [`GeminiClient`] which handles request construction, API key
//! authentication, and error-body decoding. The client makes exactly one
//! attempt per request; escalation to a stronger model on overload is the
//! caller's policy, not the transport's.

use std::time::Duration;

use dialcast_core::DialcastError;
use dialcast_core::types::{GenerationRequest, GenerationResponse};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{
    ApiErrorResponse, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    Part,
};

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key, sent as the `x-goog-api-key` header
    /// * `base_url` - API base URL including the version segment
    pub fn new(api_key: String, base_url: String) -> Result<Self, DialcastError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&api_key).map_err(|e| {
                DialcastError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| DialcastError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, base_url })
    }

    /// Sends one generation request and returns the first candidate's text.
    pub async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, DialcastError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
                role: Some("user".to_string()),
            }],
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            }),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DialcastError::Provider {
                message: format!("HTTP request failed: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "generation response received");

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| DialcastError::Provider {
                    message: format!("failed to read response body: {e}"),
                    status: None,
                    source: Some(Box::new(e)),
                })?;
            let parsed: GenerateContentResponse =
                serde_json::from_str(&body).map_err(|e| DialcastError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    status: None,
                    source: Some(Box::new(e)),
                })?;

            let Some(candidate) = parsed.candidates.into_iter().next() else {
                return Err(DialcastError::Provider {
                    message: "response contained no candidates".to_string(),
                    status: None,
                    source: None,
                });
            };
            let text: String = candidate
                .content
                .map(|content| content.parts.into_iter().map(|part| part.text).collect())
                .unwrap_or_default();
            return Ok(GenerationResponse {
                text,
                model: request.model.clone(),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            match api_err.error.status {
                Some(name) => format!("Gemini API error ({name}): {}", api_err.error.message),
                None => format!("Gemini API error: {}", api_err.error.message),
            }
        } else {
            format!("API returned {status}: {body}")
        };
        Err(DialcastError::Provider {
            message,
            status: Some(status.as_u16()),
            source: None,
        })
    }
}

// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The generation policy: primary model first, one retry on a stronger
//! fallback model when the primary looks overloaded.

use std::sync::Arc;

use dialcast_core::types::GenerationRequest;
use dialcast_core::{DialcastError, TextProvider};
use tracing::{info, warn};

/// One generated article.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContent {
    pub topic: String,
    /// Markdown body.
    pub content: String,
    /// Model that produced the content.
    pub model: String,
    /// True when the fallback model produced it.
    pub fell_back: bool,
}

/// Per-topic outcome of a batch generation.
#[derive(Debug)]
pub struct BatchItem {
    pub topic: String,
    pub result: Result<GeneratedContent, DialcastError>,
}

/// Content generation with overload fallback.
///
/// The fallback fires on exactly one condition: the primary attempt failed
/// with an overload signature (HTTP 429 or 503). Every other failure, the
/// fallback's own failures included, propagates as-is. There is never more
/// than one retry.
pub struct ContentPolicy {
    provider: Option<Arc<dyn TextProvider>>,
    primary_model: String,
    fallback_model: String,
}

impl ContentPolicy {
    pub fn new(
        provider: Option<Arc<dyn TextProvider>>,
        primary_model: impl Into<String>,
        fallback_model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            primary_model: primary_model.into(),
            fallback_model: fallback_model.into(),
        }
    }

    /// Generates a long-form article on `topic`.
    pub async fn generate(&self, topic: &str) -> Result<GeneratedContent, DialcastError> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            DialcastError::Config("text provider not configured; set gemini.api_key".to_string())
        })?;

        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DialcastError::Validation(
                "content topic is empty".to_string(),
            ));
        }

        match attempt(provider.as_ref(), &self.primary_model, topic).await {
            Ok(content) => Ok(GeneratedContent {
                topic: topic.to_string(),
                content,
                model: self.primary_model.clone(),
                fell_back: false,
            }),
            Err(err) if is_overload(&err) => {
                warn!(
                    model = %self.primary_model,
                    error = %err,
                    "primary model overloaded; retrying once on fallback"
                );
                let content = attempt(provider.as_ref(), &self.fallback_model, topic).await?;
                info!(model = %self.fallback_model, "fallback model produced content");
                Ok(GeneratedContent {
                    topic: topic.to_string(),
                    content,
                    model: self.fallback_model.clone(),
                    fell_back: true,
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Generates content for several topics, one at a time.
    ///
    /// Failures do not stop the batch; each item carries its own outcome.
    pub async fn generate_batch(&self, topics: &[String]) -> Vec<BatchItem> {
        let mut items = Vec::with_capacity(topics.len());
        for topic in topics {
            let result = self.generate(topic).await;
            if let Err(err) = &result {
                warn!(topic = %topic, error = %err, "content generation failed");
            }
            items.push(BatchItem {
                topic: topic.clone(),
                result,
            });
        }
        items
    }
}

async fn attempt(
    provider: &dyn TextProvider,
    model: &str,
    topic: &str,
) -> Result<String, DialcastError> {
    let request = GenerationRequest {
        model: model.to_string(),
        prompt: content_prompt(topic),
        temperature: Some(0.7),
        max_output_tokens: Some(4096),
    };
    let response = provider.generate(request).await?;

    let text = response.text.trim();
    if text.is_empty() {
        // Transport success with nothing in it still counts as a failure.
        return Err(DialcastError::Parse(format!(
            "model {model} returned empty content"
        )));
    }
    Ok(text.to_string())
}

/// True when the error carries an overload signature.
///
/// The structured status is authoritative when present. Failing that, the
/// error text is scanned for the code, because some transport layers only
/// surface it in the message.
fn is_overload(err: &DialcastError) -> bool {
    if let Some(status) = err.status() {
        return matches!(status, 429 | 503);
    }
    let text = err.to_string();
    text.contains("503") || text.contains("429")
}

fn content_prompt(topic: &str) -> String {
    format!(
        r#"Write a comprehensive, well-structured article about the topic below.

REQUIREMENTS:
- Between 800 and 1500 words
- Markdown formatting with section headers
- Use bullet lists where they help
- Include concrete examples
- Open with a short introduction and close with a summary

TOPIC: {topic}

ARTICLE:"#
    )
}

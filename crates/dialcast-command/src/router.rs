// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM-backed command routing with heuristic fallback.
//!
//! The router asks the text provider to classify a command into a strict
//! JSON shape. Anything short of a fully valid response (transport error,
//! no JSON object, missing fields, unrecognized action) falls back to
//! keyword heuristics. Classification itself never fails.

use std::sync::Arc;

use dialcast_core::phone;
use dialcast_core::types::{CommandAction, CommandIntent, GenerationRequest};
use dialcast_core::{DialcastError, TextProvider};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::classifier::classify_heuristic;

/// Response shape required from the provider. `action`, `message`, and
/// `confidence` are mandatory; a response missing any of them is rejected
/// and classification falls back to heuristics.
#[derive(Debug, Deserialize)]
struct RawIntent {
    action: CommandAction,
    #[serde(default)]
    phone_number: Option<String>,
    message: String,
    confidence: f32,
}

pub struct CommandRouter {
    provider: Option<Arc<dyn TextProvider>>,
    model: String,
    country_code: String,
}

impl CommandRouter {
    pub fn new(
        provider: Option<Arc<dyn TextProvider>>,
        model: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            country_code: country_code.into(),
        }
    }

    /// Classifies a free-text command into a structured intent.
    ///
    /// Uses the provider when one is configured, heuristics otherwise.
    /// Never returns an error.
    pub async fn classify(&self, text: &str) -> CommandIntent {
        let Some(provider) = &self.provider else {
            debug!("no text provider configured; classifying with heuristics");
            return classify_heuristic(text, &self.country_code);
        };

        match self.classify_with_provider(provider.as_ref(), text).await {
            Ok(intent) => intent,
            Err(err) => {
                warn!(error = %err, "provider classification failed; using heuristics");
                classify_heuristic(text, &self.country_code)
            }
        }
    }

    async fn classify_with_provider(
        &self,
        provider: &dyn TextProvider,
        text: &str,
    ) -> Result<CommandIntent, DialcastError> {
        let request = GenerationRequest {
            model: self.model.clone(),
            prompt: classification_prompt(text),
            temperature: Some(0.1),
            max_output_tokens: Some(256),
        };
        let response = provider.generate(request).await?;

        let payload = extract_json(&response.text).ok_or_else(|| {
            DialcastError::Parse("no JSON object in classifier response".to_string())
        })?;
        let raw: RawIntent = serde_json::from_str(payload).map_err(|e| {
            DialcastError::Parse(format!("classifier response did not match schema: {e}"))
        })?;

        // Providers return phones in whatever shape the user typed them.
        let phone_number = raw
            .phone_number
            .map(|p| phone::normalize(&p, &self.country_code))
            .filter(|p| phone::is_valid(p, &self.country_code));

        Ok(CommandIntent {
            action: raw.action,
            phone_number,
            message: raw.message,
            confidence: raw.confidence.clamp(0.0, 1.0),
        })
    }
}

/// Slices the first JSON object out of a model response.
///
/// Markdown fences are stripped first, then everything from the first `{`
/// to the last `}` is taken. Models pad JSON with prose and fences often
/// enough that strict whole-string parsing would throw away good answers.
fn extract_json(text: &str) -> Option<&str> {
    let inner = if let Some(fenced) = text.split("```json").nth(1) {
        fenced.split("```").next().unwrap_or(fenced)
    } else if let Some(fenced) = text.split("```").nth(1) {
        fenced
    } else {
        text
    };

    let start = inner.find('{')?;
    let end = inner.rfind('}')?;
    if end < start {
        return None;
    }
    Some(inner[start..=end].trim())
}

fn classification_prompt(text: &str) -> String {
    format!(
        r#"You are the command interpreter for an outbound calling assistant.
Classify the user's message into exactly one action.

Return a JSON object with exactly these fields:

{{
  "action": "call" | "start_calling" | "upload_contacts" | "get_logs" | "unknown",
  "phone_number": "the phone number mentioned, or null",
  "message": "a short response to show the user",
  "confidence": 0.0 to 1.0
}}

RULES:
- "call": the user wants a single phone number dialed
- "start_calling": the user wants the campaign over the uploaded contacts started
- "upload_contacts": the user wants to provide a contact list
- "get_logs": the user asks for call logs, status, or reports
- "unknown": anything else
- Return ONLY the JSON object, no other text
- Do NOT use markdown code blocks

USER MESSAGE:
{text}

JSON OUTPUT:"#
    )
}

#[cfg(test)]
mod tests {
    use dialcast_test_utils::MockProvider;

    use super::*;

    fn router_with(provider: MockProvider) -> CommandRouter {
        CommandRouter::new(Some(Arc::new(provider)), "gemini-2.0-flash", "1")
    }

    #[test]
    fn extract_json_takes_first_to_last_brace() {
        assert_eq!(
            extract_json(r#"Sure! {"a": {"b": 1}} hope that helps"#),
            Some(r#"{"a": {"b": 1}}"#)
        );
        assert_eq!(extract_json("no braces here"), None);
        assert_eq!(extract_json("} reversed {"), None);
    }

    #[test]
    fn extract_json_strips_fences() {
        let fenced = "```json\n{\"action\": \"call\"}\n```";
        assert_eq!(extract_json(fenced), Some("{\"action\": \"call\"}"));

        let bare_fence = "```\n{\"action\": \"call\"}\n```";
        assert_eq!(extract_json(bare_fence), Some("{\"action\": \"call\"}"));
    }

    #[tokio::test]
    async fn valid_provider_response_is_used() {
        let provider = MockProvider::new();
        provider
            .push_response(
                r#"{"action": "start_calling", "phone_number": null, "message": "Starting now", "confidence": 0.95}"#,
            )
            .await;

        let intent = router_with(provider).classify("kick off the campaign").await;
        assert_eq!(intent.action, CommandAction::StartCalling);
        assert_eq!(intent.message, "Starting now");
        assert_eq!(intent.confidence, 0.95);
    }

    #[tokio::test]
    async fn provider_phone_number_is_normalized() {
        let provider = MockProvider::new();
        provider
            .push_response(
                r#"{"action": "call", "phone_number": "(800) 123-4567", "message": "Calling", "confidence": 0.9}"#,
            )
            .await;

        let intent = router_with(provider).classify("ring them").await;
        assert_eq!(intent.phone_number.as_deref(), Some("+18001234567"));
    }

    #[tokio::test]
    async fn out_of_range_confidence_is_clamped() {
        let provider = MockProvider::new();
        provider
            .push_response(
                r#"{"action": "get_logs", "message": "Here are the logs", "confidence": 1.7}"#,
            )
            .await;

        let intent = router_with(provider).classify("logs please").await;
        assert_eq!(intent.confidence, 1.0);
    }

    #[tokio::test]
    async fn fenced_response_with_prose_still_parses() {
        let provider = MockProvider::new();
        provider
            .push_response(
                "Here you go:\n```json\n{\"action\": \"get_logs\", \"message\": \"Logs\", \"confidence\": 0.8}\n```",
            )
            .await;

        let intent = router_with(provider).classify("show logs").await;
        assert_eq!(intent.action, CommandAction::GetLogs);
    }

    #[tokio::test]
    async fn missing_required_field_falls_back_to_heuristics() {
        let provider = MockProvider::new();
        // No "message" field; schema requires it.
        provider
            .push_response(r#"{"action": "call", "confidence": 0.9}"#)
            .await;

        let intent = router_with(provider).classify("please start calling").await;
        // Heuristic answer, not the provider's.
        assert_eq!(intent.action, CommandAction::StartCalling);
        assert_eq!(intent.confidence, 0.9);
    }

    #[tokio::test]
    async fn unrecognized_action_falls_back_to_heuristics() {
        let provider = MockProvider::new();
        provider
            .push_response(r#"{"action": "dance", "message": "??", "confidence": 0.5}"#)
            .await;

        let intent = router_with(provider).classify("show me the logs").await;
        assert_eq!(intent.action, CommandAction::GetLogs);
    }

    #[tokio::test]
    async fn provider_error_falls_back_to_heuristics() {
        let provider = MockProvider::new();
        provider.push_failure(503, "model overloaded").await;

        let intent = router_with(provider).classify("call +18001234567").await;
        assert_eq!(intent.action, CommandAction::Call);
        assert_eq!(intent.phone_number.as_deref(), Some("+18001234567"));
        assert_eq!(intent.confidence, 0.8);
    }

    #[tokio::test]
    async fn no_provider_uses_heuristics() {
        let router = CommandRouter::new(None, "gemini-2.0-flash", "1");
        let intent = router.classify("call +18001234567").await;
        assert_eq!(intent.action, CommandAction::Call);
        assert_eq!(intent.confidence, 0.8);
    }

    #[tokio::test]
    async fn invalid_provider_phone_is_dropped() {
        let provider = MockProvider::new();
        provider
            .push_response(
                r#"{"action": "call", "phone_number": "not-a-number", "message": "Calling", "confidence": 0.9}"#,
            )
            .await;

        let intent = router_with(provider).classify("ring them").await;
        assert_eq!(intent.action, CommandAction::Call);
        assert!(intent.phone_number.is_none());
    }
}

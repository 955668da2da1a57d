// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini generateContent API request/response types.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// Request body for `POST /models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; a single user turn for one-shot prompts.
    pub contents: Vec<Content>,
    /// Sampling parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Text fragments making up the turn.
    pub parts: Vec<Part>,
    /// Turn author, `user` or `model`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A text fragment within a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Sampling parameters for content generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

// --- Response types ---

/// Response body for a successful generateContent call.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates; empty when the prompt was blocked.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated turn; absent when generation stopped before any output.
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped (`STOP`, `MAX_TOKENS`, `SAFETY`, ...).
    #[serde(default)]
    pub finish_reason: Option<String>,
}

// --- Error types ---

/// Error body returned by the Gemini API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorDetail,
}

/// Error detail within an API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Numeric code mirroring the HTTP status.
    pub code: Option<u16>,
    /// Human-readable error message.
    pub message: String,
    /// Canonical status name (e.g. `UNAVAILABLE`, `RESOURCE_EXHAUSTED`).
    pub status: Option<String>,
}

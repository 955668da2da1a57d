// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text provider trait for LLM integrations (Gemini, etc.).

use async_trait::async_trait;

use crate::error::DialcastError;
use crate::types::{GenerationRequest, GenerationResponse};

/// Adapter for single-shot text generation backends.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Short identifier for logs ("gemini", "mock").
    fn name(&self) -> &str;

    /// Sends a generation request and returns the full response.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, DialcastError>;
}

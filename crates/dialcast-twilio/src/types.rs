// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Twilio Voice API response types.

use serde::Deserialize;

// --- Call resource types ---

/// Subset of the call resource returned by `POST .../Calls.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CallResource {
    /// Call identifier assigned by Twilio (`CA...`), echoed back later in
    /// status callbacks as `CallSid`.
    pub sid: String,
    /// Initial call status, normally `queued`.
    pub status: String,
    /// Dialed number in E.164 form.
    pub to: String,
}

// --- Error types ---

/// Error body returned by the Twilio REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Twilio error code (e.g. 21211 for an invalid `To` number).
    pub code: Option<u32>,
    /// Human-readable error message.
    pub message: String,
    /// HTTP status the API reports for this error.
    pub status: Option<u16>,
}

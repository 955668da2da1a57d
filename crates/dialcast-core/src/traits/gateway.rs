// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telephony gateway trait for outbound call placement (Twilio, etc.).

use async_trait::async_trait;

use crate::error::DialcastError;
use crate::types::{PlaceCallRequest, PlacedCall};

/// Adapter for telephony gateway integrations.
///
/// Gateways place outbound calls and report lifecycle updates back through
/// the status callback URL carried in each request. Placement is
/// fire-and-forget from the caller's perspective: a successful return only
/// means the gateway accepted the call, not that anyone answered.
#[async_trait]
pub trait TelephonyGateway: Send + Sync {
    /// Short identifier for logs ("twilio", "mock").
    fn name(&self) -> &str;

    /// Places one outbound call and returns the gateway-assigned call id.
    async fn place_call(&self, request: PlaceCallRequest) -> Result<PlacedCall, DialcastError>;
}

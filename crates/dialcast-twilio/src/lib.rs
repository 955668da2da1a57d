// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Twilio telephony gateway adapter for the Dialcast campaign dialer.
//!
//! This crate implements [`TelephonyGateway`] against the Twilio Calls API
//! and renders the TwiML voice instructions the placed calls play back.

pub mod client;
pub mod twiml;
pub mod types;

use async_trait::async_trait;
use dialcast_config::model::TelephonyConfig;
use dialcast_core::DialcastError;
use dialcast_core::traits::TelephonyGateway;
use dialcast_core::types::{PlaceCallRequest, PlacedCall};
use tracing::info;

use crate::client::TwilioClient;

/// Twilio voice gateway implementing [`TelephonyGateway`].
///
/// Credential resolution order: config -> `TWILIO_ACCOUNT_SID` /
/// `TWILIO_AUTH_TOKEN` env vars -> error.
pub struct TwilioGateway {
    client: TwilioClient,
}

impl TwilioGateway {
    /// Creates a new Twilio gateway from the telephony configuration.
    ///
    /// # Credential Resolution
    /// 1. `telephony.account_sid` / `telephony.auth_token` if set
    /// 2. `TWILIO_ACCOUNT_SID` / `TWILIO_AUTH_TOKEN` environment variables
    /// 3. Returns error if either is missing
    pub fn new(config: &TelephonyConfig) -> Result<Self, DialcastError> {
        let credentials = resolve_credentials(config)?;
        let client = TwilioClient::new(
            credentials.account_sid.clone(),
            credentials.auth_token,
            config.base_url.clone(),
        )?;

        info!(account_sid = %credentials.account_sid, "Twilio gateway initialized");

        Ok(Self { client })
    }

    /// Creates a gateway with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: TwilioClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TelephonyGateway for TwilioGateway {
    fn name(&self) -> &str {
        "twilio"
    }

    async fn place_call(&self, request: PlaceCallRequest) -> Result<PlacedCall, DialcastError> {
        self.client.create_call(&request).await
    }
}

/// Resolved Twilio API credentials.
#[derive(Debug, Clone)]
pub struct TwilioCredentials {
    /// Account SID, also the basic-auth username.
    pub account_sid: String,
    /// Auth token paired with the SID.
    pub auth_token: String,
}

/// Resolves Twilio credentials from config, falling back to the environment.
pub fn resolve_credentials(config: &TelephonyConfig) -> Result<TwilioCredentials, DialcastError> {
    let account_sid = resolve_value(&config.account_sid, "TWILIO_ACCOUNT_SID").ok_or_else(|| {
        DialcastError::Config(
            "Twilio account SID not found. Set telephony.account_sid in config or TWILIO_ACCOUNT_SID environment variable.".into(),
        )
    })?;
    let auth_token = resolve_value(&config.auth_token, "TWILIO_AUTH_TOKEN").ok_or_else(|| {
        DialcastError::Config(
            "Twilio auth token not found. Set telephony.auth_token in config or TWILIO_AUTH_TOKEN environment variable.".into(),
        )
    })?;

    Ok(TwilioCredentials {
        account_sid,
        auth_token,
    })
}

fn resolve_value(config_value: &Option<String>, env_var: &str) -> Option<String> {
    if let Some(value) = config_value
        && !value.is_empty()
    {
        return Some(value.clone());
    }
    std::env::var(env_var).ok().filter(|v| !v.is_empty())
}

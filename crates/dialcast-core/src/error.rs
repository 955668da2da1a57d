// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Dialcast campaign dialer.

use thiserror::Error;

/// The primary error type used across all Dialcast crates and core operations.
#[derive(Debug, Error)]
pub enum DialcastError {
    /// Configuration errors (invalid TOML, missing credentials, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Input was rejected before any external call was made.
    #[error("validation error: {0}")]
    Validation(String),

    /// A campaign start was requested while another campaign is in flight.
    #[error("a calling campaign is already in progress")]
    CampaignRunning,

    /// A campaign start was requested with an empty contact registry.
    #[error("no contacts loaded; upload contacts before starting a campaign")]
    NoContacts,

    /// Telephony gateway errors (call placement rejected, API failure).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        /// HTTP status returned by the gateway, when one was received.
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Text generation provider errors (API failure, quota, model overload).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        /// HTTP status returned by the provider, when one was received.
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response body could not be parsed into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl DialcastError {
    /// HTTP status carried by gateway and provider errors, `None` otherwise.
    ///
    /// Fallback policies key off this to distinguish transient upstream
    /// conditions (429, 503) from permanent ones.
    pub fn status(&self) -> Option<u16> {
        match self {
            DialcastError::Gateway { status, .. } | DialcastError::Provider { status, .. } => {
                *status
            }
            _ => None,
        }
    }
}

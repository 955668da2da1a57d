// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Dialcast campaign dialer.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Dialcast configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DialcastConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Campaign pacing and contact ingestion settings.
    #[serde(default)]
    pub campaign: CampaignConfig,

    /// Telephony gateway (Twilio) settings.
    #[serde(default)]
    pub telephony: TelephonyConfig,

    /// Gemini API settings for command classification and content generation.
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "dialcast".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Campaign pacing and contact ingestion configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignConfig {
    /// Default country code prefixed onto ten digit phone numbers.
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Maximum number of contacts kept per upload; the rest are dropped.
    #[serde(default = "default_max_contacts")]
    pub max_contacts: usize,

    /// Seconds to wait between consecutive dial attempts.
    #[serde(default = "default_pacing_secs")]
    pub pacing_secs: u64,

    /// Message spoken to the callee once a call connects.
    #[serde(default = "default_voice_message")]
    pub voice_message: String,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            country_code: default_country_code(),
            max_contacts: default_max_contacts(),
            pacing_secs: default_pacing_secs(),
            voice_message: default_voice_message(),
        }
    }
}

fn default_country_code() -> String {
    "1".to_string()
}

fn default_max_contacts() -> usize {
    100
}

fn default_pacing_secs() -> u64 {
    3
}

fn default_voice_message() -> String {
    "Hello! This is an automated call from Dialcast. Have a great day. Goodbye!".to_string()
}

/// Telephony gateway configuration.
///
/// Credentials may be omitted here and supplied via the `TWILIO_ACCOUNT_SID`
/// and `TWILIO_AUTH_TOKEN` environment variables instead.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelephonyConfig {
    /// Twilio account SID.
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio auth token.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Caller id used as the `From` number on outbound calls.
    #[serde(default)]
    pub from_number: Option<String>,

    /// Gateway API base URL.
    #[serde(default = "default_telephony_base_url")]
    pub base_url: String,
}

impl Default for TelephonyConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            from_number: None,
            base_url: default_telephony_base_url(),
        }
    }
}

fn default_telephony_base_url() -> String {
    "https://api.twilio.com".to_string()
}

/// Gemini API configuration.
///
/// The API key may be omitted here and supplied via the `GEMINI_API_KEY`
/// environment variable instead. Without a key, command classification
/// falls back to keyword heuristics and content generation is disabled.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for command classification.
    #[serde(default = "default_command_model")]
    pub command_model: String,

    /// Model tried first for content generation.
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Stronger model retried once when the primary is overloaded.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Gemini API base URL.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            command_model: default_command_model(),
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            base_url: default_gemini_base_url(),
        }
    }
}

fn default_command_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_primary_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_fallback_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as digit-only country codes and paired gateway credentials.

use crate::diagnostic::ConfigError;
use crate::model::DialcastConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &DialcastConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate log_level is a recognized tracing level
    let level = config.service.log_level.trim();
    if !LOG_LEVELS.contains(&level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level `{level}` is not one of: {}",
                LOG_LEVELS.join(", ")
            ),
        });
    }

    // Validate country_code is a non-empty digit string
    let country_code = config.campaign.country_code.trim();
    if country_code.is_empty() {
        errors.push(ConfigError::Validation {
            message: "campaign.country_code must not be empty".to_string(),
        });
    } else if !country_code.chars().all(|c| c.is_ascii_digit()) {
        errors.push(ConfigError::Validation {
            message: format!("campaign.country_code `{country_code}` must contain only digits"),
        });
    }

    // Validate max_contacts cap
    if config.campaign.max_contacts == 0 {
        errors.push(ConfigError::Validation {
            message: "campaign.max_contacts must be at least 1".to_string(),
        });
    }

    // Validate voice_message is not blank
    if config.campaign.voice_message.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "campaign.voice_message must not be empty".to_string(),
        });
    }

    // Validate telephony credentials come as a pair
    let has_sid = matches!(&config.telephony.account_sid, Some(s) if !s.trim().is_empty());
    let has_token = matches!(&config.telephony.auth_token, Some(s) if !s.trim().is_empty());
    if has_sid != has_token {
        errors.push(ConfigError::Validation {
            message: "telephony.account_sid and telephony.auth_token must be set together"
                .to_string(),
        });
    }

    // A configured gateway without a caller id cannot place calls
    let has_from = matches!(&config.telephony.from_number, Some(s) if !s.trim().is_empty());
    if has_sid && has_token && !has_from {
        errors.push(ConfigError::Validation {
            message: "telephony.from_number is required when gateway credentials are set"
                .to_string(),
        });
    }

    // Validate base URLs are not blank
    if config.telephony.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "telephony.base_url must not be empty".to_string(),
        });
    }
    if config.gemini.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.base_url must not be empty".to_string(),
        });
    }

    // Validate model names are not blank
    for (key, value) in [
        ("gemini.command_model", &config.gemini.command_model),
        ("gemini.primary_model", &config.gemini.primary_model),
        ("gemini.fallback_model", &config.gemini.fallback_model),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

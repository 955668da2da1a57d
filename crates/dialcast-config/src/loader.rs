// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./dialcast.toml` > `~/.config/dialcast/dialcast.toml` > `/etc/dialcast/dialcast.toml`
//! with environment variable overrides via `DIALCAST_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use tracing::debug;

use crate::model::DialcastConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/dialcast/dialcast.toml` (system-wide)
/// 3. `~/.config/dialcast/dialcast.toml` (user XDG config)
/// 4. `./dialcast.toml` (local directory)
/// 5. `DIALCAST_*` environment variables
pub fn load_config() -> Result<DialcastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DialcastConfig::default()))
        .merge(Toml::file("/etc/dialcast/dialcast.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("dialcast/dialcast.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("dialcast.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a specific TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<DialcastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DialcastConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DialcastConfig, figment::Error> {
    debug!(path = %path.display(), "loading configuration from explicit path");
    Figment::new()
        .merge(Serialized::defaults(DialcastConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `DIALCAST_TELEPHONY_ACCOUNT_SID`
/// must map to `telephony.account_sid`, not `telephony.account.sid`.
fn env_provider() -> Env {
    Env::prefixed("DIALCAST_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: DIALCAST_CAMPAIGN_MAX_CONTACTS -> "campaign_max_contacts"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("campaign_", "campaign.", 1)
            .replacen("telephony_", "telephony.", 1)
            .replacen("gemini_", "gemini.", 1);
        mapped.into()
    })
}

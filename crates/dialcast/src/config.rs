// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dialcast config` command implementation.
//!
//! Prints the effective configuration after file and environment layering,
//! with secrets masked.

use dialcast_config::DialcastConfig;
use dialcast_core::DialcastError;

/// Copy of the config that is safe to print: secrets are replaced with a
/// placeholder, identifiers are kept.
fn printable_config(config: &DialcastConfig) -> DialcastConfig {
    let mut printable = config.clone();
    if printable.telephony.auth_token.is_some() {
        printable.telephony.auth_token = Some("<redacted>".to_string());
    }
    if printable.gemini.api_key.is_some() {
        printable.gemini.api_key = Some("<redacted>".to_string());
    }
    printable
}

/// Runs the `dialcast config` command.
pub fn run_config(config: &DialcastConfig) -> Result<(), DialcastError> {
    let rendered = toml::to_string_pretty(&printable_config(config))
        .map_err(|e| DialcastError::Config(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

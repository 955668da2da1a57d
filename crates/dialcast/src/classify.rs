// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dialcast classify` command implementation.
//!
//! Turns a free-text operator command into a structured intent and prints
//! it as JSON. Classification never fails: without a usable provider the
//! heuristic rules answer instead.

use dialcast_config::DialcastConfig;
use dialcast_core::DialcastError;

/// Runs the `dialcast classify` command.
pub async fn run_classify(config: &DialcastConfig, text: &str) -> Result<(), DialcastError> {
    let engine = crate::build_engine(config);
    let intent = engine.classify_command(text).await;
    let rendered = serde_json::to_string_pretty(&intent)
        .map_err(|e| DialcastError::Parse(format!("failed to render intent: {e}")))?;
    println!("{rendered}");
    Ok(())
}

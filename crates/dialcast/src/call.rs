// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dialcast call` command implementation.
//!
//! Ingests a number file, starts the campaign, and follows progress until
//! the dial loop goes idle. Ctrl-C requests a soft stop; the in-flight
//! call and its pacing wait still complete.

use std::path::Path;
use std::time::Duration;

use dialcast_config::DialcastConfig;
use dialcast_core::DialcastError;
use tracing::info;

/// Runs the `dialcast call` command.
pub async fn run_call(
    config: &DialcastConfig,
    numbers_file: &Path,
    callback_base: &str,
) -> Result<(), DialcastError> {
    let engine = crate::build_engine(config);

    let raw_numbers = crate::read_lines(numbers_file)?;
    let summary = engine.ingest_contacts(&raw_numbers).await?;
    println!(
        "Loaded {} contacts ({} rejected, {} over cap)",
        summary.accepted,
        summary.rejected.len(),
        summary.truncated
    );

    // The gateway fetches call instructions from {callback_base}/voice; the
    // operator's callback host must serve this document there.
    println!("Serve at {callback_base}/voice:");
    println!(
        "{}",
        dialcast_twilio::twiml::voice_response(&config.campaign.voice_message)
    );

    let ack = engine.start_campaign(callback_base).await?;
    println!("{}", ack.message);

    let mut progress = tokio::time::interval(Duration::from_secs(2));
    loop {
        tokio::select! {
            _ = progress.tick() => {
                let stats = engine.stats().await;
                if !stats.campaign_running {
                    break;
                }
                info!(
                    initiated = stats.calls_initiated,
                    completed = stats.calls_completed,
                    failed = stats.calls_failed,
                    "campaign progress"
                );
            }
            _ = tokio::signal::ctrl_c() => {
                println!("{}", engine.stop_campaign().await);
            }
        }
    }
    engine.join().await;

    let stats = engine.stats().await;
    println!(
        "Campaign finished: {} initiated, {} completed, {} failed",
        stats.calls_initiated, stats.calls_completed, stats.calls_failed
    );
    Ok(())
}

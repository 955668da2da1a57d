// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialcast - an outbound voice campaign dialer.
//!
//! Binary entry point. Loads and validates configuration, initializes
//! tracing, wires the Twilio gateway and Gemini provider when credentials
//! resolve, and dispatches subcommands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod call;
mod classify;
mod compose;
mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialcast_campaign::CampaignEngine;
use dialcast_config::DialcastConfig;
use dialcast_core::{DialcastError, TelephonyGateway, TextProvider};
use dialcast_gemini::GeminiProvider;
use dialcast_twilio::TwilioGateway;
use tracing::debug;

/// Dialcast - an outbound voice campaign dialer.
#[derive(Parser, Debug)]
#[command(name = "dialcast", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the effective configuration after layering and validation.
    Config,
    /// Classify a free-text operator command into a structured intent.
    Classify {
        /// Command text, e.g. "call +18005551234".
        text: String,
    },
    /// Generate long-form content for one topic or a file of topics.
    Compose {
        /// Topic to write about.
        #[arg(required_unless_present = "topics_file")]
        topic: Option<String>,
        /// File with one topic per line; prints a JSON report.
        #[arg(long, conflicts_with = "topic")]
        topics_file: Option<PathBuf>,
    },
    /// Dial every number in a file as one campaign.
    Call {
        /// File with one phone number per line.
        #[arg(long)]
        numbers_file: PathBuf,
        /// Public base URL the gateway fetches voice instructions from and
        /// posts status callbacks to.
        #[arg(long)]
        callback_base: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match dialcast_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            dialcast_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.service.log_level);

    let result = match cli.command {
        Some(Commands::Config) => config::run_config(&config),
        Some(Commands::Classify { text }) => classify::run_classify(&config, &text).await,
        Some(Commands::Compose { topic, topics_file }) => {
            compose::run_compose(&config, topic.as_deref(), topics_file.as_deref()).await
        }
        Some(Commands::Call {
            numbers_file,
            callback_base,
        }) => call::run_call(&config, &numbers_file, &callback_base).await,
        None => {
            println!("dialcast: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("dialcast: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber from the configured log level.
///
/// `RUST_LOG` overrides the config when set. One directive per workspace
/// crate: a bare `dialcast=` directive would not match the library crates'
/// underscored targets.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let default_filter = [
        "dialcast",
        "dialcast_campaign",
        "dialcast_command",
        "dialcast_config",
        "dialcast_content",
        "dialcast_core",
        "dialcast_gemini",
        "dialcast_twilio",
    ]
    .map(|target| format!("{target}={log_level}"))
    .join(",");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_filter},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Builds a campaign engine with whichever adapters the credentials allow.
///
/// A missing credential degrades the engine rather than failing it: no
/// gateway means campaigns cannot start, no provider means heuristic-only
/// classification and no content generation.
fn build_engine(config: &DialcastConfig) -> CampaignEngine {
    let gateway: Option<Arc<dyn TelephonyGateway>> = match TwilioGateway::new(&config.telephony) {
        Ok(gateway) => Some(Arc::new(gateway)),
        Err(e) => {
            debug!(error = %e, "telephony gateway unavailable");
            None
        }
    };

    let provider: Option<Arc<dyn TextProvider>> = match GeminiProvider::new(&config.gemini) {
        Ok(provider) => Some(Arc::new(provider)),
        Err(e) => {
            debug!(error = %e, "text provider unavailable");
            None
        }
    };

    CampaignEngine::new(config, gateway, provider)
}

/// Reads a line-per-entry input file, trimming and dropping blank lines.
fn read_lines(path: &Path) -> Result<Vec<String>, DialcastError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| DialcastError::Validation(format!("cannot read {}: {e}", path.display())))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config =
            dialcast_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.service.name, "dialcast");
        assert_eq!(config.campaign.pacing_secs, 3);
        assert_eq!(config.campaign.max_contacts, 100);
    }

    #[test]
    fn read_lines_trims_and_drops_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numbers.txt");
        std::fs::write(&path, "8005551234\n\n  +18005556789  \n").unwrap();

        let lines = super::read_lines(&path).unwrap();
        assert_eq!(lines, vec!["8005551234", "+18005556789"]);
    }

    #[test]
    fn read_lines_reports_missing_file() {
        let err =
            super::read_lines(std::path::Path::new("/nonexistent/numbers.txt")).unwrap_err();
        assert!(err.to_string().contains("cannot read"), "got: {err}");
    }
}

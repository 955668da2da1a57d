// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dialcast compose` command implementation.
//!
//! Single-topic mode prints the generated markdown to stdout. Batch mode
//! reads one topic per line and prints a JSON report in which partial
//! success is an expected outcome, not an error.

use std::path::Path;

use dialcast_config::DialcastConfig;
use dialcast_content::BatchItem;
use dialcast_core::DialcastError;
use serde::Serialize;
use tracing::warn;

/// Per-topic entry in the batch report.
#[derive(Debug, Serialize)]
struct BatchReportItem {
    topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fell_back: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Structured output for `--topics-file` mode.
#[derive(Debug, Serialize)]
struct BatchReport {
    /// True when at least one topic produced content.
    success: bool,
    generated: usize,
    failed: usize,
    items: Vec<BatchReportItem>,
}

fn build_report(items: Vec<BatchItem>) -> BatchReport {
    let mut report = BatchReport {
        success: false,
        generated: 0,
        failed: 0,
        items: Vec::with_capacity(items.len()),
    };

    for item in items {
        match item.result {
            Ok(generated) => {
                report.generated += 1;
                report.items.push(BatchReportItem {
                    topic: item.topic,
                    content: Some(generated.content),
                    model: Some(generated.model),
                    fell_back: Some(generated.fell_back),
                    error: None,
                });
            }
            Err(e) => {
                report.failed += 1;
                report.items.push(BatchReportItem {
                    topic: item.topic,
                    content: None,
                    model: None,
                    fell_back: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    report.success = report.generated > 0;
    report
}

/// Runs the `dialcast compose` command.
pub async fn run_compose(
    config: &DialcastConfig,
    topic: Option<&str>,
    topics_file: Option<&Path>,
) -> Result<(), DialcastError> {
    let engine = crate::build_engine(config);

    if let Some(topic) = topic {
        let generated = engine.generate_content(topic).await?;
        if generated.fell_back {
            warn!(model = %generated.model, "primary model overloaded; fallback model answered");
        }
        println!("{}", generated.content);
        return Ok(());
    }

    let Some(path) = topics_file else {
        return Err(DialcastError::Validation(
            "provide a topic or --topics-file".to_string(),
        ));
    };
    let topics = crate::read_lines(path)?;
    if topics.is_empty() {
        return Err(DialcastError::Validation(format!(
            "no topics in {}",
            path.display()
        )));
    }

    let items = engine.generate_batch(&topics).await;
    let report = build_report(items);
    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|e| DialcastError::Parse(format!("failed to render report: {e}")))?;
    println!("{rendered}");
    Ok(())
}

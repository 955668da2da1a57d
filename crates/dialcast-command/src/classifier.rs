// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword heuristics for command classification.
//!
//! This is both the no-credential path and the safety net behind the LLM
//! router. Rules are checked in order; the first hit wins. Confidences are
//! fixed per rule, not computed.

use dialcast_core::phone;
use dialcast_core::types::{CommandAction, CommandIntent};

const HELP_MESSAGE: &str = "I can place a call to a number, start the calling campaign, \
upload contacts, or report call logs. Try: \"call +1 800 555 1234\" or \"start calling\".";

/// Classifies a command using keyword rules alone.
///
/// Rule order matters: "start calling" contains the word "call", so the
/// single-call rule additionally requires a phone number in the text.
pub fn classify_heuristic(text: &str, country_code: &str) -> CommandIntent {
    let lower = text.to_lowercase();

    if lower.contains("call")
        && let Some(number) = phone::extract(text, country_code)
    {
        return CommandIntent {
            action: CommandAction::Call,
            message: format!("Placing a call to {number}"),
            phone_number: Some(number),
            confidence: 0.8,
        };
    }

    if lower.contains("start") && (lower.contains("call") || lower.contains("dial")) {
        return CommandIntent {
            action: CommandAction::StartCalling,
            phone_number: None,
            message: "Starting the calling campaign over all pending contacts".to_string(),
            confidence: 0.9,
        };
    }

    if lower.contains("upload") || lower.contains("import") || lower.contains("add") {
        return CommandIntent {
            action: CommandAction::UploadContacts,
            phone_number: None,
            message: "Ready to receive a contact list".to_string(),
            confidence: 0.7,
        };
    }

    if lower.contains("log") || lower.contains("status") || lower.contains("report") {
        return CommandIntent {
            action: CommandAction::GetLogs,
            phone_number: None,
            message: "Fetching call logs and campaign statistics".to_string(),
            confidence: 0.8,
        };
    }

    CommandIntent {
        action: CommandAction::Unknown,
        phone_number: None,
        message: HELP_MESSAGE.to_string(),
        confidence: 0.3,
    }
}

// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across Dialcast crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// --- Contact types ---

/// Lifecycle state of a single contact within a campaign.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ContactStatus {
    /// Not yet dialed.
    #[default]
    Pending,
    /// Claimed by the dispatcher; a call is being placed.
    Calling,
    /// The gateway reported the call finished normally.
    Completed,
    /// Dispatch failed or the gateway reported a terminal failure.
    Failed,
}

/// A single phone contact loaded into the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Canonical `+<cc><national>` phone number.
    pub phone: String,
    /// Display name, assigned positionally at ingest.
    pub name: String,
    pub status: ContactStatus,
}

impl Contact {
    pub fn new(phone: String, name: String) -> Self {
        Self {
            phone,
            name,
            status: ContactStatus::Pending,
        }
    }
}

// --- Call record types ---

/// Gateway-reported lifecycle state of a placed call.
///
/// The wire form is kebab-case to match what telephony gateways post to
/// status callbacks; the snake_case spellings are accepted on parse for
/// callers that send them instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Initiated,
    Ringing,
    #[strum(to_string = "in-progress", serialize = "in_progress")]
    InProgress,
    Completed,
    Failed,
    Busy,
    #[strum(to_string = "no-answer", serialize = "no_answer")]
    NoAnswer,
    Canceled,
}

impl CallStatus {
    /// True for terminal states that count as a failed call.
    pub fn is_failed(self) -> bool {
        matches!(
            self,
            CallStatus::Failed | CallStatus::Busy | CallStatus::NoAnswer | CallStatus::Canceled
        )
    }
}

/// One attempted call, created at dispatch time and updated by webhooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Locally generated unique id, distinct from the gateway's call id.
    pub id: String,
    /// Index of the owning contact in the registry.
    pub contact_index: usize,
    pub phone: String,
    /// Id assigned by the gateway; absent when dispatch itself failed.
    pub gateway_call_id: Option<String>,
    pub status: CallStatus,
    pub duration_secs: u32,
    /// Error description when dispatch failed.
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl CallRecord {
    /// Record for a call the gateway accepted.
    pub fn initiated(contact_index: usize, phone: String, gateway_call_id: String) -> Self {
        let now = now_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            contact_index,
            phone,
            gateway_call_id: Some(gateway_call_id),
            status: CallStatus::Initiated,
            duration_secs: 0,
            error: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Record for a call the gateway rejected. Carries no gateway id, so
    /// webhooks can never reconcile it; it stays failed.
    pub fn dispatch_failed(contact_index: usize, phone: String, error: String) -> Self {
        let now = now_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            contact_index,
            phone,
            gateway_call_id: None,
            status: CallStatus::Failed,
            duration_secs: 0,
            error: Some(error),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Applies a webhook status update and bumps `updated_at`.
    ///
    /// Duration is only overwritten when the webhook carried one; most
    /// intermediate callbacks do not.
    pub fn apply_update(&mut self, status: CallStatus, duration_secs: Option<u32>) {
        self.status = status;
        if let Some(duration) = duration_secs {
            self.duration_secs = duration;
        }
        self.updated_at = now_rfc3339();
    }
}

/// Current RFC 3339 timestamp. All record timestamps use this form.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

// --- Campaign types ---

/// Acknowledgement returned immediately when a campaign starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartAck {
    pub message: String,
    pub total_contacts: usize,
}

/// Aggregate counters over the current campaign state.
///
/// `calls_completed` counts every record not in a failed state, so freshly
/// initiated calls count as successful until a webhook says otherwise.
/// The counters always satisfy `calls_completed + calls_failed == calls_initiated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStats {
    pub total_contacts: usize,
    pub calls_initiated: usize,
    pub calls_completed: usize,
    pub calls_failed: usize,
    pub campaign_running: bool,
}

// --- Command types ---

/// Action category a user command resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    /// Place a single call to an extracted number.
    Call,
    /// Start the campaign over all pending contacts.
    StartCalling,
    /// Ingest a new contact list.
    UploadContacts,
    /// Report call logs and statistics.
    GetLogs,
    /// Nothing recognized.
    Unknown,
}

/// Structured interpretation of a free-text user command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandIntent {
    pub action: CommandAction,
    /// Canonical phone number, when one was found in the command.
    pub phone_number: Option<String>,
    /// Human-readable response to show the user.
    pub message: String,
    /// Classifier confidence in `[0.0, 1.0]`.
    pub confidence: f32,
}

// --- Gateway types ---

/// Outbound call placement request handed to a telephony gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCallRequest {
    pub to: String,
    pub from: String,
    /// URL the gateway fetches for voice instructions once the call connects.
    pub instruction_url: String,
    /// URL the gateway posts call lifecycle updates to.
    pub status_callback_url: String,
}

/// Successful call placement response from a telephony gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCall {
    /// Gateway-assigned call id, used to reconcile webhook updates.
    pub call_id: String,
}

// --- Provider types ---

/// Single-shot text generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

/// Text generation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub text: String,
    /// Model that actually produced the text.
    pub model: String,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn call_status_display_is_kebab_case() {
        assert_eq!(CallStatus::InProgress.to_string(), "in-progress");
        assert_eq!(CallStatus::NoAnswer.to_string(), "no-answer");
        assert_eq!(CallStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn call_status_parses_both_spellings() {
        assert_eq!(
            CallStatus::from_str("in-progress").unwrap(),
            CallStatus::InProgress
        );
        assert_eq!(
            CallStatus::from_str("in_progress").unwrap(),
            CallStatus::InProgress
        );
        assert_eq!(
            CallStatus::from_str("no_answer").unwrap(),
            CallStatus::NoAnswer
        );
        assert!(CallStatus::from_str("voicemail").is_err());
    }

    #[test]
    fn failed_statuses_partition_correctly() {
        assert!(CallStatus::Failed.is_failed());
        assert!(CallStatus::Busy.is_failed());
        assert!(CallStatus::NoAnswer.is_failed());
        assert!(CallStatus::Canceled.is_failed());

        assert!(!CallStatus::Initiated.is_failed());
        assert!(!CallStatus::Ringing.is_failed());
        assert!(!CallStatus::InProgress.is_failed());
        assert!(!CallStatus::Completed.is_failed());
    }

    #[test]
    fn initiated_record_defaults() {
        let record = CallRecord::initiated(0, "+18005551234".to_string(), "CA123".to_string());
        assert_eq!(record.status, CallStatus::Initiated);
        assert_eq!(record.gateway_call_id.as_deref(), Some("CA123"));
        assert_eq!(record.duration_secs, 0);
        assert!(record.error.is_none());
        assert!(!record.id.is_empty());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn dispatch_failed_record_has_no_gateway_id() {
        let record =
            CallRecord::dispatch_failed(3, "+18005551234".to_string(), "rejected".to_string());
        assert_eq!(record.status, CallStatus::Failed);
        assert!(record.gateway_call_id.is_none());
        assert_eq!(record.error.as_deref(), Some("rejected"));
    }

    #[test]
    fn command_action_serde_is_snake_case() {
        let json = serde_json::to_string(&CommandAction::StartCalling).unwrap();
        assert_eq!(json, "\"start_calling\"");
        let action: CommandAction = serde_json::from_str("\"upload_contacts\"").unwrap();
        assert_eq!(action, CommandAction::UploadContacts);
    }

    #[test]
    fn contact_starts_pending() {
        let contact = Contact::new("+18005551234".to_string(), "Contact 1".to_string());
        assert_eq!(contact.status, ContactStatus::Pending);
    }

    #[test]
    fn call_record_serde_roundtrip() {
        let record = CallRecord::initiated(1, "+18005551234".to_string(), "CA9".to_string());
        let json = serde_json::to_string(&record).unwrap();
        let back: CallRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}

// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook reconciliation: folds gateway status callbacks into the call log.

use std::str::FromStr;

use dialcast_core::types::CallStatus;
use tracing::{debug, info};

use crate::store::CampaignStore;

/// What a webhook delivery resolved to.
///
/// The two no-op outcomes are part of the contract, not error paths:
/// gateways retry callbacks, deliver them out of order, and grow new status
/// values over time, so unknown ids and unknown statuses are dropped
/// without complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A record was found and updated.
    Applied { status: CallStatus },
    /// No record carries this gateway call id.
    UnknownCall,
    /// The status string is not one this system tracks.
    UnknownStatus,
}

/// Applies gateway status callbacks to shared campaign state.
#[derive(Debug, Clone)]
pub struct WebhookReconciler {
    store: CampaignStore,
}

impl WebhookReconciler {
    pub fn new(store: CampaignStore) -> Self {
        Self { store }
    }

    /// Folds one status callback into the call log.
    ///
    /// The status string is parsed first: unrecognized values short-circuit
    /// to [`WebhookOutcome::UnknownStatus`] and touch nothing, not even the
    /// record's `updated_at`.
    pub async fn apply(
        &self,
        call_id: &str,
        raw_status: &str,
        duration_secs: Option<u32>,
    ) -> WebhookOutcome {
        let Ok(status) = CallStatus::from_str(raw_status) else {
            debug!(call_id, raw_status, "ignoring webhook with unrecognized status");
            return WebhookOutcome::UnknownStatus;
        };

        if self.store.apply_status(call_id, status, duration_secs).await {
            info!(call_id, status = %status, "call status updated");
            WebhookOutcome::Applied { status }
        } else {
            debug!(call_id, "ignoring webhook for unknown call id");
            WebhookOutcome::UnknownCall
        }
    }
}

// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared campaign state: the contact registry and the call log.

use std::sync::Arc;

use dialcast_core::types::{CallRecord, CallStatus, CampaignStats, Contact, ContactStatus};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct CampaignState {
    contacts: Vec<Contact>,
    records: Vec<CallRecord>,
}

/// Contact and call record state shared between the dial loop, webhook
/// reconciliation, and stats reporting.
///
/// One mutex guards both collections, so every public operation is atomic:
/// a status update can never observe a record without its owning contact.
#[derive(Debug, Clone, Default)]
pub struct CampaignStore {
    state: Arc<Mutex<CampaignState>>,
}

impl CampaignStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contact registry.
    ///
    /// Existing call records are kept so the call log survives re-uploads;
    /// status mirroring guards against record indexes that no longer resolve.
    pub async fn replace_contacts(&self, contacts: Vec<Contact>) {
        let mut state = self.state.lock().await;
        state.contacts = contacts;
    }

    pub async fn contact_count(&self) -> usize {
        self.state.lock().await.contacts.len()
    }

    pub async fn contacts(&self) -> Vec<Contact> {
        self.state.lock().await.contacts.clone()
    }

    /// Claims the contact at `index` for dialing, marking it as calling.
    ///
    /// Returns `None` when the index is out of range or the contact is not
    /// pending, so a restarted campaign skips contacts already dialed.
    pub async fn claim_pending(&self, index: usize) -> Option<Contact> {
        let mut state = self.state.lock().await;
        let contact = state.contacts.get_mut(index)?;
        if contact.status != ContactStatus::Pending {
            return None;
        }
        contact.status = ContactStatus::Calling;
        Some(contact.clone())
    }

    /// Appends a call record, mirroring dispatch failures onto the contact.
    pub async fn push_record(&self, record: CallRecord) {
        let mut state = self.state.lock().await;
        if record.status.is_failed()
            && let Some(contact) = state.contacts.get_mut(record.contact_index)
        {
            contact.status = ContactStatus::Failed;
        }
        state.records.push(record);
    }

    /// Applies a status update to the record matching this gateway call id.
    ///
    /// Returns false when no record matches. The contact mirror follows the
    /// record: completed maps to completed, failed classes map to failed, and
    /// intermediate statuses keep the contact in the calling state.
    pub async fn apply_status(
        &self,
        gateway_call_id: &str,
        status: CallStatus,
        duration_secs: Option<u32>,
    ) -> bool {
        let mut state = self.state.lock().await;
        let Some(position) = state
            .records
            .iter()
            .position(|r| r.gateway_call_id.as_deref() == Some(gateway_call_id))
        else {
            return false;
        };

        let contact_index = state.records[position].contact_index;
        state.records[position].apply_update(status, duration_secs);

        if let Some(contact) = state.contacts.get_mut(contact_index) {
            contact.status = if status == CallStatus::Completed {
                ContactStatus::Completed
            } else if status.is_failed() {
                ContactStatus::Failed
            } else {
                ContactStatus::Calling
            };
        }
        true
    }

    pub async fn call_log(&self) -> Vec<CallRecord> {
        self.state.lock().await.records.clone()
    }

    /// Aggregate counters over the current state.
    ///
    /// `running` comes from the dispatcher flag; the store itself has no
    /// notion of an in-flight loop.
    pub async fn stats(&self, running: bool) -> CampaignStats {
        let state = self.state.lock().await;
        let failed = state
            .records
            .iter()
            .filter(|r| r.status.is_failed())
            .count();
        CampaignStats {
            total_contacts: state.contacts.len(),
            calls_initiated: state.records.len(),
            calls_completed: state.records.len() - failed,
            calls_failed: failed,
            campaign_running: running,
        }
    }

    /// Drops every contact and record.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.contacts.clear();
        state.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(phone: &str) -> Contact {
        Contact::new(phone.to_string(), "Contact 1".to_string())
    }

    #[tokio::test]
    async fn claim_pending_transitions_to_calling() {
        let store = CampaignStore::new();
        store.replace_contacts(vec![contact("+18005551234")]).await;

        let claimed = store.claim_pending(0).await.unwrap();
        assert_eq!(claimed.status, ContactStatus::Calling);

        // Already claimed; a second claim is refused.
        assert!(store.claim_pending(0).await.is_none());
        // Out of range indexes are refused too.
        assert!(store.claim_pending(5).await.is_none());
    }

    #[tokio::test]
    async fn push_record_mirrors_dispatch_failure() {
        let store = CampaignStore::new();
        store.replace_contacts(vec![contact("+18005551234")]).await;
        store.claim_pending(0).await.unwrap();

        store
            .push_record(CallRecord::dispatch_failed(
                0,
                "+18005551234".to_string(),
                "gateway rejected".to_string(),
            ))
            .await;

        assert_eq!(store.contacts().await[0].status, ContactStatus::Failed);
    }

    #[tokio::test]
    async fn apply_status_updates_record_and_contact() {
        let store = CampaignStore::new();
        store.replace_contacts(vec![contact("+18005551234")]).await;
        store.claim_pending(0).await.unwrap();
        store
            .push_record(CallRecord::initiated(
                0,
                "+18005551234".to_string(),
                "CA1".to_string(),
            ))
            .await;

        assert!(
            store
                .apply_status("CA1", CallStatus::Completed, Some(42))
                .await
        );

        let records = store.call_log().await;
        assert_eq!(records[0].status, CallStatus::Completed);
        assert_eq!(records[0].duration_secs, 42);
        assert_eq!(store.contacts().await[0].status, ContactStatus::Completed);
    }

    #[tokio::test]
    async fn apply_status_intermediate_keeps_contact_calling() {
        let store = CampaignStore::new();
        store.replace_contacts(vec![contact("+18005551234")]).await;
        store.claim_pending(0).await.unwrap();
        store
            .push_record(CallRecord::initiated(
                0,
                "+18005551234".to_string(),
                "CA1".to_string(),
            ))
            .await;

        store.apply_status("CA1", CallStatus::Ringing, None).await;
        assert_eq!(store.contacts().await[0].status, ContactStatus::Calling);

        store.apply_status("CA1", CallStatus::Busy, None).await;
        assert_eq!(store.contacts().await[0].status, ContactStatus::Failed);
    }

    #[tokio::test]
    async fn apply_status_unknown_id_is_refused() {
        let store = CampaignStore::new();
        store.replace_contacts(vec![contact("+18005551234")]).await;
        assert!(
            !store
                .apply_status("CA-missing", CallStatus::Completed, None)
                .await
        );
    }

    #[tokio::test]
    async fn dispatch_failed_records_never_match_webhooks() {
        let store = CampaignStore::new();
        store.replace_contacts(vec![contact("+18005551234")]).await;
        store
            .push_record(CallRecord::dispatch_failed(
                0,
                "+18005551234".to_string(),
                "rejected".to_string(),
            ))
            .await;

        // A failed dispatch has no gateway id; nothing can reconcile it.
        assert!(
            !store
                .apply_status("CA1", CallStatus::Completed, None)
                .await
        );
    }

    #[tokio::test]
    async fn stats_partition_counts_initiated_as_completed() {
        let store = CampaignStore::new();
        store
            .replace_contacts(vec![contact("+18005551234"), contact("+18005555678")])
            .await;
        store
            .push_record(CallRecord::initiated(
                0,
                "+18005551234".to_string(),
                "CA1".to_string(),
            ))
            .await;
        store
            .push_record(CallRecord::dispatch_failed(
                1,
                "+18005555678".to_string(),
                "rejected".to_string(),
            ))
            .await;

        let stats = store.stats(false).await;
        assert_eq!(stats.total_contacts, 2);
        assert_eq!(stats.calls_initiated, 2);
        assert_eq!(stats.calls_completed, 1);
        assert_eq!(stats.calls_failed, 1);
        assert_eq!(
            stats.calls_completed + stats.calls_failed,
            stats.calls_initiated
        );
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let store = CampaignStore::new();
        store.replace_contacts(vec![contact("+18005551234")]).await;
        store
            .push_record(CallRecord::initiated(
                0,
                "+18005551234".to_string(),
                "CA1".to_string(),
            ))
            .await;

        store.reset().await;

        let stats = store.stats(false).await;
        assert_eq!(stats.total_contacts, 0);
        assert_eq!(stats.calls_initiated, 0);
    }
}

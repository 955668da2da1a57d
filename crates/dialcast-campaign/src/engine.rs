// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The campaign engine: one object owning every moving part.
//!
//! Construction wires the store, dispatcher, reconciler, command router,
//! and content policy from a validated config plus whichever adapters the
//! credentials allow. Absent adapters degrade the relevant operations
//! instead of failing construction: no gateway means campaigns cannot
//! start, no provider means heuristic-only classification and no content
//! generation.

use std::sync::Arc;
use std::time::Duration;

use dialcast_command::CommandRouter;
use dialcast_config::DialcastConfig;
use dialcast_content::{BatchItem, ContentPolicy, GeneratedContent};
use dialcast_core::types::{CallRecord, CampaignStats, CommandIntent, Contact, StartAck};
use dialcast_core::{DialcastError, TelephonyGateway, TextProvider};
use tracing::{info, warn};

use crate::dispatcher::CampaignDispatcher;
use crate::reconciler::{WebhookOutcome, WebhookReconciler};
use crate::registry::{self, IngestSummary};
use crate::store::CampaignStore;

pub struct CampaignEngine {
    store: CampaignStore,
    dispatcher: Option<Arc<CampaignDispatcher>>,
    reconciler: WebhookReconciler,
    router: CommandRouter,
    content: ContentPolicy,
    country_code: String,
    max_contacts: usize,
}

impl CampaignEngine {
    pub fn new(
        config: &DialcastConfig,
        gateway: Option<Arc<dyn TelephonyGateway>>,
        provider: Option<Arc<dyn TextProvider>>,
    ) -> Self {
        let store = CampaignStore::new();

        let dispatcher = match (gateway, config.telephony.from_number.as_deref()) {
            (Some(gateway), Some(from)) if !from.trim().is_empty() => {
                Some(Arc::new(CampaignDispatcher::new(
                    store.clone(),
                    gateway,
                    from.to_string(),
                    Duration::from_secs(config.campaign.pacing_secs),
                )))
            }
            _ => None,
        };

        let router = CommandRouter::new(
            provider.clone(),
            config.gemini.command_model.clone(),
            config.campaign.country_code.clone(),
        );
        let content = ContentPolicy::new(
            provider,
            config.gemini.primary_model.clone(),
            config.gemini.fallback_model.clone(),
        );

        Self {
            reconciler: WebhookReconciler::new(store.clone()),
            store,
            dispatcher,
            router,
            content,
            country_code: config.campaign.country_code.clone(),
            max_contacts: config.campaign.max_contacts,
        }
    }

    /// Replaces the contact registry from a raw number list.
    pub async fn ingest_contacts(
        &self,
        raw_numbers: &[String],
    ) -> Result<IngestSummary, DialcastError> {
        let (contacts, summary) =
            registry::prepare_contacts(raw_numbers, &self.country_code, self.max_contacts)?;

        if !summary.rejected.is_empty() {
            warn!(
                rejected = summary.rejected.len(),
                "dropped invalid contact entries"
            );
        }
        if summary.truncated > 0 {
            warn!(
                truncated = summary.truncated,
                cap = self.max_contacts,
                "contact list capped"
            );
        }
        if summary.duplicates > 0 {
            warn!(
                duplicates = summary.duplicates,
                "duplicate numbers kept in contact list"
            );
        }

        self.store.replace_contacts(contacts).await;
        info!(accepted = summary.accepted, "contact registry replaced");
        Ok(summary)
    }

    /// Starts the dial loop over all pending contacts.
    pub async fn start_campaign(&self, base_callback_url: &str) -> Result<StartAck, DialcastError> {
        let dispatcher = self.dispatcher.as_ref().ok_or_else(|| {
            DialcastError::Config(
                "telephony gateway not configured; set telephony.account_sid, \
                 telephony.auth_token, and telephony.from_number"
                    .to_string(),
            )
        })?;
        dispatcher.start(base_callback_url).await
    }

    /// Requests a soft stop of the running campaign.
    pub async fn stop_campaign(&self) -> String {
        let was_running = match &self.dispatcher {
            Some(dispatcher) => dispatcher.stop().await,
            None => false,
        };
        if was_running {
            "Stopping campaign; the in-flight call completes first".to_string()
        } else {
            "No campaign is currently running".to_string()
        }
    }

    /// Clears every contact and record and forces the running flag down.
    pub async fn reset(&self) {
        match &self.dispatcher {
            Some(dispatcher) => dispatcher.reset().await,
            None => self.store.reset().await,
        }
    }

    pub fn running(&self) -> bool {
        self.dispatcher
            .as_ref()
            .map(|d| d.running())
            .unwrap_or(false)
    }

    pub async fn stats(&self) -> CampaignStats {
        self.store.stats(self.running()).await
    }

    pub async fn call_log(&self) -> Vec<CallRecord> {
        self.store.call_log().await
    }

    pub async fn contacts(&self) -> Vec<Contact> {
        self.store.contacts().await
    }

    /// Folds a gateway status callback into the call log.
    pub async fn apply_webhook(
        &self,
        call_id: &str,
        raw_status: &str,
        duration_secs: Option<u32>,
    ) -> WebhookOutcome {
        self.reconciler.apply(call_id, raw_status, duration_secs).await
    }

    /// Classifies a free-text command into a structured intent. Never fails.
    pub async fn classify_command(&self, text: &str) -> CommandIntent {
        self.router.classify(text).await
    }

    /// Generates long-form content on a topic, with one fallback retry.
    pub async fn generate_content(&self, topic: &str) -> Result<GeneratedContent, DialcastError> {
        self.content.generate(topic).await
    }

    /// Generates content for several topics, reporting per-topic outcomes.
    pub async fn generate_batch(&self, topics: &[String]) -> Vec<BatchItem> {
        self.content.generate_batch(topics).await
    }

    /// Waits for the background dial loop, if any, to finish.
    pub async fn join(&self) {
        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.join().await;
        }
    }
}

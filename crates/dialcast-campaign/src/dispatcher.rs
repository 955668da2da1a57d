// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The paced dial loop: one background task walking the contact registry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dialcast_core::types::{CallRecord, PlaceCallRequest, StartAck};
use dialcast_core::{DialcastError, TelephonyGateway};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::store::CampaignStore;

/// Owns the campaign dial loop.
///
/// At most one loop runs at a time, enforced through an atomic flag claimed
/// with compare-exchange. The loop walks contacts in registry order, places
/// one call per contact through the gateway, and sleeps a fixed pacing
/// interval after every contact. Stopping is cooperative: the current dial
/// finishes before the loop observes cancellation.
pub struct CampaignDispatcher {
    store: CampaignStore,
    gateway: Arc<dyn TelephonyGateway>,
    from_number: String,
    pacing: Duration,
    running: Arc<AtomicBool>,
    stopping: AtomicBool,
    cancel: Mutex<CancellationToken>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl CampaignDispatcher {
    pub fn new(
        store: CampaignStore,
        gateway: Arc<dyn TelephonyGateway>,
        from_number: String,
        pacing: Duration,
    ) -> Self {
        Self {
            store,
            gateway,
            from_number,
            pacing,
            running: Arc::new(AtomicBool::new(false)),
            stopping: AtomicBool::new(false),
            cancel: Mutex::new(CancellationToken::new()),
            task: Mutex::new(None),
        }
    }

    /// Starts the dial loop in a background task and acknowledges immediately.
    ///
    /// Fails with [`DialcastError::CampaignRunning`] when a loop is already in
    /// flight and [`DialcastError::NoContacts`] when the registry is empty.
    pub async fn start(&self, base_callback_url: &str) -> Result<StartAck, DialcastError> {
        // Single-flight claim. Whoever wins the exchange owns the loop.
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(DialcastError::CampaignRunning);
        }

        let total = self.store.contact_count().await;
        if total == 0 {
            self.running.store(false, Ordering::SeqCst);
            return Err(DialcastError::NoContacts);
        }

        // Fresh token per campaign, so a stale stop cannot cancel a new loop.
        let cancel = CancellationToken::new();
        *self.cancel.lock().await = cancel.clone();
        self.stopping.store(false, Ordering::SeqCst);

        let base = base_callback_url.trim_end_matches('/');
        let instruction_url = format!("{base}/voice");
        let status_callback_url = format!("{base}/call_status");

        let store = self.store.clone();
        let gateway = self.gateway.clone();
        let from_number = self.from_number.clone();
        let pacing = self.pacing;
        let running = self.running.clone();

        let handle = tokio::spawn(async move {
            // Dropped on every exit path, including panics, so the flag can
            // never stay stuck at true.
            let _guard = RunningGuard(running);
            run_dial_loop(
                store,
                gateway,
                from_number,
                instruction_url,
                status_callback_url,
                pacing,
                cancel,
            )
            .await;
        });
        *self.task.lock().await = Some(handle);

        info!(total_contacts = total, "campaign started");
        Ok(StartAck {
            message: format!("Calling campaign started for {total} contacts"),
            total_contacts: total,
        })
    }

    /// Requests a soft stop. The in-flight dial and its pacing wait still
    /// complete; only the next iteration is prevented.
    ///
    /// [`running`](Self::running) reports false as soon as the stop is
    /// requested, even though the loop itself winds down one iteration
    /// later. The underlying single-flight claim is released only by the
    /// loop's exit, so a `start` racing a stop can never spawn a second
    /// loop.
    ///
    /// Returns whether a campaign was running when the stop arrived.
    pub async fn stop(&self) -> bool {
        let was_running = self.running.load(Ordering::SeqCst);
        if was_running {
            self.stopping.store(true, Ordering::SeqCst);
        }
        self.cancel.lock().await.cancel();
        info!(was_running, "campaign stop requested");
        was_running
    }

    /// Cancels any in-flight loop, clears all state, and forces the running
    /// flag down without waiting for the loop to notice.
    pub async fn reset(&self) {
        self.cancel.lock().await.cancel();
        self.store.reset().await;
        self.running.store(false, Ordering::SeqCst);
        info!("campaign state reset");
    }

    /// Whether a campaign is active and not already asked to stop.
    pub fn running(&self) -> bool {
        self.running.load(Ordering::SeqCst) && !self.stopping.load(Ordering::SeqCst)
    }

    /// Waits for the background loop, if any, to finish.
    pub async fn join(&self) {
        let handle = self.task.lock().await.take();
        if let Some(handle) = handle
            && let Err(err) = handle.await
        {
            warn!(error = %err, "campaign task terminated abnormally");
        }
    }
}

/// Resets the running flag when the dial loop exits, however it exits.
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_dial_loop(
    store: CampaignStore,
    gateway: Arc<dyn TelephonyGateway>,
    from_number: String,
    instruction_url: String,
    status_callback_url: String,
    pacing: Duration,
    cancel: CancellationToken,
) {
    let total = store.contact_count().await;
    let mut initiated = 0usize;
    let mut failed = 0usize;

    for index in 0..total {
        if cancel.is_cancelled() {
            info!(index, "campaign stopped before completion");
            break;
        }

        let Some(contact) = store.claim_pending(index).await else {
            debug!(index, "skipping contact not in pending state");
            continue;
        };

        let request = PlaceCallRequest {
            to: contact.phone.clone(),
            from: from_number.clone(),
            instruction_url: instruction_url.clone(),
            status_callback_url: status_callback_url.clone(),
        };

        match gateway.place_call(request).await {
            Ok(placed) => {
                info!(phone = %contact.phone, call_id = %placed.call_id, "call initiated");
                store
                    .push_record(CallRecord::initiated(
                        index,
                        contact.phone.clone(),
                        placed.call_id,
                    ))
                    .await;
                initiated += 1;
            }
            Err(err) => {
                warn!(phone = %contact.phone, error = %err, "call placement failed");
                store
                    .push_record(CallRecord::dispatch_failed(
                        index,
                        contact.phone.clone(),
                        err.to_string(),
                    ))
                    .await;
                failed += 1;
            }
        }

        // Fixed pacing after every contact, the last one included.
        tokio::time::sleep(pacing).await;
    }

    info!(initiated, failed, "campaign finished");
}

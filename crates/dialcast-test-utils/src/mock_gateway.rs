// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock telephony gateway for testing without a live dialing API.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dialcast_core::types::{PlaceCallRequest, PlacedCall};
use dialcast_core::{DialcastError, TelephonyGateway};
use tokio::sync::Mutex;

type Scripted = Result<String, (u16, String)>;

/// A mock gateway that replays a scripted queue of placement outcomes.
///
/// Outcomes are consumed FIFO; an empty queue yields a success with a
/// sequential `CA-mock-N` call id. Every placement request is recorded for
/// assertions on numbers and callback URLs.
pub struct MockGateway {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<PlaceCallRequest>>>,
    next_id: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicUsize::new(1),
        }
    }

    /// Queue a successful placement with a specific call id.
    pub async fn push_success(&self, call_id: &str) {
        self.script.lock().await.push_back(Ok(call_id.to_string()));
    }

    /// Queue a placement failure carrying an HTTP status.
    pub async fn push_failure(&self, status: u16, message: &str) {
        self.script
            .lock()
            .await
            .push_back(Err((status, message.to_string())));
    }

    /// Handle on the recorded placement requests, in arrival order.
    pub fn requests(&self) -> Arc<Mutex<Vec<PlaceCallRequest>>> {
        self.requests.clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TelephonyGateway for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn place_call(&self, request: PlaceCallRequest) -> Result<PlacedCall, DialcastError> {
        self.requests.lock().await.push(request);

        match self.script.lock().await.pop_front() {
            Some(Ok(call_id)) => Ok(PlacedCall { call_id }),
            Some(Err((status, message))) => Err(DialcastError::Gateway {
                message,
                status: Some(status),
                source: None,
            }),
            None => {
                let n = self.next_id.fetch_add(1, Ordering::SeqCst);
                Ok(PlacedCall {
                    call_id: format!("CA-mock-{n}"),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(to: &str) -> PlaceCallRequest {
        PlaceCallRequest {
            to: to.to_string(),
            from: "+15005550006".to_string(),
            instruction_url: "https://cb.example.com/voice".to_string(),
            status_callback_url: "https://cb.example.com/call_status".to_string(),
        }
    }

    #[tokio::test]
    async fn default_ids_are_sequential() {
        let gateway = MockGateway::new();
        let first = gateway.place_call(request("+18005551234")).await.unwrap();
        let second = gateway.place_call(request("+18005555678")).await.unwrap();
        assert_eq!(first.call_id, "CA-mock-1");
        assert_eq!(second.call_id, "CA-mock-2");
    }

    #[tokio::test]
    async fn scripted_outcomes_are_consumed_in_order() {
        let gateway = MockGateway::new();
        gateway.push_success("CA-custom").await;
        gateway.push_failure(400, "invalid number").await;

        let placed = gateway.place_call(request("+18005551234")).await.unwrap();
        assert_eq!(placed.call_id, "CA-custom");

        let err = gateway
            .place_call(request("+18005555678"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn requests_are_recorded() {
        let gateway = MockGateway::new();
        let requests = gateway.requests();
        gateway.place_call(request("+18005551234")).await.unwrap();

        let seen = requests.lock().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].to, "+18005551234");
        assert_eq!(seen[0].instruction_url, "https://cb.example.com/voice");
    }
}

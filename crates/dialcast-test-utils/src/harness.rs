// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end campaign testing.
//!
//! `EngineHarness` assembles a complete [`CampaignEngine`] backed by mock
//! adapters and a config tuned for tests (zero pacing by default), keeping
//! handles on the mocks so tests can script outcomes and assert on traffic.

use std::sync::Arc;

use dialcast_campaign::CampaignEngine;
use dialcast_config::DialcastConfig;
use dialcast_core::{TelephonyGateway, TextProvider};

use crate::mock_gateway::MockGateway;
use crate::mock_provider::MockProvider;

/// Builder for test engines with configurable adapters.
pub struct EngineHarnessBuilder {
    pacing_secs: u64,
    max_contacts: usize,
    with_gateway: bool,
    with_provider: bool,
}

impl EngineHarnessBuilder {
    fn new() -> Self {
        Self {
            pacing_secs: 0,
            max_contacts: 100,
            with_gateway: true,
            with_provider: true,
        }
    }

    /// Seconds between dials. Defaults to zero so tests run instantly.
    pub fn pacing_secs(mut self, secs: u64) -> Self {
        self.pacing_secs = secs;
        self
    }

    /// Registry cap. Defaults to the production cap of 100.
    pub fn max_contacts(mut self, cap: usize) -> Self {
        self.max_contacts = cap;
        self
    }

    /// Build an engine with no telephony gateway configured.
    pub fn without_gateway(mut self) -> Self {
        self.with_gateway = false;
        self
    }

    /// Build an engine with no text provider configured.
    pub fn without_provider(mut self) -> Self {
        self.with_provider = false;
        self
    }

    pub fn build(self) -> EngineHarness {
        let mut config = DialcastConfig::default();
        config.campaign.pacing_secs = self.pacing_secs;
        config.campaign.max_contacts = self.max_contacts;
        config.telephony.account_sid = Some("ACtest".to_string());
        config.telephony.auth_token = Some("test-token".to_string());
        config.telephony.from_number = Some("+15005550006".to_string());

        let gateway = Arc::new(MockGateway::new());
        let provider = Arc::new(MockProvider::new());

        let engine = CampaignEngine::new(
            &config,
            self.with_gateway
                .then(|| gateway.clone() as Arc<dyn TelephonyGateway>),
            self.with_provider
                .then(|| provider.clone() as Arc<dyn TextProvider>),
        );

        EngineHarness {
            engine,
            gateway,
            provider,
        }
    }
}

/// A complete test environment around a campaign engine.
pub struct EngineHarness {
    pub engine: CampaignEngine,
    /// The mock gateway behind the engine, for scripting and assertions.
    pub gateway: Arc<MockGateway>,
    /// The mock provider behind the engine, for scripting and assertions.
    pub provider: Arc<MockProvider>,
}

impl EngineHarness {
    pub fn builder() -> EngineHarnessBuilder {
        EngineHarnessBuilder::new()
    }

    /// Waits for the background dial loop to finish.
    pub async fn run_to_completion(&self) {
        self.engine.join().await;
    }
}

// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Dialcast integration tests.
//!
//! Provides mock adapters with scriptable outcomes and recorded traffic,
//! plus [`EngineHarness`] for assembling a complete engine around them.

pub mod harness;
pub mod mock_gateway;
pub mod mock_provider;

pub use harness::{EngineHarness, EngineHarnessBuilder};
pub use mock_gateway::MockGateway;
pub use mock_provider::MockProvider;

// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Campaign orchestration for Dialcast.
//!
//! The pieces, bottom up:
//! - [`store`]: contact registry and call log under one mutex
//! - [`registry`]: raw list ingestion (normalize, validate, cap)
//! - [`dispatcher`]: the paced background dial loop
//! - [`reconciler`]: gateway webhook reconciliation
//! - [`engine`]: the facade wiring all of it to config and adapters

pub mod dispatcher;
pub mod engine;
pub mod reconciler;
pub mod registry;
pub mod store;

pub use dispatcher::CampaignDispatcher;
pub use engine::CampaignEngine;
pub use reconciler::{WebhookOutcome, WebhookReconciler};
pub use registry::{IngestSummary, RejectedNumber};
pub use store::CampaignStore;

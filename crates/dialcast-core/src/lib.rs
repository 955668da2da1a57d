// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core trait definitions, error types, and common types for Dialcast.
//!
//! Every other crate in the workspace depends on this one. It defines:
//! - [`DialcastError`]: the unified error enum
//! - [`traits`]: the [`TelephonyGateway`] and [`TextProvider`] adapter seams
//! - [`types`]: contacts, call records, stats, and command intents
//! - [`phone`]: canonical phone normalization, validation, and extraction

pub mod error;
pub mod phone;
pub mod traits;
pub mod types;

pub use error::DialcastError;
pub use traits::{TelephonyGateway, TextProvider};
pub use types::{
    CallRecord, CallStatus, CampaignStats, CommandAction, CommandIntent, Contact, ContactStatus,
    GenerationRequest, GenerationResponse, PlaceCallRequest, PlacedCall, StartAck,
};

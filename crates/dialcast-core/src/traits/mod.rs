// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits implemented by telephony and text generation backends.

pub mod gateway;
pub mod provider;

pub use gateway::TelephonyGateway;
pub use provider::TextProvider;

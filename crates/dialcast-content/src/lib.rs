// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Long-form content generation for Dialcast.
//!
//! A thin policy over the text provider: try the configured primary model,
//! and when it is overloaded (HTTP 429 or 503), retry exactly once on the
//! stronger fallback model. Requires a configured provider; there is no
//! heuristic stand-in for prose.

pub mod policy;

pub use policy::{BatchItem, ContentPolicy, GeneratedContent};

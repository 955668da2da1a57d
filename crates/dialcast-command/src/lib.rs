// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command classification for Dialcast.
//!
//! Turns free-text user commands into structured [`CommandIntent`]s.
//! With a text provider configured, the LLM does the classifying and
//! keyword heuristics are the fallback; without one, heuristics are the
//! only path. Either way, [`CommandRouter::classify`] never fails.
//!
//! [`CommandIntent`]: dialcast_core::types::CommandIntent

pub mod classifier;
pub mod router;

pub use classifier::classify_heuristic;
pub use router::CommandRouter;

// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Phone number normalization, validation, and free-text extraction.
//!
//! Numbers move through the system in one canonical form: a leading `+`,
//! the country code, then a ten digit national number. [`normalize`] is
//! total and never rejects input; [`is_valid`] is the strict gate applied
//! afterwards. Keeping the two separate lets ingestion report exactly
//! which raw entries failed and what they normalized to.

use std::sync::LazyLock;

use regex::Regex;

/// Candidate phone patterns for free-text extraction, tried in order.
///
/// Patterns are NANP-shaped; the configured country code is applied during
/// normalization, not matching.
static EXTRACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Loose form with optional +1 prefix: +1 (800) 555-1234, 800-555-1234
        Regex::new(r"\+?1?[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap(),
        // Grouped form with mandatory separators: (800) 555.1234
        Regex::new(r"\(?\d{3}\)?[-.\s]\d{3}[-.\s]\d{4}").unwrap(),
        // Bare ten or eleven digit run: 18005551234
        Regex::new(r"\d{10,11}").unwrap(),
    ]
});

/// Normalizes a raw phone string into canonical `+<cc><national>` form.
///
/// Strips every non-digit character, then prefixes the configured country
/// code when exactly ten digits remain. Eleven digit strings already
/// carrying the country code, and anything else, pass through with a bare
/// plus; validation decides their fate later.
pub fn normalize(raw: &str, country_code: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("+{country_code}{digits}")
    } else {
        format!("+{digits}")
    }
}

/// Returns true when `phone` is exactly `+`, the country code, and ten digits.
pub fn is_valid(phone: &str, country_code: &str) -> bool {
    let Some(rest) = phone.strip_prefix('+') else {
        return false;
    };
    let Some(national) = rest.strip_prefix(country_code) else {
        return false;
    };
    national.len() == 10 && national.chars().all(|c| c.is_ascii_digit())
}

/// Extracts the first phone-shaped substring from free text.
///
/// Tries each pattern in [`EXTRACTION_PATTERNS`] in order and normalizes
/// the first hit. Returns `None` when no pattern matches.
pub fn extract(text: &str, country_code: &str) -> Option<String> {
    for pattern in EXTRACTION_PATTERNS.iter() {
        if let Some(found) = pattern.find(text) {
            return Some(normalize(found.as_str(), country_code));
        }
    }
    None
}

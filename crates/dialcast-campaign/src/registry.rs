// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact list ingestion: normalization, validation, and capping.

use std::collections::HashSet;

use dialcast_core::phone;
use dialcast_core::types::Contact;
use dialcast_core::DialcastError;

/// One raw entry that failed validation after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedNumber {
    pub raw: String,
    pub normalized: String,
}

/// Outcome of preparing a raw contact list.
#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    /// Contacts kept, in input order.
    pub accepted: usize,
    /// Entries whose normalized form failed validation.
    pub rejected: Vec<RejectedNumber>,
    /// Valid entries dropped once the registry cap was reached.
    pub truncated: usize,
    /// Accepted entries whose number already appeared earlier in the list.
    pub duplicates: usize,
}

/// Normalizes and validates a raw number list into contacts.
///
/// Invalid entries are dropped and reported in the summary; valid entries
/// keep their input order and are capped at `max_contacts`. Duplicate
/// numbers are kept (each occurrence is dialed) but counted so callers can
/// warn about them. Names are assigned positionally.
pub fn prepare_contacts(
    raw_numbers: &[String],
    country_code: &str,
    max_contacts: usize,
) -> Result<(Vec<Contact>, IngestSummary), DialcastError> {
    if raw_numbers.is_empty() {
        return Err(DialcastError::Validation(
            "contact list is empty".to_string(),
        ));
    }

    let mut summary = IngestSummary::default();
    let mut contacts: Vec<Contact> = Vec::new();
    let mut seen = HashSet::new();

    for raw in raw_numbers {
        let normalized = phone::normalize(raw, country_code);
        if !phone::is_valid(&normalized, country_code) {
            summary.rejected.push(RejectedNumber {
                raw: raw.clone(),
                normalized,
            });
            continue;
        }
        if contacts.len() == max_contacts {
            summary.truncated += 1;
            continue;
        }
        if !seen.insert(normalized.clone()) {
            summary.duplicates += 1;
        }
        let name = format!("Contact {}", contacts.len() + 1);
        contacts.push(Contact::new(normalized, name));
    }

    if contacts.is_empty() {
        return Err(DialcastError::Validation(format!(
            "no valid phone numbers in {} entries",
            raw_numbers.len()
        )));
    }

    summary.accepted = contacts.len();
    Ok((contacts, summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn mixed_list_keeps_valid_entries_in_order() {
        let (contacts, summary) =
            prepare_contacts(&raw(&["1234567890", "abc", "18005551234"]), "1", 100).unwrap();

        let phones: Vec<&str> = contacts.iter().map(|c| c.phone.as_str()).collect();
        assert_eq!(phones, vec!["+11234567890", "+18005551234"]);
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].raw, "abc");
    }

    #[test]
    fn names_are_positional() {
        let (contacts, _) =
            prepare_contacts(&raw(&["zzz", "1234567890", "8005551234"]), "1", 100).unwrap();
        assert_eq!(contacts[0].name, "Contact 1");
        assert_eq!(contacts[1].name, "Contact 2");
    }

    #[test]
    fn formatted_numbers_are_normalized() {
        let (contacts, _) =
            prepare_contacts(&raw(&["(800) 555-1234", "+1 800 555 5678"]), "1", 100).unwrap();
        assert_eq!(contacts[0].phone, "+18005551234");
        assert_eq!(contacts[1].phone, "+18005555678");
    }

    #[test]
    fn list_is_capped_silently() {
        let entries: Vec<String> = (0..150).map(|i| format!("80055{i:05}")).collect();
        let (contacts, summary) = prepare_contacts(&entries, "1", 100).unwrap();
        assert_eq!(contacts.len(), 100);
        assert_eq!(summary.truncated, 50);
        // First hundred kept, in order.
        assert_eq!(contacts[0].phone, "+18005500000");
        assert_eq!(contacts[99].phone, "+18005500099");
    }

    #[test]
    fn duplicates_are_kept_and_counted() {
        let (contacts, summary) =
            prepare_contacts(&raw(&["8005551234", "8005551234"]), "1", 100).unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(summary.duplicates, 1);
    }

    #[test]
    fn empty_input_is_a_validation_error() {
        let err = prepare_contacts(&[], "1", 100).unwrap_err();
        assert!(matches!(err, DialcastError::Validation(_)));
    }

    #[test]
    fn all_invalid_input_is_a_validation_error() {
        let err = prepare_contacts(&raw(&["abc", "123"]), "1", 100).unwrap_err();
        assert!(matches!(err, DialcastError::Validation(_)));
    }
}

// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Deserialization failures come out of figment as flat error records. This
//! module turns each one into a [`ConfigError`] diagnostic: unknown keys get
//! a "did you mean?" suggestion scored by Jaro-Winkler similarity, and when
//! the offending TOML file is available the diagnostic carries a source span
//! pointing at the bad key.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Similarity floor below which no correction is suggested.
///
/// 0.75 catches the typos that actually happen (`pacing_sec`,
/// `contry_code`) without suggesting corrections for keys that are simply
/// wrong.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
///
/// Each variant carries enough context for miette to render an Elm-style
/// report: spans into the offending TOML, the valid key set, and a fuzzy
/// suggestion where one clears the threshold.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key the config model does not know about.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(dialcast::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest valid key, when one is close enough.
        suggestion: Option<String>,
        /// Comma-joined valid keys for the section.
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong TOML type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(
        code(dialcast::config::invalid_type),
        help("expected {expected}")
    )]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A key the config model requires but no layer supplied.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(dialcast::config::missing_key),
        help("add `{key} = <value>` to your dialcast.toml")
    )]
    MissingKey { key: String },

    /// A semantic constraint violated by an otherwise well-formed value.
    #[error("validation error: {message}")]
    #[diagnostic(code(dialcast::config::validation))]
    Validation { message: String },

    /// Anything figment reports that has no richer mapping.
    #[error("configuration error: {0}")]
    #[diagnostic(code(dialcast::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Converts a `figment::Error` into one [`ConfigError`] per underlying
/// failure.
///
/// `toml_sources` maps file paths to their contents; an unknown-key error
/// whose originating file is present gains a source span for the report.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| convert_one(&error, toml_sources))
        .collect()
}

fn convert_one(
    error: &figment::error::Error,
    toml_sources: &[(String, String)],
) -> ConfigError {
    use figment::error::Kind;

    match &error.kind {
        Kind::UnknownField(field, expected) => {
            let valid: Vec<&str> = expected.to_vec();
            let (span, src) = annotate(error, field, toml_sources);
            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion: suggest_key(field, &valid),
                valid_keys: valid.join(", "),
                span,
                src,
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: field.clone().into_owned(),
        },
        Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
            key: dotted_path(error),
            detail: format!("found {actual}, expected {expected}"),
            expected: expected.to_string(),
            span: None,
            src: None,
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

/// Joins the figment error path into the familiar `section.key` form.
fn dotted_path(error: &figment::error::Error) -> String {
    error
        .path
        .iter()
        .map(|segment| segment.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Attaches a source span for `field` when the error's originating TOML
/// file is among the collected sources.
fn annotate(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some(figment::Source::File(path)) = error
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.source.as_ref())
    else {
        return (None, None);
    };
    let path = path.display().to_string();

    let Some((_, content)) = toml_sources.iter().find(|(p, _)| *p == path) else {
        return (None, None);
    };

    let section: Vec<String> = error.path.iter().map(|s| s.to_string()).collect();
    match find_key_offset(content, &section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(path, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` within `content`, scoped to the section named by
/// the first element of `path` (or the whole document for top-level keys).
///
/// The key must sit at the start of a line (after indentation) and be
/// followed by whitespace or `=`, so a key name appearing inside a string
/// value is not mistaken for the definition.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path.first() {
        None => 0,
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
    };

    let mut offset = search_start;
    for line in content[search_start..].lines() {
        let key_start = line.len() - line.trim_start().len();
        let candidate = &line[key_start..];
        if let Some(rest) = candidate.strip_prefix(field)
            && (rest.starts_with('=') || rest.starts_with(' ') || rest.starts_with('\t'))
        {
            return Some(offset + key_start);
        }
        offset += line.len() + 1;
    }
    None
}

/// Best valid key within the similarity threshold of `unknown`, if any.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (strsim::jaro_winkler(unknown, key), key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, key)| key.to_string())
}

/// Renders each error to stderr through miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut rendered = String::new();
        if handler.render_report(&mut rendered, error as &dyn Diagnostic).is_ok() {
            eprint!("{rendered}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAMPAIGN_KEYS: &[&str] = &["country_code", "max_contacts", "pacing_secs"];

    #[test]
    fn close_typos_get_a_suggestion() {
        assert_eq!(
            suggest_key("contry_code", CAMPAIGN_KEYS),
            Some("country_code".to_string())
        );
        assert_eq!(
            suggest_key("pacing_sec", CAMPAIGN_KEYS),
            Some("pacing_secs".to_string())
        );
    }

    #[test]
    fn distant_strings_get_no_suggestion() {
        assert_eq!(suggest_key("zzzzzz", CAMPAIGN_KEYS), None);
        assert_eq!(suggest_key("", CAMPAIGN_KEYS), None);
    }

    #[test]
    fn key_offset_resolves_inside_a_section() {
        let content = "[campaign]\npacing_sec = 3\n";
        let offset =
            find_key_offset(content, &["campaign".to_string()], "pacing_sec").unwrap();
        assert_eq!(&content[offset..offset + 10], "pacing_sec");
    }

    #[test]
    fn key_offset_resolves_top_level_keys() {
        let content = "pacing_sec = 3\n[campaign]\n";
        assert_eq!(find_key_offset(content, &[], "pacing_sec"), Some(0));
    }

    #[test]
    fn key_offset_skips_indentation() {
        let content = "[campaign]\n  pacing_sec = 3\n";
        let offset =
            find_key_offset(content, &["campaign".to_string()], "pacing_sec").unwrap();
        assert_eq!(&content[offset..offset + 10], "pacing_sec");
    }

    #[test]
    fn key_offset_misses_absent_sections() {
        let content = "[gemini]\napi_key = \"k\"\n";
        assert_eq!(
            find_key_offset(content, &["campaign".to_string()], "pacing_sec"),
            None
        );
    }

    #[test]
    fn key_inside_a_string_value_is_not_matched() {
        let content = "[service]\nname = \"pacing_sec\"\n";
        assert_eq!(
            find_key_offset(content, &["service".to_string()], "pacing_sec"),
            None
        );
    }

    #[test]
    fn unknown_key_help_mentions_the_suggestion() {
        let with = unknown_key_help(Some("country_code"), "country_code, pacing_secs");
        assert!(with.contains("did you mean `country_code`?"), "got: {with}");

        let without = unknown_key_help(None, "country_code, pacing_secs");
        assert!(without.starts_with("valid keys:"), "got: {without}");
    }
}

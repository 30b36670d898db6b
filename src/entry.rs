//! Dictionary entry types.
//!
//! These are the records produced by extraction, persisted by the cache and
//! consumed by the flashcard exporter. Field names serialize in camelCase so
//! the persisted `words` record reads the same as the browser-side schema.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Normalize a lookup key: trimmed and lower-cased.
///
/// # Example
///
/// ```rust
/// use rs_wordcache::normalize_word;
///
/// assert_eq!(normalize_word("  Serendipity\n"), "serendipity");
/// ```
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Truncate to the millisecond precision timestamps are persisted with.
#[must_use]
pub(crate) fn stored_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(3)
}

/// One regional pronunciation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pronunciation {
    /// IPA transcription, without the surrounding slashes.
    pub ipa: String,

    /// Audio source as found on the page (may be relative).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// UK and US pronunciations; either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uk: Option<Pronunciation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub us: Option<Pronunciation>,
}

impl Pronunciations {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uk.is_none() && self.us.is_none()
    }
}

/// One sense of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    /// Part of speech, or the configured fallback label (`"unknown"`).
    pub part_of_speech: String,

    /// Proficiency level such as `B2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Guide word heading the sense.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// The gloss.
    pub meaning: String,

    /// Example sentences in page order.
    #[serde(default)]
    pub examples: Vec<String>,
}

/// A cached dictionary lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Normalized word; the cache key.
    pub word: String,

    /// When the entry was first extracted.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    /// When the entry was last read from the cache.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_accessed: DateTime<Utc>,

    #[serde(default)]
    pub pronunciations: Pronunciations,

    /// Senses in document order.
    pub definitions: Vec<Definition>,

    /// Page the entry was extracted from.
    pub source_url: String,
}

impl WordEntry {
    /// All examples across every definition, in entry order.
    pub fn examples(&self) -> impl Iterator<Item = &str> {
        self.definitions
            .iter()
            .flat_map(|def| def.examples.iter().map(String::as_str))
    }
}

//! Error types for rs-wordcache.
//!
//! Every failure names the word it concerns, so callers can show the
//! message verbatim.

/// Why a fetched page could not be turned into an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// No entry container selector matched anything on the page.
    NoEntryContainer,
    /// The container was found but yielded zero definitions.
    NoDefinitions,
}

/// Error type for extraction, cache and lookup operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dictionary reported that the word does not exist.
    #[error("Word \"{word}\" not found in dictionary")]
    NotFound { word: String },

    /// The page was fetched but no entry could be extracted from it.
    #[error("{}", parse_message(.word, .reason))]
    Parse { word: String, reason: ParseFailure },

    /// The lookup input was empty after normalization.
    #[error("Invalid word provided")]
    InvalidWord,

    /// The page could not be fetched for a reason other than not-found.
    #[error("Failed to fetch dictionary page for \"{word}\": {message}")]
    Fetch { word: String, message: String },

    /// The persistence surface failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

fn parse_message(word: &str, reason: &ParseFailure) -> String {
    match reason {
        ParseFailure::NoEntryContainer => format!("Could not parse dictionary entry for \"{word}\""),
        ParseFailure::NoDefinitions => format!("No definitions found for \"{word}\""),
    }
}

impl Error {
    /// Returns `true` for both kinds of parse failure.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for rs-wordcache operations.
pub type Result<T> = std::result::Result<T, Error>;

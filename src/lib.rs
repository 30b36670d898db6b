//! # rs-wordcache
//!
//! Dictionary entry extraction, a local word cache and flashcard export.
//!
//! A dictionary page is parsed into a structured [`WordEntry`]
//! (pronunciations, part of speech, definitions, examples), cached under the
//! normalized word, and later exported as an Anki text-import document.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_wordcache::extract;
//!
//! let html = r#"<div class="entry-body">
//!     <span class="pos">noun</span>
//!     <div class="def-block"><div class="def">a round fruit</div></div>
//! </div>"#;
//!
//! let entry = extract(html, "Apple")?;
//! assert_eq!(entry.word, "apple");
//! assert_eq!(entry.definitions[0].meaning, "a round fruit");
//! # Ok::<(), rs_wordcache::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Resilient extraction**: every field is found through an ordered
//!   selector fallback chain, so markup variants degrade gracefully
//! - **Word cache**: async key-value persistence with touch-on-read
//! - **Flashcard export**: tab-separated, HTML-escaped Anki import format
//! - **Lookup**: cache-first orchestration over a pluggable fetcher
//!   (`http` feature provides a `reqwest` implementation)

mod entry;
mod error;
mod extract;
mod options;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Ordered selector fallback chains and the default selector table.
pub mod selector;

/// Lookup URL construction and audio URL resolution.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Persistent word cache, settings and storage backends.
pub mod cache;

/// Anki flashcard export.
pub mod export;

/// Cache-first lookup orchestration.
pub mod lookup;

// Public API - re-exports
pub use cache::{Settings, SettingsPatch, Usage, WordCache};
pub use entry::{normalize_word, Definition, Pronunciation, Pronunciations, WordEntry};
pub use error::{Error, ParseFailure, Result};
pub use extract::extract_entry;
pub use options::{Options, DEFAULT_ORIGIN, UNKNOWN_PART_OF_SPEECH};

/// Extracts an entry from a dictionary page using default options.
///
/// The entry's `source_url` is the lookup URL for the normalized word and
/// both timestamps are the current time.
///
/// # Arguments
///
/// * `html` - The dictionary page as a string slice
/// * `requested_word` - The word as the user asked for it
///
/// # Errors
///
/// Returns [`Error::Parse`] when the page has no entry container or yields
/// no definitions.
pub fn extract(html: &str, requested_word: &str) -> Result<WordEntry> {
    extract_with_options(html, requested_word, &Options::default())
}

/// Extracts an entry from a dictionary page with custom options.
///
/// # Example
///
/// ```rust
/// use rs_wordcache::{extract_with_options, Options};
///
/// let html = r#"<div class="entry-body"><span class="def">a gloss</span></div>"#;
/// let options = Options {
///     unknown_part_of_speech: "?".to_string(),
///     ..Options::default()
/// };
/// let entry = extract_with_options(html, "word", &options)?;
/// assert_eq!(entry.definitions[0].part_of_speech, "?");
/// # Ok::<(), rs_wordcache::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] when extraction fails, or [`Error::Fetch`] if
/// `options.origin` is not a valid URL.
pub fn extract_with_options(html: &str, requested_word: &str, options: &Options) -> Result<WordEntry> {
    let source_url = url_utils::lookup_url(&options.origin, &normalize_word(requested_word))?;
    extract_entry(html, requested_word, &source_url, chrono::Utc::now(), options)
}

/// Extracts an entry from raw page bytes with automatic encoding detection.
///
/// `content_type` is the HTTP `Content-Type` header, if known.
///
/// # Errors
///
/// Same as [`extract_with_options`].
pub fn extract_bytes(
    html: &[u8],
    content_type: Option<&str>,
    requested_word: &str,
    options: &Options,
) -> Result<WordEntry> {
    let html = encoding::decode_page(html, content_type);
    extract_with_options(&html, requested_word, options)
}

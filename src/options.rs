//! Configuration options for entry extraction.
//!
//! The `Options` struct controls which selectors the extractor uses and how
//! it labels missing data.

use crate::selector::Selectors;

/// Origin of the dictionary the default selectors target.
pub const DEFAULT_ORIGIN: &str = "https://dictionary.cambridge.org";

/// Label used when a definition has no part-of-speech tag.
pub const UNKNOWN_PART_OF_SPEECH: &str = "unknown";

/// Configuration options for entry extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_wordcache::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     resolve_audio_urls: true,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Selector table for the page layout.
    ///
    /// Default: [`Selectors::default`]
    pub selectors: Selectors,

    /// Scheme and host of the dictionary site. Used to build lookup URLs
    /// and, when `resolve_audio_urls` is set, to absolutize audio sources.
    ///
    /// Default: `https://dictionary.cambridge.org`
    pub origin: String,

    /// Part of speech recorded when the page has no tag.
    ///
    /// Default: `"unknown"`
    pub unknown_part_of_speech: String,

    /// Resolve relative audio URLs against `origin` during extraction.
    ///
    /// When disabled, audio URLs are stored exactly as they appear on the
    /// page and resolution is left to the caller.
    ///
    /// Default: `false`
    pub resolve_audio_urls: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            origin: DEFAULT_ORIGIN.to_string(),
            unknown_part_of_speech: UNKNOWN_PART_OF_SPEECH.to_string(),
            resolve_audio_urls: false,
        }
    }
}

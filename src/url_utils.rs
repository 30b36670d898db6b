//! URL Utility Functions
//!
//! Builds the deterministic lookup URL for a word and resolves relative
//! audio sources against the dictionary origin.

use url::Url;

use crate::error::{Error, Result};

/// Path under the origin where English entries live.
const ENTRY_PATH: [&str; 2] = ["dictionary", "english"];

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Page URL for a normalized word.
///
/// The word becomes a single percent-encoded path segment.
///
/// # Errors
///
/// Returns [`Error::Fetch`] if `origin` is not an absolute http(s) URL.
///
/// # Examples
/// ```
/// use rs_wordcache::url_utils::lookup_url;
///
/// let url = lookup_url("https://dictionary.cambridge.org", "ice cream").unwrap();
/// assert_eq!(url, "https://dictionary.cambridge.org/dictionary/english/ice%20cream");
/// ```
pub fn lookup_url(origin: &str, word: &str) -> Result<String> {
    let (is_abs, parsed) = is_absolute_url(origin);
    let Some(mut url) = parsed.filter(|_| is_abs) else {
        return Err(Error::Fetch {
            word: word.to_string(),
            message: format!("invalid dictionary origin {origin:?}"),
        });
    };

    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().extend(ENTRY_PATH).push(word);
    }

    Ok(url.to_string())
}

/// Resolve an audio source against the dictionary origin.
///
/// Absolute URLs are returned unchanged. If resolution fails the input is
/// returned as-is.
#[must_use]
pub fn resolve_audio_url(src: &str, origin: &str) -> String {
    let src = src.trim();

    if src.is_empty() {
        return String::new();
    }

    let (is_abs, _) = is_absolute_url(src);
    if is_abs {
        return src.to_string();
    }

    match Url::parse(origin).and_then(|base| base.join(src)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => src.to_string(),
    }
}

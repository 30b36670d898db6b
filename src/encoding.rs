//! Character encoding detection and transcoding.
//!
//! Dictionary pages arrive as raw bytes. The charset is taken from, in
//! order: the HTTP `Content-Type` header, a byte-order mark, a `<meta>`
//! declaration in the first kilobyte. UTF-8 is the fallback.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `charset=...` inside a header value or a `<meta>` tag.
#[allow(clippy::expect_used)]
static CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"';\s>]+)"#).expect("valid regex"));

/// Match a whole `<meta ...>` tag.
#[allow(clippy::expect_used)]
static META_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<meta[^>]+>").expect("valid regex"));

/// Charset label from a `Content-Type` header value.
fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Charset declared by a `<meta>` tag in the document head.
fn charset_from_meta(html: &[u8]) -> Option<&'static Encoding> {
    // Only look at first 1024 bytes for performance
    let head = String::from_utf8_lossy(&html[..html.len().min(1024)]);
    let encoding = META_RE
        .find_iter(&head)
        .find_map(|tag| CHARSET_RE.captures(tag.as_str()))
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()));
    encoding
}

/// Detect the encoding of a fetched page.
#[must_use]
pub fn detect_encoding(html: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some(encoding) = content_type.and_then(charset_from_content_type) {
        return encoding;
    }
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }
    charset_from_meta(html).unwrap_or(UTF_8)
}

/// Decode a fetched page to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD rather than failing.
///
/// # Examples
///
/// ```
/// use rs_wordcache::encoding::decode_page;
///
/// let html = b"<html><body>Hello, World!</body></html>";
/// assert!(decode_page(html, Some("text/html; charset=utf-8")).contains("Hello, World!"));
/// ```
#[must_use]
pub fn decode_page(html: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(html, content_type);
    // decode() strips a matching BOM
    let (decoded, _encoding_used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}

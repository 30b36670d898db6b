//! Entry extraction.
//!
//! Turns a dictionary page into a [`WordEntry`]. The entry container is
//! located first; pronunciations are read from the whole page; definitions
//! are read from the container, either per sense group or, for pages
//! without sense groups, from the container as a single block.

use chrono::{DateTime, Utc};
use dom_query::Selection;
use tracing::debug;

use crate::dom;
use crate::entry::{normalize_word, stored_precision, Definition, Pronunciation, Pronunciations, WordEntry};
use crate::error::{Error, ParseFailure, Result};
use crate::options::Options;
use crate::selector::Selectors;
use crate::url_utils;

/// Extract an entry from `html`.
///
/// `requested_word` is used for the entry key (after normalization) and in
/// error messages. `source_url` is recorded as the entry's origin page.
/// Both timestamps are set to `now`, truncated to milliseconds.
///
/// # Errors
///
/// Returns [`Error::Parse`] when no entry container is found or when the
/// container yields zero definitions.
pub fn extract_entry(
    html: &str,
    requested_word: &str,
    source_url: &str,
    now: DateTime<Utc>,
    options: &Options,
) -> Result<WordEntry> {
    let now = stored_precision(now);
    let doc = dom::parse(html);
    let root = dom::root(&doc);
    let selectors = &options.selectors;

    let Some((container_selector, container)) = selectors.entry_body.resolve(&root) else {
        debug!(word = requested_word, "no entry container on page");
        return Err(Error::Parse {
            word: requested_word.to_string(),
            reason: ParseFailure::NoEntryContainer,
        });
    };
    debug!(word = requested_word, selector = container_selector, "entry container found");

    let mut pronunciations = extract_pronunciations(&root, selectors);
    if options.resolve_audio_urls {
        for pron in [&mut pronunciations.uk, &mut pronunciations.us].into_iter().flatten() {
            if let Some(src) = pron.audio_url.as_mut() {
                *src = url_utils::resolve_audio_url(src, &options.origin);
            }
        }
    }

    let definitions = extract_definitions(&container, selectors, &options.unknown_part_of_speech);
    if definitions.is_empty() {
        debug!(word = requested_word, "entry container yielded no definitions");
        return Err(Error::Parse {
            word: requested_word.to_string(),
            reason: ParseFailure::NoDefinitions,
        });
    }
    debug!(word = requested_word, count = definitions.len(), "definitions extracted");

    Ok(WordEntry {
        word: normalize_word(requested_word),
        timestamp: now,
        last_accessed: now,
        pronunciations,
        definitions,
        source_url: source_url.to_string(),
    })
}

/// UK and US pronunciations, each read from its own region container.
fn extract_pronunciations(root: &Selection, selectors: &Selectors) -> Pronunciations {
    Pronunciations {
        uk: extract_region(root, &selectors.uk_pronunciation, selectors),
        us: extract_region(root, &selectors.us_pronunciation, selectors),
    }
}

fn extract_region(root: &Selection, region: &str, selectors: &Selectors) -> Option<Pronunciation> {
    let container = dom::query_selector(root, region);
    if !container.exists() {
        return None;
    }

    let ipa = selectors.ipa.first_text(&container)?;
    let audio_url = selectors
        .audio_source
        .first(&container)
        .and_then(|source| dom::get_attribute(&source, "src"))
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty());

    Some(Pronunciation { ipa, audio_url })
}

/// Definitions in document order.
///
/// The part of speech is read once at entry level and shared by every
/// sense. Sense groups without a meaning are skipped.
fn extract_definitions(container: &Selection, selectors: &Selectors, unknown_pos: &str) -> Vec<Definition> {
    let part_of_speech = selectors
        .part_of_speech
        .first_text(container)
        .unwrap_or_else(|| unknown_pos.to_string());

    let blocks = selectors.definition_blocks.all(container);

    if blocks.is_empty() {
        return selectors
            .meaning
            .first_text(container)
            .map(|meaning| Definition {
                part_of_speech,
                level: None,
                category: None,
                meaning,
                examples: selectors.examples.all_texts(container),
            })
            .into_iter()
            .collect();
    }

    blocks
        .iter()
        .filter_map(|block| {
            let meaning = selectors.meaning.first_text(block)?;
            Some(Definition {
                part_of_speech: part_of_speech.clone(),
                level: selectors.level.first_text(block),
                category: selectors.category.first_text(block),
                meaning,
                examples: selectors.examples.all_texts(block),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::SelectorChain;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap_or_default()
    }

    fn run(html: &str, word: &str) -> Result<WordEntry> {
        extract_entry(html, word, "https://example.org/w", now(), &Options::default())
    }

    #[test]
    fn test_shared_part_of_speech_and_fallback_label() {
        let html = r#"
            <div class="entry-body">
                <div class="def-block"><div class="def">first sense</div></div>
            </div>
        "#;
        let entry = run(html, "Thing").unwrap();
        assert_eq!(entry.word, "thing");
        assert_eq!(entry.definitions[0].part_of_speech, "unknown");
        assert_eq!(entry.timestamp, now());
        assert_eq!(entry.last_accessed, now());
    }

    #[test]
    fn test_timestamps_truncated_to_millis() {
        let html = r#"<div class="entry-body"><span class="def">x</span></div>"#;
        let precise = now() + chrono::Duration::nanoseconds(456_789);
        let entry = extract_entry(html, "x", "", precise, &Options::default()).unwrap();
        assert_eq!(entry.timestamp, now());
        assert_eq!(entry.last_accessed, now());
    }

    #[test]
    fn test_custom_unknown_label() {
        let html = r#"<div class="entry-body"><span class="def">x</span></div>"#;
        let options = Options {
            unknown_part_of_speech: "n/a".to_string(),
            ..Options::default()
        };
        let entry = extract_entry(html, "x", "", now(), &options).unwrap();
        assert_eq!(entry.definitions[0].part_of_speech, "n/a");
    }

    #[test]
    fn test_blank_meaning_block_is_skipped() {
        let html = r#"
            <div class="entry-body">
                <div class="def-block"><div class="def">   </div></div>
                <div class="def-block"><div class="def">kept</div></div>
            </div>
        "#;
        let entry = run(html, "w").unwrap();
        assert_eq!(entry.definitions.len(), 1);
        assert_eq!(entry.definitions[0].meaning, "kept");
    }

    #[test]
    fn test_audio_left_relative_by_default() {
        let html = r#"
            <div class="entry-body">
                <span class="uk dpron-i"><span class="ipa">kæt</span>
                    <audio><source type="audio/mpeg" src="/media/cat.mp3"></audio></span>
                <span class="def">a small animal</span>
            </div>
        "#;
        let entry = run(html, "cat").unwrap();
        let uk = entry.pronunciations.uk.unwrap();
        assert_eq!(uk.audio_url.as_deref(), Some("/media/cat.mp3"));
    }

    #[test]
    fn test_audio_resolved_when_enabled() {
        let html = r#"
            <div class="entry-body">
                <span class="us dpron-i"><span class="ipa">kæt</span>
                    <audio><source type="audio/mpeg" src="/media/cat.mp3"></audio></span>
                <span class="def">a small animal</span>
            </div>
        "#;
        let options = Options {
            resolve_audio_urls: true,
            ..Options::default()
        };
        let entry = extract_entry(html, "cat", "", now(), &options).unwrap();
        let us = entry.pronunciations.us.unwrap();
        assert_eq!(
            us.audio_url.as_deref(),
            Some("https://dictionary.cambridge.org/media/cat.mp3")
        );
    }

    #[test]
    fn test_region_without_ipa_is_omitted() {
        let html = r#"
            <div class="entry-body">
                <span class="uk dpron-i"><audio><source type="audio/mpeg" src="/a.mp3"></audio></span>
                <span class="def">gloss</span>
            </div>
        "#;
        let entry = run(html, "w").unwrap();
        assert!(entry.pronunciations.uk.is_none());
    }

    #[test]
    fn test_new_template_variant_is_additive() {
        let html = r#"<section class="lemma"><p class="gloss">from a new template</p></section>"#;
        assert!(run(html, "w").is_err());

        let mut options = Options::default();
        options.selectors.entry_body = options.selectors.entry_body.or(".lemma");
        options.selectors.meaning = SelectorChain::new([".gloss"]).or(".def");
        let entry = extract_entry(html, "w", "", now(), &options).unwrap();
        assert_eq!(entry.definitions[0].meaning, "from a new template");
    }
}

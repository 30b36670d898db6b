//! Default selector table for the Cambridge Dictionary page layout.

use super::SelectorChain;

/// Every structural query the extractor makes.
///
/// Cascading fields are [`SelectorChain`]s. The regional pronunciation
/// containers are plain selectors because region is a hard filter rather
/// than a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// Top-level element holding one full entry.
    pub entry_body: SelectorChain,

    /// UK pronunciation container, searched over the whole page.
    pub uk_pronunciation: String,

    /// US pronunciation container, searched over the whole page.
    pub us_pronunciation: String,

    /// IPA text inside a pronunciation container.
    pub ipa: SelectorChain,

    /// Audio `<source>` inside a pronunciation container.
    pub audio_source: SelectorChain,

    /// Sense groups inside the entry.
    pub definition_blocks: SelectorChain,

    /// Entry-level part-of-speech tag.
    pub part_of_speech: SelectorChain,

    pub meaning: SelectorChain,

    pub examples: SelectorChain,

    /// Proficiency level tag inside a sense group.
    pub level: SelectorChain,

    /// Guide word heading inside a sense group.
    pub category: SelectorChain,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            entry_body: SelectorChain::new([
                ".entry-body__el",
                ".entry-body",
                ".dictionary",
                "article.entry",
                "[data-id]",
            ]),
            uk_pronunciation: ".uk.dpron-i".to_string(),
            us_pronunciation: ".us.dpron-i".to_string(),
            ipa: SelectorChain::new([".pron .ipa", ".ipa"]),
            audio_source: SelectorChain::new([
                r#"source[type="audio/mpeg"]"#,
                ".daud source",
                "audio source",
            ]),
            definition_blocks: SelectorChain::new([".def-block", ".sense-body", ".dsense"]),
            part_of_speech: SelectorChain::new([".pos", ".posgram"]),
            meaning: SelectorChain::new([".def", ".ddef_d"]),
            examples: SelectorChain::new([".examp", ".eg"]),
            level: SelectorChain::new([".epp-xref", ".def-info"]),
            category: SelectorChain::new([".def-head .guideword"]),
        }
    }
}

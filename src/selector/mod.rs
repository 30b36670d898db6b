//! Selector Infrastructure
//!
//! The dictionary's markup differs between word classes and template
//! revisions, so every structural query is an ordered list of CSS
//! candidates. A [`SelectorChain`] tries them in priority order and the first
//! candidate that matches anything wins; later candidates are never
//! consulted. New template variants are added by appending a candidate.
//!
//! All candidates must be valid CSS selectors.

use dom_query::Selection;

use crate::dom;

pub mod rules;

pub use rules::Selectors;

/// Ordered list of CSS selector candidates for one semantic field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorChain {
    candidates: Vec<String>,
}

impl SelectorChain {
    /// Build a chain from candidates in priority order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rs_wordcache::selector::SelectorChain;
    /// use rs_wordcache::dom;
    ///
    /// let chain = SelectorChain::new([".def", ".ddef_d"]);
    /// let doc = dom::parse(r#"<div><span class="ddef_d">a gloss</span></div>"#);
    ///
    /// let found = chain.first(&dom::root(&doc)).unwrap();
    /// assert_eq!(dom::trimmed_text(&found).as_deref(), Some("a gloss"));
    /// ```
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a lower-priority candidate.
    #[must_use]
    pub fn or(mut self, candidate: impl Into<String>) -> Self {
        self.candidates.push(candidate.into());
        self
    }

    /// Insert a candidate ahead of all existing ones.
    #[must_use]
    pub fn prefer(mut self, candidate: impl Into<String>) -> Self {
        self.candidates.insert(0, candidate.into());
        self
    }

    /// Candidates in priority order.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// First element of the first candidate that matches under `root`,
    /// together with the candidate that produced it.
    #[must_use]
    pub fn resolve<'a, 'c>(&'c self, root: &Selection<'a>) -> Option<(&'c str, Selection<'a>)> {
        self.candidates.iter().find_map(|candidate| {
            let found = dom::query_selector(root, candidate);
            found.exists().then(|| (candidate.as_str(), found))
        })
    }

    /// First element of the first matching candidate.
    #[must_use]
    pub fn first<'a>(&self, root: &Selection<'a>) -> Option<Selection<'a>> {
        self.resolve(root).map(|(_, found)| found)
    }

    /// Every element of the first matching candidate, in document order.
    /// Empty when no candidate matches.
    #[must_use]
    pub fn all<'a>(&self, root: &Selection<'a>) -> Vec<Selection<'a>> {
        for candidate in &self.candidates {
            let found = dom::query_selector_all(root, candidate);
            if found.exists() {
                return found.iter().collect();
            }
        }
        Vec::new()
    }

    /// Trimmed text of [`first`](Self::first), ignoring blank matches.
    #[must_use]
    pub fn first_text(&self, root: &Selection) -> Option<String> {
        self.first(root).and_then(|sel| dom::trimmed_text(&sel))
    }

    /// Trimmed, non-empty texts of [`all`](Self::all).
    #[must_use]
    pub fn all_texts(&self, root: &Selection) -> Vec<String> {
        self.all(root)
            .iter()
            .filter_map(dom::trimmed_text)
            .collect()
    }
}

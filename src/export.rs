//! Flashcard export.
//!
//! Produces an Anki text-import document: a UTF-8 BOM, import directives,
//! a column header and one tab-separated row per entry. The definitions and
//! examples cells carry HTML, so their free text is entity-escaped first;
//! fields are then CSV-quoted only when they contain a tab, newline or
//! double quote.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::entry::{normalize_word, WordEntry};

/// Most examples rendered per entry.
pub const EXAMPLE_LIMIT: usize = 5;

const BOM: char = '\u{FEFF}';

const HEADER: [&str; 4] = [
    "# separator:tab",
    "# html:true",
    "# tags:cambridge-dictionary rs-wordcache",
    "Word\tBritish Pronunciation\tAmerican Pronunciation\tDefinitions\tExamples\tSource",
];

/// Render `entries` as an import document, one row each, in the order given.
///
/// # Example
///
/// ```rust
/// let doc = rs_wordcache::export::export(&[]);
/// assert!(doc.starts_with('\u{FEFF}'));
/// assert!(doc.ends_with("Source\n"));
/// ```
#[must_use]
pub fn export(entries: &[WordEntry]) -> String {
    let mut doc = String::new();
    doc.push(BOM);
    doc.push_str(&HEADER.join("\n"));
    doc.push('\n');
    let rows: Vec<String> = entries.iter().map(format_row).collect();
    doc.push_str(&rows.join("\n"));
    doc
}

/// Export only the entries whose word is in `selected`, keeping the order
/// of `entries`.
#[must_use]
pub fn export_selected<'a, I>(entries: &[WordEntry], selected: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted: HashSet<String> = selected.into_iter().map(normalize_word).collect();
    let chosen: Vec<WordEntry> = entries
        .iter()
        .filter(|entry| wanted.contains(&entry.word))
        .cloned()
        .collect();
    export(&chosen)
}

/// Conventional file name for an export made on `date`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("anki-words-{}.csv", date.format("%Y-%m-%d"))
}

fn format_row(entry: &WordEntry) -> String {
    let uk = entry.pronunciations.uk.as_ref().map_or("", |p| p.ipa.as_str());
    let us = entry.pronunciations.us.as_ref().map_or("", |p| p.ipa.as_str());
    let definitions = format_definitions(entry);
    let examples = format_examples(entry);

    [
        entry.word.as_str(),
        uk,
        us,
        definitions.as_str(),
        examples.as_str(),
        entry.source_url.as_str(),
    ]
    .map(escape_field)
    .join("\t")
}

fn format_definitions(entry: &WordEntry) -> String {
    let senses: Vec<String> = entry
        .definitions
        .iter()
        .map(|def| {
            let mut cell = format!("<b>{}</b>", escape_html(&def.part_of_speech));
            if let Some(level) = &def.level {
                cell.push_str(&format!(" <span class=\"level\">({})</span>", escape_html(level)));
            }
            if let Some(category) = &def.category {
                cell.push_str(&format!("<br><b>{}:</b>", escape_html(category)));
            }
            cell.push_str("<br>");
            cell.push_str(&escape_html(&def.meaning));
            cell
        })
        .collect();
    senses.join("<br><br>")
}

fn format_examples(entry: &WordEntry) -> String {
    let items: String = entry
        .examples()
        .take(EXAMPLE_LIMIT)
        .map(|ex| format!("<li>{}</li>", escape_html(ex)))
        .collect();
    if items.is_empty() {
        return String::new();
    }
    format!("<ul>{items}</ul>")
}

/// Entity-escape text for an HTML-enabled flashcard field.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Quote a field only if the importer would otherwise split it.
#[must_use]
pub fn escape_field(field: &str) -> String {
    if field.contains(['\t', '\n', '"']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

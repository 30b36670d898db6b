use chrono::DateTime;
use rs_wordcache::export::export;
use rs_wordcache::{Definition, Pronunciation, Pronunciations, WordEntry};

const HEADER: &str = "\u{FEFF}# separator:tab\n# html:true\n# tags:cambridge-dictionary rs-wordcache\n\
Word\tBritish Pronunciation\tAmerican Pronunciation\tDefinitions\tExamples\tSource\n";

fn def(meaning: &str, examples: &[&str]) -> Definition {
    Definition {
        part_of_speech: "noun".into(),
        level: None,
        category: None,
        meaning: meaning.into(),
        examples: examples.iter().map(ToString::to_string).collect(),
    }
}

fn entry(word: &str, definitions: Vec<Definition>) -> WordEntry {
    let at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap_or_default();
    WordEntry {
        word: word.into(),
        timestamp: at,
        last_accessed: at,
        pronunciations: Pronunciations::default(),
        definitions,
        source_url: format!("https://dictionary.cambridge.org/dictionary/english/{word}"),
    }
}

fn fields(row: &str) -> Vec<&str> {
    row.split('\t').collect()
}

#[test]
fn export_empty_is_header_only() {
    assert_eq!(export(&[]), HEADER);
}

#[test]
fn export_single_plain_entry() {
    let mut e = entry("cat", vec![def("a small animal", &["The cat purred."])]);
    e.pronunciations = Pronunciations {
        uk: Some(Pronunciation { ipa: "kæt".into(), audio_url: Some("/uk.mp3".into()) }),
        us: Some(Pronunciation { ipa: "kæt".into(), audio_url: None }),
    };
    let doc = export(&[e]);
    let row = doc.strip_prefix(HEADER).expect("header first");
    assert_eq!(
        fields(row),
        vec![
            "cat",
            "kæt",
            "kæt",
            "<b>noun</b><br>a small animal",
            "<ul><li>The cat purred.</li></ul>",
            "https://dictionary.cambridge.org/dictionary/english/cat",
        ]
    );
}

#[test]
fn export_quotes_field_with_quote_and_tab() {
    let mut d = def("say \"hi\"\tthen leave", &[]);
    d.level = Some("B2".into());
    let doc = export(&[entry("greet", vec![d])]);
    let row = doc.strip_prefix(HEADER).expect("header first");

    // the level span introduces literal quotes, which are doubled inside
    // a quoted field; the tab from the meaning stays literal
    let expected = "\"<b>noun</b> <span class=\"\"level\"\">(B2)</span><br>say &quot;hi&quot;\tthen leave\"";
    assert!(row.contains(expected), "row was {row:?}");
    assert!(row.starts_with("greet\t\t\t\""));
}

#[test]
fn export_caps_examples_at_five_in_order() {
    let e = entry(
        "walk",
        vec![
            def("to move on foot", &["ex1", "ex2", "ex3", "ex4"]),
            def("a journey on foot", &["ex5", "ex6", "ex7"]),
        ],
    );
    let doc = export(&[e]);
    let row = doc.strip_prefix(HEADER).expect("header first");
    assert_eq!(
        fields(row)[4],
        "<ul><li>ex1</li><li>ex2</li><li>ex3</li><li>ex4</li><li>ex5</li></ul>"
    );
}

#[test]
fn export_escapes_markup_in_examples() {
    let e = entry("tag", vec![def("m", &["use <b> & <i>"])]);
    let doc = export(&[e]);
    assert!(doc.contains("<li>use &lt;b&gt; &amp; &lt;i&gt;</li>"));
}

#[test]
fn export_rows_follow_input_order_without_trailing_newline() {
    let doc = export(&[entry("one", vec![def("1", &[])]), entry("two", vec![def("2", &[])])]);
    let rows = doc.strip_prefix(HEADER).expect("header first");
    let lines: Vec<&str> = rows.split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("one\t"));
    assert!(lines[1].starts_with("two\t"));
}

#[test]
fn export_multi_sense_definitions_cell() {
    let mut first = def("to move quickly", &[]);
    first.category = Some("MOVE".into());
    let doc = export(&[entry("dash", vec![first, def("a short line", &[])])]);
    let row = doc.strip_prefix(HEADER).expect("header first");
    assert_eq!(
        fields(row)[3],
        "<b>noun</b><br><b>MOVE:</b><br>to move quickly<br><br><b>noun</b><br>a short line"
    );
}

use rs_wordcache::{extract, extract_bytes, Error, Options, ParseFailure};

const FULL_PAGE: &str = r#"
<html>
  <body>
    <div class="page">
      <div class="entry-body__el">
        <div class="pos-header">
          <span class="pos">verb</span>
          <span class="uk dpron-i">
            <span class="daud"><audio><source type="audio/mpeg" src="/media/english/uk_pron/run.mp3"></audio></span>
            <span class="pron">/<span class="ipa">rʌn</span>/</span>
          </span>
          <span class="us dpron-i">
            <span class="pron">/<span class="ipa">rʌn</span>/</span>
          </span>
        </div>
        <div class="def-block">
          <div class="def-head">
            <span class="guideword">MOVE FAST</span>
            <span class="epp-xref">A1</span>
            <div class="def">to move along, faster than walking</div>
          </div>
          <div class="def-body">
            <span class="examp">I run every morning.</span>
            <span class="examp">   </span>
            <span class="examp">She ran for the bus.</span>
          </div>
        </div>
        <div class="def-block">
          <div class="def-head"><span class="def-info">B1</span></div>
          <div class="def-body"><span class="examp">orphaned example</span></div>
        </div>
        <div class="def-block">
          <div class="def-head"><div class="def">to be in control of something</div></div>
          <div class="def-body"><span class="examp">He runs a small hotel.</span></div>
        </div>
      </div>
    </div>
  </body>
</html>
"#;

#[test]
fn extract_full_entry() {
    let entry = match extract(FULL_PAGE, " Run ") {
        Ok(entry) => entry,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(entry.word, "run");
    assert_eq!(entry.source_url, "https://dictionary.cambridge.org/dictionary/english/run");
    assert_eq!(entry.timestamp, entry.last_accessed);

    let uk = entry.pronunciations.uk.as_ref().expect("uk pronunciation");
    assert_eq!(uk.ipa, "rʌn");
    assert_eq!(uk.audio_url.as_deref(), Some("/media/english/uk_pron/run.mp3"));
    let us = entry.pronunciations.us.as_ref().expect("us pronunciation");
    assert_eq!(us.ipa, "rʌn");
    assert_eq!(us.audio_url, None);
}

#[test]
fn extract_skips_block_without_meaning() {
    let entry = extract(FULL_PAGE, "run").expect("entry");
    assert_eq!(entry.definitions.len(), 2);

    let first = &entry.definitions[0];
    assert_eq!(first.part_of_speech, "verb");
    assert_eq!(first.level.as_deref(), Some("A1"));
    assert_eq!(first.category.as_deref(), Some("MOVE FAST"));
    assert_eq!(first.meaning, "to move along, faster than walking");
    assert_eq!(first.examples, vec!["I run every morning.", "She ran for the bus."]);

    let second = &entry.definitions[1];
    assert_eq!(second.part_of_speech, "verb");
    assert_eq!(second.level, None);
    assert_eq!(second.category, None);
    assert_eq!(second.examples, vec!["He runs a small hotel."]);
}

#[test]
fn extract_without_blocks_uses_direct_meaning() {
    let html = r#"
        <article class="entry">
            <span class="posgram">adjective</span>
            <span class="ddef_d">pleasantly warm</span>
            <span class="eg">a balmy evening</span>
            <span class="eg">balmy weather</span>
        </article>
    "#;
    let entry = extract(html, "balmy").expect("entry");
    assert_eq!(entry.definitions.len(), 1);
    let def = &entry.definitions[0];
    assert_eq!(def.part_of_speech, "adjective");
    assert_eq!(def.meaning, "pleasantly warm");
    assert_eq!(def.examples, vec!["a balmy evening", "balmy weather"]);
    assert!(entry.pronunciations.is_empty());
}

#[test]
fn extract_container_priority_beats_document_order() {
    let html = r#"
        <div class="dictionary">
            <span class="def">outer sense</span>
            <div class="entry-body__el"><span class="def">inner sense</span></div>
        </div>
        <div class="entry-body__el"><span class="def">second entry</span></div>
    "#;
    let entry = extract(html, "w").expect("entry");
    assert_eq!(entry.definitions.len(), 1);
    assert_eq!(entry.definitions[0].meaning, "inner sense");
}

#[test]
fn extract_falls_back_to_data_id_container() {
    let html = r#"<div data-id="cald4"><span class="def">found via data-id</span></div>"#;
    let entry = extract(html, "w").expect("entry");
    assert_eq!(entry.definitions[0].meaning, "found via data-id");
}

#[test]
fn extract_fails_without_container() {
    let err = extract("<html><body><p>Search results</p></body></html>", "Blorft").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse { ref word, reason: ParseFailure::NoEntryContainer } if word == "Blorft"
    ));
    assert_eq!(err.to_string(), "Could not parse dictionary entry for \"Blorft\"");
}

#[test]
fn extract_fails_with_zero_definitions() {
    let html = r#"
        <div class="entry-body">
            <span class="pos">noun</span>
            <div class="def-block"><span class="examp">no gloss here</span></div>
            <div class="def-block"><span class="epp-xref">C2</span></div>
        </div>
    "#;
    let err = extract(html, "Glimmer").unwrap_err();
    assert!(matches!(err, Error::Parse { reason: ParseFailure::NoDefinitions, .. }));
    assert_eq!(err.to_string(), "No definitions found for \"Glimmer\"");
}

#[test]
fn extract_does_not_panic_on_malformed_html() {
    for html in ["", "<div class=\"entry-body", "<p><div></p></div>", "&amp text &lt;"] {
        let result = extract(html, "w");
        assert!(matches!(result, Err(Error::Parse { .. })), "html {html:?}");
    }
}

#[test]
fn extract_bytes_decodes_latin1() {
    let html = b"<meta charset=\"ISO-8859-1\"><div class=\"entry-body\"><span class=\"def\">caf\xE9 culture</span></div>";
    let entry = extract_bytes(html, None, "cafe", &Options::default()).expect("entry");
    assert_eq!(entry.definitions[0].meaning, "café culture");
}

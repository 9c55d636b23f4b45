use email_clean::*;

// --- normalize ---

#[test]
fn test_normalize_html_email() {
    let raw = "<html><head><style>.x { color: red; }</style></head><body>\
               <p>Hej Lars,</p><p>Motorn &auml;r klar. Pris: 1&nbsp;200 kr</p><br>Mvh<br>Thomas\
               </body></html>";

    assert_eq!(
        normalize(Some(raw)),
        "Hej Lars,\n\nMotorn är klar. Pris: 1 200 kr\n\nMvh\nThomas"
    );
}

#[test]
fn test_normalize_quoted_printable_mojibake() {
    assert_eq!(
        normalize(Some("Hej! B=C3=A5ten =C3=A4r klar.")),
        "Hej! Båten är klar."
    );
}

#[test]
fn test_normalize_quoted_printable_uppercase_and_punctuation() {
    assert_eq!(
        normalize(Some("=C3=85ke =C3=84nglund =C3=96stra b=C3=A5t")),
        "Åke Änglund Östra båt"
    );
    assert_eq!(normalize(Some("it=E2=80=99s")), "it’s");
}

#[test]
fn test_normalize_entity_mojibake() {
    assert_eq!(normalize(Some("G&Atilde;&yen;r det bra?")), "Går det bra?");
}

#[test]
fn test_normalize_whitespace() {
    assert_eq!(normalize(Some("  a \t  b\r\n\r\n\r\n\r\nc  ")), "a b\n\nc");
}

#[test]
fn test_normalize_none() {
    assert_eq!(normalize(None), "");
}

#[test]
fn test_normalize_does_not_reflow_by_default() {
    assert_eq!(normalize(Some("Tack. Vi ses")), "Tack. Vi ses");
}

// --- clean_body ---

#[test]
fn test_clean_body_keeps_latest_reply() {
    let raw = "Hej Thomas,\n\nJag kan lämna in båten på måndag morgon om det passar er.\n\n\
               Mvh Lars\nSkickat från min iPhone\n\n\
               Den fre 9 jan. 2026 10:02 Thomas skrev:\n> Hej, när kan du lämna in båten?";

    assert_eq!(
        clean_body(raw),
        "Hej Thomas,\n\nJag kan lämna in båten på måndag morgon om det passar er.\n\nMvh Lars"
    );
}

#[test]
fn test_clean_body_drops_quoted_lines() {
    let raw = "Ja, det går bra att komma på onsdag efter lunch.\n> Passar onsdag?\nVi ses då.";

    assert_eq!(
        clean_body(raw),
        "Ja, det går bra att komma på onsdag efter lunch.\nVi ses då."
    );
}

#[test]
fn test_clean_body_salvages_short_reply() {
    let raw = "Ok!\n\nDen mån 12 jan. 2026 18:13 Lars Johansson skrev:\n> Kan du komma på tisdag?";

    assert_eq!(
        clean_body(raw),
        "Ok!\nDen mån 12 jan. 2026 18:13 Lars Johansson skrev:"
    );
}

#[test]
fn test_clean_body_strict_skips_salvage() {
    let pipeline = Pipeline::new(PipelineOptions::strict()).unwrap();
    let raw = "Ok!\n\nDen mån 12 jan. 2026 18:13 Lars Johansson skrev:\n> Kan du komma på tisdag?";

    assert_eq!(pipeline.clean_body(raw), "Ok!");
}

#[test]
fn test_clean_body_salvage_truncates() {
    let options = PipelineOptions {
        salvage_max_chars: 10,
        ..PipelineOptions::default()
    };
    let pipeline = Pipeline::new(options).unwrap();

    assert_eq!(pipeline.clean_body("Ok\nLars skrev:"), "Ok\nLars sk");
}

#[test]
fn test_clean_body_only_quotes_falls_back_to_text() {
    assert_eq!(clean_body("> bara citat"), "> bara citat");
}

#[test]
fn test_clean_body_empty() {
    assert_eq!(clean_body(""), "");
}

// --- condense ---

#[test]
fn test_condense_flattens() {
    assert_eq!(condense("Hej!\nHur går det?"), "Hej! Hur går det?");
}

#[test]
fn test_condense_truncates_with_ellipsis() {
    let raw = "Motorn hackar vid högt varvtal. ".repeat(30);
    let condensed = condense(&raw);

    assert!(condensed.ends_with("..."));
    assert!(condensed.chars().count() <= 503);
    assert!(!condensed.contains('\n'));
}

#[test]
fn test_condense_empty_placeholder() {
    assert_eq!(condense(""), DEFAULT_EMPTY_PLACEHOLDER);
    assert_eq!(condense("   \n  "), DEFAULT_EMPTY_PLACEHOLDER);
}

// --- preview ---

#[test]
fn test_preview_truncates_on_char_boundary() {
    let raw = "å".repeat(400);
    let preview = preview(&raw);

    assert_eq!(preview.chars().count(), 300);
}

#[test]
fn test_preview_strips_markup() {
    assert_eq!(preview("<p>Hej</p>"), "Hej");
}

// --- reflow ---

#[test]
fn test_reflow_sentences() {
    let pipeline = Pipeline::new(PipelineOptions::readable()).unwrap();

    assert_eq!(
        pipeline.normalize("Tack för senast. Vi ses på fredag. Mvh Thomas"),
        "Tack för senast.\n\nVi ses på fredag.\n\nMvh Thomas"
    );
}

#[test]
fn test_reflow_keywords() {
    let pipeline = Pipeline::new(PipelineOptions::readable()).unwrap();

    assert_eq!(
        pipeline.reflow("Tack för hjälpen mvh Thomas"),
        "Tack för hjälpen\n\nmvh Thomas"
    );
    assert_eq!(pipeline.reflow("Mvh Thomas"), "Mvh Thomas");
}

#[test]
fn test_reflow_keeps_existing_line_starts() {
    let pipeline = Pipeline::new(PipelineOptions::readable()).unwrap();
    assert_eq!(pipeline.reflow("Tack\nMvh Thomas"), "Tack\nMvh Thomas");
}

// --- Locales ---

#[test]
fn test_custom_locale() {
    let german = CustomLocale::new("de")
        .marker("de-attribution", r"(?im)^Am\s.*schrieb.*:")
        .signature("Von meinem iPhone gesendet");
    let pipeline = Pipeline::with_locales(PipelineOptions::default(), &[&german, &Generic]).unwrap();

    let raw = "Danke, das Boot läuft wieder einwandfrei nach dem Service.\n\
               Von meinem iPhone gesendet\n\n\
               Am 12.01.2026 um 18:13 schrieb Lars:\n> Wie läuft der Motor?";
    let parts = pipeline.split(raw);

    assert_eq!(parts.main, "Danke, das Boot läuft wieder einwandfrei nach dem Service.");
    assert!(parts.history.starts_with("Am 12.01.2026 um 18:13 schrieb Lars:"));
    assert!(parts.history.contains("Wie läuft der Motor?"));
}

#[test]
fn test_locale_without_markers_never_splits() {
    let empty = CustomLocale::new("none");
    let pipeline = Pipeline::with_locales(PipelineOptions::default(), &[&empty]).unwrap();

    assert!(pipeline.markers().is_empty());
    assert_eq!(pipeline.split("text\n\nwrote: something long enough").history, "");
}

#[test]
fn test_invalid_marker_pattern() {
    let broken = CustomLocale::new("broken").marker("bad", "(unclosed");
    let err = Pipeline::with_locales(PipelineOptions::default(), &[&broken]).unwrap_err();

    assert!(matches!(err, ParseError::InvalidPattern { ref name, .. } if name == "bad"));
}

#[test]
fn test_builtin_locale_names() {
    let names: Vec<&str> = DEFAULT_LOCALES.iter().map(|l| l.name()).collect();
    assert_eq!(names, ["sv", "en", "generic"]);
}

// --- Sharing ---

#[test]
fn test_pipeline_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Pipeline>();

    let pipeline = &Pipeline::new(PipelineOptions::default()).unwrap();
    let raws = ["Hej&aring;", "B=C3=A5t", "<b>fet</b>"];

    let results: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = raws
            .iter()
            .map(|raw| s.spawn(move || pipeline.normalize(raw)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, ["Hejå", "Båt", "fet"]);
}

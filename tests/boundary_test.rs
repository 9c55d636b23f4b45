use email_clean::*;

const SWEDISH_REPLY: &str = "Hej Thomas, motorn går som den ska nu, tack så mycket.\n\n\
                             Den mån 12 jan. 2026 18:13 Lars skrev:\n> gammalt innehåll";

fn filler(chars: usize) -> String {
    "a".repeat(chars)
}

// --- Marker rules ---

#[test]
fn test_swedish_weekday_date() {
    let boundary = find_quote_boundary(SWEDISH_REPLY).unwrap();
    assert_eq!(boundary.offset, SWEDISH_REPLY.find("Den mån").unwrap());
    assert_eq!(boundary.marker, "sv-weekday-date");
}

#[test]
fn test_swedish_month_date_before_timezone() {
    let text = format!(
        "{}\n\n12 januari 2026, 14:23 centraleuropeisk normaltid, Lars skrev:\n> hej",
        filler(60)
    );
    let boundary = find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.marker, "sv-month-date");
    assert_eq!(boundary.offset, 62);
}

#[test]
fn test_swedish_attribution() {
    let text = format!("{}\nLars Johansson <lars@example.se> skrev:\nhej", filler(60));
    let boundary = find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.marker, "sv-attribution");
}

#[test]
fn test_english_date_header() {
    let text = format!("{}\n\nOn Wed, Jan 3, 2024 at 9:15 AM Anna wrote:\n> hi", filler(60));
    let boundary = find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.marker, "en-date");
    assert_eq!(boundary.offset, 62);
}

#[test]
fn test_english_attribution() {
    let text = format!("{}\nAnna Berg wrote:\nold", filler(60));
    let boundary = find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.marker, "en-attribution");
}

#[test]
fn test_original_message_banner() {
    let text = format!(
        "{}\n-----Original Message-----\nFrom: anna@example.com\nold",
        filler(60)
    );
    let boundary = find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.marker, "original-message");
    assert_eq!(boundary.offset, 61);
}

#[test]
fn test_original_message_banner_case_insensitive() {
    let text = format!("{}\n--- original message ---\nold", filler(60));
    let boundary = find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.marker, "original-message");
}

#[test]
fn test_nested_quote_line() {
    let text = format!("{}\n>> older reply", filler(60));
    let boundary = find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.marker, "nested-quote");
    assert_eq!(boundary.offset, 61);
}

#[test]
fn test_leaked_from_header() {
    let text = format!("{}\nFrom: Anna <anna@example.com>\nSent: Monday", filler(60));
    let boundary = find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.marker, "header-from");
}

#[test]
fn test_no_markers() {
    assert!(find_quote_boundary("Hej!\n\nKan ni se över min utombordare nästa vecka?").is_none());
    assert!(find_quote_boundary("").is_none());
}

// --- Selection ---

#[test]
fn test_earliest_marker_wins() {
    let text = format!(
        "{}\nAnna wrote:\nsome text\nOn Wed, Jan 3, 2024 at 9:15 AM",
        filler(60)
    );
    let boundary = find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.marker, "en-attribution");
}

#[test]
fn test_tie_goes_to_earlier_rule() {
    let locale = CustomLocale::new("test")
        .marker("first", "Quoted:")
        .marker("second", "Quo");
    let pipeline = Pipeline::with_locales(PipelineOptions::default(), &[&locale]).unwrap();

    let text = format!("{}\nQuoted: old", filler(60));
    let boundary = pipeline.find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.marker, "first");
}

#[test]
fn test_only_first_match_of_a_rule_counts() {
    // The early "skrev:" is ineligible and hides the later one.
    let text = format!("Han skrev: motorn tjuvstannar.\n{}\nLars skrev:\nold", filler(60));
    assert!(find_quote_boundary(&text).is_none());
}

// --- Offset threshold ---

#[test]
fn test_marker_at_char_50_is_ignored() {
    let text = format!("{}wrote: old message", filler(50));
    assert!(find_quote_boundary(&text).is_none());
}

#[test]
fn test_marker_at_char_51_is_accepted() {
    let text = format!("{}wrote: old message", filler(51));
    let boundary = find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.char_index, 51);
    assert_eq!(boundary.offset, 51);
}

#[test]
fn test_threshold_counts_characters_not_bytes() {
    // 30 two-byte characters: byte offset 60, character index 30.
    let text = format!("{}wrote: old message", "å".repeat(30));
    assert!(find_quote_boundary(&text).is_none());
}

#[test]
fn test_threshold_is_configurable() {
    let options = PipelineOptions {
        min_boundary_offset: 5,
        ..PipelineOptions::default()
    };
    let pipeline = Pipeline::new(options).unwrap();

    let boundary = pipeline.find_quote_boundary("Tack!\nAnna wrote:\nold").unwrap();
    assert_eq!(boundary.marker, "en-attribution");
}

// --- Quoted lines ---

#[test]
fn test_quoted_line_supersedes_later_marker() {
    let text = "Hej,\nrad två\nrad tre\nrad fyra\n> citerad rad\n\
                mer text som är ganska lång här, Anna wrote: x";
    let boundary = find_quote_boundary(text).unwrap();
    assert_eq!(boundary.marker, QUOTED_LINE_MARKER);
    assert_eq!(boundary.offset, text.find("> citerad").unwrap());
}

#[test]
fn test_quoted_line_in_first_four_lines_ignored() {
    assert!(find_quote_boundary("Hej\n> kort citat\nsvar").is_none());
    assert!(find_quote_boundary("a\nb\nc\n> fjärde raden").is_none());
}

#[test]
fn test_quoted_line_with_leading_space() {
    let text = "a\nb\nc\nd\n   > indraget citat";
    let boundary = find_quote_boundary(text).unwrap();
    assert_eq!(boundary.offset, 8);
}

#[test]
fn test_marker_before_quoted_line_kept() {
    let text = format!("{}\nAnna wrote:\n\n\n\n> old", filler(60));
    let boundary = find_quote_boundary(&text).unwrap();
    assert_eq!(boundary.marker, "en-attribution");
}

#[test]
fn test_marker_table_order() {
    let names: Vec<&str> = default_pipeline().markers().names().collect();
    assert_eq!(
        names,
        [
            "sv-weekday-date",
            "sv-month-date",
            "sv-timezone",
            "sv-attribution",
            "en-date",
            "en-attribution",
            "original-message",
            "nested-quote",
            "header-from",
        ]
    );
}

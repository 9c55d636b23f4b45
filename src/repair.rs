//! Stage 2: mojibake repair
//!
//! UTF-8 text that was decoded as Windows-1252/Latin-1 somewhere upstream
//! turns `å` into `Ã¥`, `’` into `â€™` and so on. The table below maps the
//! artifacts seen in Nordic mail back to the intended character.
//!
//! When the bytes went through strict Latin-1 instead, the second byte of
//! `Å`, `Ä`, `Ö` and of most punctuation lands in the C1 control range
//! (`Ã\u{85}` rather than `Ã…`). Both forms are listed.
//!
//! Table order matters. A pattern that is a prefix of another must come after
//! it, so the bare `Ã` and `â€` fallbacks close their groups.

use std::borrow::Cow;

/// Ordered `(artifact, replacement)` pairs
///
/// Curly-quote artifacts are repaired to ASCII `'` and `"`, not to `’` and
/// `”`. This is intentional and covered by tests; repaired text only ever
/// carries straight quotes.
pub const MOJIBAKE_TABLE: &[(&str, &str)] = &[
    // Swedish and Nordic letters
    ("Ã¥", "å"),
    ("Ã¤", "ä"),
    ("Ã¶", "ö"),
    ("Ã…", "Å"),
    ("Ã„", "Ä"),
    ("Ã–", "Ö"),
    ("Ã¦", "æ"),
    ("Ã¸", "ø"),
    ("Ã†", "Æ"),
    ("Ã˜", "Ø"),
    ("Ã¼", "ü"),
    ("Ãœ", "Ü"),
    ("Ã\u{85}", "Å"),
    ("Ã\u{84}", "Ä"),
    ("Ã\u{96}", "Ö"),
    ("Ã\u{86}", "Æ"),
    ("Ã\u{98}", "Ø"),
    ("Ã\u{9c}", "Ü"),
    // Latin accented letters
    ("Ã©", "é"),
    ("Ã‰", "É"),
    ("Ã\u{89}", "É"),
    ("Ã\u{88}", "È"),
    ("Ã¨", "è"),
    ("Ã¡", "á"),
    ("Ã\u{ad}", "í"),
    ("Ã³", "ó"),
    ("Ãº", "ú"),
    ("Ã\u{a0}", "à"),
    ("Ã", "à"),
    // Typographic punctuation
    ("â€™", "'"),
    ("â€˜", "'"),
    ("â€œ", "\""),
    ("â€\u{9d}", "\""),
    ("â€“", "–"),
    ("â€\"", "–"),
    ("â€”", "—"),
    ("â€¦", "…"),
    ("â\u{80}\u{99}", "'"),
    ("â\u{80}\u{98}", "'"),
    ("â\u{80}\u{9c}", "\""),
    ("â\u{80}\u{9d}", "\""),
    ("â\u{80}\u{93}", "–"),
    ("â\u{80}\u{94}", "—"),
    ("â\u{80}\u{a6}", "…"),
    ("â€", "\""),
    // Non-breaking space lead byte
    ("Â", ""),
    // Double-mangled letters
    ("å€¦", "å"),
    ("å€¡", "ä"),
    ("å€", "ö"),
    // Replacement character and block/box artifacts
    ("\u{fffd}", ""),
    ("\u{2630}", ""),
    ("\u{2593}", ""),
    ("\u{2592}", ""),
    ("\u{2591}", ""),
    ("\u{2588}", ""),
];

/// Apply an ordered replacement table
///
/// Each pair is applied globally in one left-to-right pass before moving on to
/// the next pair. Replaced output is never rescanned by the same pair.
#[must_use]
pub fn apply_replacements(text: &str, table: &[(&str, &str)]) -> String {
    let mut fixed = Cow::Borrowed(text);

    for &(wrong, right) in table {
        if fixed.contains(wrong) {
            fixed = Cow::Owned(fixed.replace(wrong, right));
        }
    }

    fixed.into_owned()
}

/// Repair common double-encoding artifacts
#[must_use]
pub fn repair_encoding(text: &str) -> String {
    apply_replacements(text, MOJIBAKE_TABLE)
}

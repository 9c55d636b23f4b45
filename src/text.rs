//! Small whitespace and truncation helpers shared by the stages

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").unwrap());

static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x{a0}]{2,}|[\t\x{a0}]").unwrap());

/// Collapse runs of three or more newlines (blank lines may hold spaces) to two
pub fn collapse_blank_lines(text: &str) -> Cow<'_, str> {
    BLANK_RUN.replace_all(text, "\n\n")
}

/// Collapse runs of spaces, tabs and non-breaking spaces to a single space
pub fn collapse_spaces(text: &str) -> Cow<'_, str> {
    HORIZONTAL_SPACE.replace_all(text, " ")
}

/// Flatten all whitespace, newlines included, to single spaces
pub fn flatten_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Take at most `max` characters from the front of `s`
pub fn truncate_chars(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(idx, _)| &s[..idx])
}

/// Number of characters before byte offset `idx`
pub fn char_index(s: &str, idx: usize) -> usize {
    s[..idx].chars().count()
}

/// Convert `\r\n` and lone `\r` to `\n`
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

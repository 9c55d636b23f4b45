//! Stage 1: transfer-encoding and entity decoding
//!
//! Quoted-printable escapes are decoded first, HTML entities second. Both must
//! be done before mojibake repair, whose table is written against the decoded
//! characters.
//!
//! Adjacent quoted-printable escapes form one byte run, decoded as UTF-8:
//! `=C3=85` becomes `Å`. Bytes that are not part of a valid UTF-8 sequence
//! fall back to Latin-1, so `=E5` alone still becomes `å`.
//!
//! Entities are decoded until the text stops changing, so `&amp;gt;` ends up
//! as `>` and decoding already-decoded text is a no-op.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Upper bound on entity decoding passes
const MAX_ENTITY_PASSES: usize = 8;

// A run of escapes and soft breaks, matched whole so a decoded `=` (from
// `=3D`) is never re-read.
static QP_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:=(?:[0-9A-Fa-f]{2}|\r?\n))+").unwrap());

/// Decode quoted-printable escapes and soft line breaks
///
/// Malformed escapes such as `=ZZ` are left as they are.
pub fn decode_quoted_printable(text: &str) -> Cow<'_, str> {
    if !text.contains('=') {
        return Cow::Borrowed(text);
    }

    QP_RUN.replace_all(text, |caps: &Captures| decode_qp_run(&caps[0]))
}

fn decode_qp_run(run: &str) -> String {
    let bytes: Vec<u8> = run
        .split('=')
        .filter_map(|escape| u8::from_str_radix(escape.get(..2)?, 16).ok())
        .collect();

    let mut decoded = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        decoded.push_str(chunk.valid());
        decoded.extend(chunk.invalid().iter().copied().map(char::from));
    }
    decoded
}

/// Decode HTML named and numeric character references
///
/// Uses the full HTML5 named entity table. A single pass; see [`decode`] for
/// nested escapes.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    html_escape::decode_html_entities(text)
}

/// Full decoding stage: quoted-printable, then entities until stable
#[must_use]
pub fn decode(raw: &str) -> String {
    let mut text = decode_quoted_printable(raw).into_owned();

    for _ in 0..MAX_ENTITY_PASSES {
        let next = decode_entities(&text);
        if next == text {
            break;
        }
        text = next.into_owned();
    }

    text
}

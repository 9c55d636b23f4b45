//! Stage 3: markup stripping
//!
//! This is not an HTML parser. It removes the blocks that never carry message
//! text, turns line-level tags into newlines and drops everything else that
//! looks like a tag. A `<` with no `>` before the next `<` stays as text.

use regex::Regex;
use std::sync::LazyLock;

static HIDDEN_BLOCKS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap(),
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap(),
        Regex::new(r"(?is)<head\b[^>]*>.*?</head\s*>").unwrap(),
        Regex::new(r"(?s)<!--.*?-->").unwrap(),
    ]
});

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\b[^<>]*>").unwrap());

static BLOCK_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(?:p|div|h[1-6]|li|tr)\s*>").unwrap());

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<>]*>").unwrap());

/// Strip markup, keeping line structure
#[must_use]
pub fn strip_markup(text: &str) -> String {
    if !text.contains('<') {
        return text.to_string();
    }

    let mut stripped = text.to_string();
    for block in HIDDEN_BLOCKS.iter() {
        if block.is_match(&stripped) {
            stripped = block.replace_all(&stripped, "").into_owned();
        }
    }

    let stripped = LINE_BREAK.replace_all(&stripped, "\n");
    let stripped = BLOCK_END.replace_all(&stripped, "\n\n");
    ANY_TAG.replace_all(&stripped, "").into_owned()
}

//! Stage 5: splitting at the quote boundary and cleaning both halves

use crate::boundary::{MarkerTable, QuoteBoundary};
use crate::error::{ParseError, Result};
use crate::locale::Locale;
use crate::options::PipelineOptions;
use crate::text::{collapse_blank_lines, truncate_chars};
use crate::types::MessageParts;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

/// Characters kept when even the salvage excerpt comes up empty
const SALVAGE_FALLBACK_CHARS: usize = 200;

static STRAY_QUOTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*>\s*>").unwrap());

/// Client-added signature lines ("Sent from my iPhone")
#[derive(Debug, Clone)]
pub struct Boilerplate {
    trailer: Option<Regex>,
    prefixes: Vec<String>,
}

impl Boilerplate {
    pub fn from_locales(locales: &[&dyn Locale]) -> Result<Self> {
        let prefixes: Vec<&str> = locales
            .iter()
            .flat_map(|l| l.signature_prefixes())
            .map(|p| &**p)
            .filter(|p| !p.trim().is_empty())
            .collect();

        let trailer = if prefixes.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = prefixes.iter().map(|p| regex::escape(p)).collect();
            let pattern = format!(r"(?i)\n\s*(?:{}).*", alternatives.join("|"));
            Some(Regex::new(&pattern).map_err(|e| ParseError::InvalidPattern {
                name: "signature".into(),
                details: e.to_string(),
            })?)
        };

        Ok(Self {
            trailer,
            prefixes: prefixes.iter().map(|p| p.to_lowercase()).collect(),
        })
    }

    /// Remove every signature line that follows a line break
    #[must_use]
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.trailer {
            Some(trailer) => trailer.replace_all(text, ""),
            None => Cow::Borrowed(text),
        }
    }

    /// Whether a trimmed line is a signature line
    #[must_use]
    pub fn is_signature_line(&self, trimmed: &str) -> bool {
        let lower = trimmed.to_lowercase();
        self.prefixes.iter().any(|p| lower.starts_with(p.as_str()))
    }
}

/// Clean the part of the message written by the sender
pub(crate) fn clean_main(main: &str, boilerplate: &Boilerplate) -> String {
    let stripped = boilerplate.strip(main);
    collapse_blank_lines(&stripped).trim().to_string()
}

/// Drop one leading `>` (and one space after it) from a line
fn unquote_line(line: &str) -> &str {
    line.strip_prefix('>')
        .map_or(line, |rest| rest.strip_prefix(' ').unwrap_or(rest))
}

/// Clean quoted history; short leftovers are noise and come back empty
pub(crate) fn clean_history(history: &str, options: &PipelineOptions) -> String {
    if history.trim().is_empty() {
        return String::new();
    }

    let unquoted = history.split('\n').map(unquote_line).collect::<Vec<_>>().join("\n");
    let cleaned = collapse_blank_lines(&unquoted).trim().to_string();

    if cleaned.chars().count() <= options.min_history_chars {
        debug!("Discarding {} char history as noise", cleaned.chars().count());
        return String::new();
    }

    cleaned
}

/// Split normalized text at `boundary` and clean both halves
#[must_use]
pub fn split_at(
    text: &str,
    boundary: Option<&QuoteBoundary>,
    boilerplate: &Boilerplate,
    options: &PipelineOptions,
) -> MessageParts {
    let cut = boundary.map_or(text.len(), |b| b.offset);
    let (main, history) = text.split_at(cut);

    MessageParts {
        main: clean_main(main, boilerplate),
        history: clean_history(history, options),
    }
}

/// Line filter used by `clean_body`
///
/// Skips quoted and signature lines, and stops at the first line that opens
/// with a quote marker.
pub(crate) fn filter_reply_lines(
    main: &str,
    markers: &MarkerTable,
    boilerplate: &Boilerplate,
) -> String {
    let mut kept = Vec::new();
    let mut found_content = false;

    for line in main.split('\n') {
        let trimmed = line.trim();

        if !found_content && trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('>') {
            continue;
        }
        if markers.starts_line(trimmed) {
            break;
        }
        if boilerplate.is_signature_line(trimmed) {
            continue;
        }

        found_content = true;
        kept.push(line);
    }

    let joined = kept.join("\n");
    let cleaned = STRAY_QUOTES.replace_all(&joined, " ");
    collapse_blank_lines(&cleaned).trim().to_string()
}

/// Excerpt of the first unquoted lines, for bodies that were over-trimmed
pub(crate) fn salvage(text: &str, options: &PipelineOptions) -> String {
    debug!("Body cleaned to almost nothing, using salvage excerpt");

    let excerpt = text
        .split('\n')
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('>')
        })
        .take(options.salvage_line_count)
        .collect::<Vec<_>>()
        .join("\n");

    let excerpt = truncate_chars(&excerpt, options.salvage_max_chars).trim();
    if excerpt.is_empty() {
        truncate_chars(text, SALVAGE_FALLBACK_CHARS).trim().to_string()
    } else {
        excerpt.to_string()
    }
}

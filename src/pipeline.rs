//! The full cleaning pipeline
//!
//! 1. **Decode** - quoted-printable escapes, then HTML entities
//! 2. **Repair** - mojibake replacement table
//! 3. **Strip** - markup removal, line tags to newlines
//! 4. **Detect** - earliest quote-boundary marker
//! 5. **Split** - cut at the boundary, clean main and history
//!
//! A [`Pipeline`] is immutable once built and can be shared between threads.
//! The free functions at the crate root use a default pipeline with the
//! Swedish, English and generic rule sets.

use crate::boundary::{self, MarkerTable, QuoteBoundary};
use crate::decode::decode;
use crate::error::{ParseError, Result};
use crate::locale::{DEFAULT_LOCALES, Locale};
use crate::markup::strip_markup;
use crate::options::PipelineOptions;
use crate::repair::repair_encoding;
use crate::sender::raw_display_name;
use crate::split::{self, Boilerplate};
use crate::text::{
    collapse_blank_lines, collapse_spaces, flatten_whitespace, normalize_line_endings,
    truncate_chars,
};
use crate::types::MessageParts;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Re-split passes `split` makes before returning
const MAX_SETTLE_PASSES: usize = 4;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s+([A-ZÅÄÖ])").unwrap());

static DEFAULT_PIPELINE: LazyLock<Pipeline> = LazyLock::new(|| {
    Pipeline::new(PipelineOptions::default()).expect("built-in locale rules compile")
});

/// The pipeline built from default options and locales
#[must_use]
pub fn default_pipeline() -> &'static Pipeline {
    &DEFAULT_PIPELINE
}

/// Configured email-body cleaner
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: PipelineOptions,
    markers: MarkerTable,
    boilerplate: Boilerplate,
    paragraph_starts: Option<Regex>,
}

impl Pipeline {
    /// Build a pipeline with the default locales
    pub fn new(options: PipelineOptions) -> Result<Self> {
        Self::with_locales(options, DEFAULT_LOCALES)
    }

    /// Build a pipeline from explicit locales, in priority order
    pub fn with_locales(options: PipelineOptions, locales: &[&dyn Locale]) -> Result<Self> {
        let markers = MarkerTable::from_locales(locales)?;
        let boilerplate = Boilerplate::from_locales(locales)?;
        let paragraph_starts = compile_keywords(locales)?;

        debug!(
            "Built pipeline with {} quote markers from {} locales",
            markers.len(),
            locales.len()
        );

        Ok(Self {
            options,
            markers,
            boilerplate,
            paragraph_starts,
        })
    }

    #[must_use]
    pub const fn options(&self) -> &PipelineOptions {
        &self.options
    }

    #[must_use]
    pub const fn markers(&self) -> &MarkerTable {
        &self.markers
    }

    /// Decode, repair and strip a raw body into clean text
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let decoded = decode(raw);
        let decoded = normalize_line_endings(&decoded);
        let repaired = repair_encoding(&decoded);
        let stripped = strip_markup(&repaired);
        let spaced = collapse_spaces(&stripped);

        if self.options.reflow {
            let reflowed = self.reflow(&spaced);
            collapse_blank_lines(&reflowed).trim().to_string()
        } else {
            collapse_blank_lines(&spaced).trim().to_string()
        }
    }

    /// Locate the start of quoted content in already-normalized text
    #[must_use]
    pub fn find_quote_boundary(&self, text: &str) -> Option<QuoteBoundary> {
        boundary::find_quote_boundary(text, &self.markers, &self.options)
    }

    /// Split already-normalized text into main and history
    #[must_use]
    pub fn split_and_clean(&self, text: &str) -> MessageParts {
        let boundary = self.find_quote_boundary(text);
        split::split_at(text, boundary.as_ref(), &self.boilerplate, &self.options)
    }

    /// Normalize a raw body and split it into main and history
    ///
    /// The returned main part splits again with no history.
    #[must_use]
    pub fn split(&self, raw: &str) -> MessageParts {
        let mut parts = self.split_and_clean(&self.normalize(raw));

        // A second escape layer in main (`=3D3E` -> `=3E` -> `>`) only decodes
        // on the next normalize; move what it uncovers into history.
        for _ in 0..MAX_SETTLE_PASSES {
            let again = self.split_and_clean(&self.normalize(&parts.main));
            if again.history.is_empty() {
                break;
            }

            debug!("Main part split again, {} chars moved to history", again.history.len());
            parts.history = if parts.history.is_empty() {
                again.history
            } else {
                format!("{}\n\n{}", again.history, parts.history)
            };
            parts.main = again.main;
        }

        parts
    }

    /// Latest message only, with quoted lines filtered out
    ///
    /// When filtering leaves almost nothing, the first unquoted lines of the
    /// normalized body are returned instead (unless salvage is disabled).
    #[must_use]
    pub fn clean_body(&self, raw: &str) -> String {
        let text = self.normalize(raw);
        let cut = self.find_quote_boundary(&text).map_or(text.len(), |b| b.offset);
        let main = split::filter_reply_lines(&text[..cut], &self.markers, &self.boilerplate);

        if self.options.salvage && main.chars().count() < self.options.salvage_threshold {
            return split::salvage(&text, &self.options);
        }

        main
    }

    /// One-line excerpt of the latest message, for prompt context
    #[must_use]
    pub fn condense(&self, raw: &str) -> String {
        let flat = flatten_whitespace(&self.clean_body(raw));

        if flat.is_empty() {
            return self.options.empty_placeholder.clone();
        }

        let max = self.options.condense_max_chars;
        if flat.chars().count() > max {
            format!("{}...", truncate_chars(&flat, max).trim_end())
        } else {
            flat
        }
    }

    /// Leading excerpt of the normalized body, for list rows
    #[must_use]
    pub fn preview(&self, raw: &str) -> String {
        let text = self.normalize(raw);
        truncate_chars(&text, self.options.preview_max_chars)
            .trim_end()
            .to_string()
    }

    /// Insert paragraph breaks after sentence ends and before locale keywords
    #[must_use]
    pub fn reflow(&self, text: &str) -> String {
        let sentences = SENTENCE_END.replace_all(text, ".\n\n${1}");

        match &self.paragraph_starts {
            Some(keywords) => break_before(&sentences, keywords),
            None => sentences.into_owned(),
        }
    }

    /// Display name for a sender, cleaned like message text
    #[must_use]
    pub fn display_sender(&self, from_name: Option<&str>, from_email: Option<&str>) -> String {
        let raw = raw_display_name(from_name, from_email);
        flatten_whitespace(&self.normalize(raw))
    }
}

fn compile_keywords(locales: &[&dyn Locale]) -> Result<Option<Regex>> {
    let keywords: Vec<String> = locales
        .iter()
        .flat_map(|l| l.paragraph_keywords())
        .filter(|k| !k.trim().is_empty())
        .map(|k| regex::escape(k))
        .collect();

    if keywords.is_empty() {
        return Ok(None);
    }

    let pattern = format!(r"(?i)\b(?:{})", keywords.join("|"));
    Regex::new(&pattern)
        .map(Some)
        .map_err(|e| ParseError::InvalidPattern {
            name: "paragraph-keywords".into(),
            details: e.to_string(),
        })
}

/// Start a new paragraph at each match not already at a line start
fn break_before(text: &str, pattern: &Regex) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;

    for found in pattern.find_iter(text) {
        let start = found.start();
        out.push_str(&text[last..start]);
        if start > 0 && !text[..start].ends_with('\n') {
            out.truncate(out.trim_end_matches([' ', '\t']).len());
            out.push_str("\n\n");
        }
        last = start;
    }

    out.push_str(&text[last..]);
    out
}

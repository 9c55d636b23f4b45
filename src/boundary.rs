//! Stage 4: quote-boundary detection

use crate::error::{ParseError, Result};
use crate::locale::Locale;
use crate::options::PipelineOptions;
use crate::text::char_index;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Marker name reported when a `>`-quoted line decided the boundary
pub const QUOTED_LINE_MARKER: &str = "quoted-line";

/// Where quoted content starts in a normalized message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBoundary {
    /// Byte offset, usable for slicing
    pub offset: usize,

    /// Character index of the same position
    pub char_index: usize,

    /// Name of the rule that matched
    pub marker: String,
}

#[derive(Debug, Clone)]
struct CompiledMarker {
    name: String,
    regex: Regex,
}

/// Compiled quote markers, in priority order
#[derive(Debug, Clone)]
pub struct MarkerTable {
    rules: Vec<CompiledMarker>,
}

impl MarkerTable {
    /// Compile the markers of each locale, locale order first, then rule order
    pub fn from_locales(locales: &[&dyn Locale]) -> Result<Self> {
        let mut rules = Vec::new();

        for locale in locales {
            for rule in locale.quote_markers() {
                let regex = Regex::new(&rule.pattern).map_err(|e| ParseError::InvalidPattern {
                    name: rule.name.to_string(),
                    details: e.to_string(),
                })?;
                rules.push(CompiledMarker {
                    name: rule.name.to_string(),
                    regex,
                });
            }
        }

        Ok(Self { rules })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in priority order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Earliest eligible marker match
    ///
    /// Only the first match of each rule is considered, and it counts only if
    /// its character index is greater than `min_offset`. On equal positions
    /// the earlier rule wins.
    #[must_use]
    pub fn earliest_match(&self, text: &str, min_offset: usize) -> Option<QuoteBoundary> {
        let mut best: Option<QuoteBoundary> = None;

        for rule in &self.rules {
            let Some(found) = rule.regex.find(text) else {
                continue;
            };

            let position = char_index(text, found.start());
            if position <= min_offset {
                continue;
            }

            if best.as_ref().is_none_or(|b| found.start() < b.offset) {
                best = Some(QuoteBoundary {
                    offset: found.start(),
                    char_index: position,
                    marker: rule.name.clone(),
                });
            }
        }

        best
    }

    /// Whether any rule matches right at the start of `line`
    #[must_use]
    pub fn starts_line(&self, line: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.regex.find(line).is_some_and(|m| m.start() == 0))
    }
}

/// First `>`-quoted line past `min_line`, as a boundary at the line start
fn first_quoted_line(text: &str, min_line: usize) -> Option<QuoteBoundary> {
    let mut offset = 0;

    for (index, line) in text.split('\n').enumerate() {
        if index > min_line && line.trim().starts_with('>') {
            return Some(QuoteBoundary {
                offset,
                char_index: char_index(text, offset),
                marker: QUOTED_LINE_MARKER.to_string(),
            });
        }
        offset += line.len() + 1;
    }

    None
}

/// Find where quoted content begins in normalized text
///
/// The regex markers give a candidate; a `>` line that starts strictly earlier
/// replaces it.
#[must_use]
pub fn find_quote_boundary(
    text: &str,
    markers: &MarkerTable,
    options: &PipelineOptions,
) -> Option<QuoteBoundary> {
    let from_markers = markers.earliest_match(text, options.min_boundary_offset);
    let from_lines = first_quoted_line(text, options.min_quote_line);

    let boundary = match (from_markers, from_lines) {
        (Some(marker), Some(line)) if line.offset < marker.offset => Some(line),
        (Some(marker), _) => Some(marker),
        (None, line) => line,
    };

    if let Some(ref b) = boundary {
        trace!("Quote boundary at char {} via {}", b.char_index, b.marker);
    }

    boundary
}

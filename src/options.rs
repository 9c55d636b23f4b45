//! Pipeline configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Quote markers must start after this character index to count
pub const DEFAULT_MIN_BOUNDARY_OFFSET: usize = 50;

/// Quoted (`>`) lines only split the message after this line index
pub const DEFAULT_MIN_QUOTE_LINE: usize = 3;

/// Cleaned history at or below this many characters is treated as noise
pub const DEFAULT_MIN_HISTORY_CHARS: usize = 20;

/// Placeholder returned by `condense` when nothing is left
pub const DEFAULT_EMPTY_PLACEHOLDER: &str = "(Tomt meddelande)";

/// Tuning knobs for the cleaning pipeline
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes:
///
/// ```rust
/// use email_clean::PipelineOptions;
///
/// let options = PipelineOptions::from_json(r#"{ "min_boundary_offset": 10 }"#).unwrap();
/// assert_eq!(options.min_boundary_offset, 10);
/// assert_eq!(options.min_history_chars, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Regex markers at or before this character index are ignored
    pub min_boundary_offset: usize,

    /// `>` lines at or before this line index do not split the message
    pub min_quote_line: usize,

    /// History this short (in characters) is dropped
    pub min_history_chars: usize,

    /// Fall back to an excerpt when `clean_body` over-trims
    pub salvage: bool,

    /// `clean_body` results shorter than this trigger the salvage excerpt
    pub salvage_threshold: usize,

    /// Lines taken by the salvage excerpt
    pub salvage_line_count: usize,

    /// Character limit of the salvage excerpt
    pub salvage_max_chars: usize,

    /// Character limit of `condense` output, before the ellipsis
    pub condense_max_chars: usize,

    /// Character limit of `preview` output
    pub preview_max_chars: usize,

    /// Returned by `condense` for empty messages
    pub empty_placeholder: String,

    /// Insert paragraph breaks after sentences and before locale keywords
    pub reflow: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            min_boundary_offset: DEFAULT_MIN_BOUNDARY_OFFSET,
            min_quote_line: DEFAULT_MIN_QUOTE_LINE,
            min_history_chars: DEFAULT_MIN_HISTORY_CHARS,
            salvage: true,
            salvage_threshold: 20,
            salvage_line_count: 5,
            salvage_max_chars: 300,
            condense_max_chars: 500,
            preview_max_chars: 300,
            empty_placeholder: DEFAULT_EMPTY_PLACEHOLDER.to_string(),
            reflow: false,
        }
    }
}

impl PipelineOptions {
    /// Options that never substitute an excerpt for an over-trimmed body
    #[must_use]
    pub fn strict() -> Self {
        Self {
            salvage: false,
            ..Self::default()
        }
    }

    /// Options for display in a reader pane, with paragraph reflow
    #[must_use]
    pub fn readable() -> Self {
        Self {
            reflow: true,
            ..Self::default()
        }
    }

    /// Load options from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

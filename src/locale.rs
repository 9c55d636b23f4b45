//! Locale-specific rule sets
//!
//! A [`Locale`] supplies the patterns that mark the start of a quoted reply,
//! the boilerplate lines mail clients append, and the keywords that usually
//! open a new paragraph. The pipeline concatenates the rules of its locales in
//! order; earlier rules win ties during boundary detection.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A named regular expression marking the start of quoted content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRule {
    /// Short identifier, reported back in `QuoteBoundary::marker`
    pub name: Cow<'static, str>,

    /// Pattern in `regex` crate syntax
    pub pattern: Cow<'static, str>,
}

impl MarkerRule {
    pub fn new(name: impl Into<Cow<'static, str>>, pattern: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    /// Const constructor for built-in tables
    #[must_use]
    pub const fn builtin(name: &'static str, pattern: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            pattern: Cow::Borrowed(pattern),
        }
    }
}

/// Provider of quote markers and related boilerplate for one language
pub trait Locale: Send + Sync {
    /// Locale identifier (e.g. `"sv"`)
    fn name(&self) -> &str;

    /// Quote-boundary markers, in priority order
    fn quote_markers(&self) -> &[MarkerRule];

    /// Line prefixes of client-added signatures ("Sent from my iPhone")
    fn signature_prefixes(&self) -> &[Cow<'static, str>] {
        &[]
    }

    /// Phrases that start a paragraph, used when reflowing flattened text
    fn paragraph_keywords(&self) -> &[Cow<'static, str>] {
        &[]
    }
}

/// Swedish mail clients (Gmail, Outlook, Apple Mail in Swedish)
#[derive(Debug, Clone, Copy, Default)]
pub struct Swedish;

const SWEDISH_MARKERS: &[MarkerRule] = &[
    // "Den mån 12 jan. 2026 18:13 Lars Johansson skrev:"
    MarkerRule::builtin(
        "sv-weekday-date",
        r"(?i)Den\s+(?:mån|tis|ons|tors|fre|lör|sön)\.?\s+\d{1,2}\s+(?:jan|feb|mar|apr|maj|jun|jul|aug|sep|okt|nov|dec)",
    ),
    // "12 januari 2026, 14:23"
    MarkerRule::builtin(
        "sv-month-date",
        r"(?i)\d{1,2}\s+(?:januari|februari|mars|april|maj|juni|juli|augusti|september|oktober|november|december)\s+\d{4},?\s+\d{1,2}:\d{2}",
    ),
    MarkerRule::builtin("sv-timezone", r"(?i)centraleuropeisk\s+(?:normal)?tid"),
    MarkerRule::builtin("sv-attribution", r"(?i)skrev\s*:"),
];

const SWEDISH_SIGNATURES: &[Cow<'static, str>] = &[
    Cow::Borrowed("Skickat från min"),
    Cow::Borrowed("Skickat från Outlook"),
];

const SWEDISH_KEYWORDS: &[Cow<'static, str>] = &[
    Cow::Borrowed("Hej "),
    Cow::Borrowed("Vad:"),
    Cow::Borrowed("Var:"),
    Cow::Borrowed("När:"),
    Cow::Borrowed("Snarast möjligt"),
    Cow::Borrowed("Frågor och svar"),
    Cow::Borrowed("Beskriv vad"),
    Cow::Borrowed("Om du inte"),
    Cow::Borrowed("Vänliga hälsningar"),
    Cow::Borrowed("Med vänlig hälsning"),
    Cow::Borrowed("Mvh"),
];

impl Locale for Swedish {
    fn name(&self) -> &str {
        "sv"
    }

    fn quote_markers(&self) -> &[MarkerRule] {
        SWEDISH_MARKERS
    }

    fn signature_prefixes(&self) -> &[Cow<'static, str>] {
        SWEDISH_SIGNATURES
    }

    fn paragraph_keywords(&self) -> &[Cow<'static, str>] {
        SWEDISH_KEYWORDS
    }
}

/// English mail clients
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

const ENGLISH_MARKERS: &[MarkerRule] = &[
    // "On Wed, Jan 3, 2024 at 10:12 AM"
    MarkerRule::builtin(
        "en-date",
        r"(?i)On\s+(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun),?\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)",
    ),
    MarkerRule::builtin("en-attribution", r"(?i)wrote\s*:"),
];

const ENGLISH_SIGNATURES: &[Cow<'static, str>] = &[
    Cow::Borrowed("Sent from my"),
    Cow::Borrowed("Get Outlook"),
];

const ENGLISH_KEYWORDS: &[Cow<'static, str>] = &[
    Cow::Borrowed("Best regards"),
    Cow::Borrowed("Kind regards"),
];

impl Locale for English {
    fn name(&self) -> &str {
        "en"
    }

    fn quote_markers(&self) -> &[MarkerRule] {
        ENGLISH_MARKERS
    }

    fn signature_prefixes(&self) -> &[Cow<'static, str>] {
        ENGLISH_SIGNATURES
    }

    fn paragraph_keywords(&self) -> &[Cow<'static, str>] {
        ENGLISH_KEYWORDS
    }
}

/// Language-independent conventions: banners, nested quotes, leaked headers
#[derive(Debug, Clone, Copy, Default)]
pub struct Generic;

const GENERIC_MARKERS: &[MarkerRule] = &[
    MarkerRule::builtin("original-message", r"(?im)^-{3,}.*Original\s*Message"),
    MarkerRule::builtin("nested-quote", r"(?m)^>{2,}"),
    MarkerRule::builtin("header-from", r"(?im)^From:\s*.*@"),
];

impl Locale for Generic {
    fn name(&self) -> &str {
        "generic"
    }

    fn quote_markers(&self) -> &[MarkerRule] {
        GENERIC_MARKERS
    }
}

/// The locales a default pipeline is built from, in priority order
pub const DEFAULT_LOCALES: &[&dyn Locale] = &[&Swedish, &English, &Generic];

/// A locale assembled at runtime
///
/// ```rust
/// use email_clean::{CustomLocale, Pipeline, PipelineOptions};
///
/// let german = CustomLocale::new("de")
///     .marker("de-attribution", r"(?i)schrieb\s*:")
///     .signature("Von meinem iPhone gesendet");
/// let pipeline = Pipeline::with_locales(PipelineOptions::default(), &[&german]).unwrap();
/// assert_eq!(pipeline.markers().len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomLocale {
    pub name: String,
    pub markers: Vec<MarkerRule>,
    pub signatures: Vec<Cow<'static, str>>,
    pub keywords: Vec<Cow<'static, str>>,
}

impl CustomLocale {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn marker(
        mut self,
        name: impl Into<Cow<'static, str>>,
        pattern: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.markers.push(MarkerRule::new(name, pattern));
        self
    }

    #[must_use]
    pub fn signature(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.signatures.push(prefix.into());
        self
    }

    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<Cow<'static, str>>) -> Self {
        self.keywords.push(keyword.into());
        self
    }
}

impl Locale for CustomLocale {
    fn name(&self) -> &str {
        &self.name
    }

    fn quote_markers(&self) -> &[MarkerRule] {
        &self.markers
    }

    fn signature_prefixes(&self) -> &[Cow<'static, str>] {
        &self.signatures
    }

    fn paragraph_keywords(&self) -> &[Cow<'static, str>] {
        &self.keywords
    }
}

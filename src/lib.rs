// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Body Cleaner
//!
//! Turns raw inbound message bodies into display text: decodes
//! quoted-printable and HTML entities, repairs double-encoded UTF-8, strips
//! markup, and separates the latest reply from the quoted history under it.
//!
//! # Features
//!
//! - Full HTML5 entity decoding and quoted-printable unescaping
//! - Mojibake repair for Swedish/Nordic text
//! - Quote-boundary detection for Swedish and English mail clients
//! - Pluggable locale rule sets
//! - Salvage excerpts for over-trimmed replies
//! - RFC 5322 ingestion via `mailparse`
//!
//! # Example
//!
//! ```rust
//! use email_clean::split_message;
//!
//! let raw = "Hej Thomas,\nbåten startar nu igen, tack så mycket för hjälpen.\n\n\
//!            Den mån 12 jan. 2026 18:13 Lars skrev:\n> Prova att byta tändstiften först.";
//! let parts = split_message(Some(raw));
//!
//! assert!(parts.main.ends_with("tack så mycket för hjälpen."));
//! assert!(parts.history.contains("Prova att byta tändstiften först."));
//! ```

mod boundary;
mod decode;
mod error;
mod locale;
mod markup;
mod options;
mod parser;
mod pipeline;
mod repair;
mod sender;
mod split;
mod text;
mod types;

pub use boundary::{MarkerTable, QUOTED_LINE_MARKER, QuoteBoundary};
pub use decode::{decode, decode_entities, decode_quoted_printable};
pub use error::{ParseError, Result};
pub use locale::{CustomLocale, DEFAULT_LOCALES, English, Generic, Locale, MarkerRule, Swedish};
pub use markup::strip_markup;
pub use options::*;
pub use parser::{parse_message, parse_message_with};
pub use pipeline::{Pipeline, default_pipeline};
pub use repair::{MOJIBAKE_TABLE, apply_replacements, repair_encoding};
pub use sender::{EmailAddress, UNKNOWN_SENDER, raw_display_name};
pub use split::Boilerplate;
pub use types::*;

/// Decode, repair and strip a raw body; `None` is treated as empty
#[must_use]
pub fn normalize(raw: Option<&str>) -> String {
    default_pipeline().normalize(raw.unwrap_or_default())
}

/// Normalize a raw body and split it into main and history
#[must_use]
pub fn split_message(raw: Option<&str>) -> MessageParts {
    default_pipeline().split(raw.unwrap_or_default())
}

/// Locate quoted content in already-normalized text
#[must_use]
pub fn find_quote_boundary(text: &str) -> Option<QuoteBoundary> {
    default_pipeline().find_quote_boundary(text)
}

/// Split already-normalized text into main and history
#[must_use]
pub fn split_and_clean(text: &str) -> MessageParts {
    default_pipeline().split_and_clean(text)
}

/// Latest message only, with a salvage excerpt when over-trimmed
#[must_use]
pub fn clean_body(raw: &str) -> String {
    default_pipeline().clean_body(raw)
}

/// Single-line excerpt of the latest message, for prompt context
#[must_use]
pub fn condense(raw: &str) -> String {
    default_pipeline().condense(raw)
}

/// Leading excerpt of the normalized body, for list rows
#[must_use]
pub fn preview(raw: &str) -> String {
    default_pipeline().preview(raw)
}

/// Display name for a sender, falling back to the address
#[must_use]
pub fn display_sender(from_name: Option<&str>, from_email: Option<&str>) -> String {
    default_pipeline().display_sender(from_name, from_email)
}

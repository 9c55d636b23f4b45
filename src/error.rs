//! Error types for message cleaning
//!
//! The text pipeline itself is total. Errors only come from building a
//! pipeline out of custom rules, loading options, or parsing raw messages.

use thiserror::Error;

/// Errors that can occur while configuring a pipeline or parsing a message
#[derive(Error, Debug)]
pub enum ParseError {
    /// Failed to parse the raw message structure
    #[error("Failed to parse message structure: {0}")]
    Structure(String),

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Invalid header format
    #[error("Invalid header format for {header}: {details}")]
    InvalidHeader { header: String, details: String },

    /// A quote marker rule did not compile
    #[error("Invalid pattern for marker {name}: {details}")]
    InvalidPattern { name: String, details: String },

    /// Options could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for fallible operations in this crate
pub type Result<T> = std::result::Result<T, ParseError>;

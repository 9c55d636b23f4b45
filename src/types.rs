//! Core output types

use crate::sender::EmailAddress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A message split into the latest reply and the quoted history below it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageParts {
    /// Content written by the sender of this message
    pub main: String,

    /// Quoted content from earlier messages, empty if none was found
    pub history: String,
}

impl MessageParts {
    /// Check if quoted history was found
    #[must_use]
    pub const fn has_history(&self) -> bool {
        !self.history.is_empty()
    }

    /// Check if both parts are empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.main.is_empty() && self.history.is_empty()
    }

    /// History as an option, for callers that render a toggle
    #[must_use]
    pub fn history(&self) -> Option<&str> {
        if self.history.is_empty() {
            None
        } else {
            Some(&self.history)
        }
    }
}

impl fmt::Display for MessageParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.main)
    }
}

/// Which body part a parsed message was cleaned from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BodyKind {
    Plain,
    Html,
    Empty,
}

/// A raw RFC 5322 message, parsed and cleaned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Sender address
    pub from: EmailAddress,

    /// Name to show for the sender
    pub sender: String,

    /// Subject, normalized like the body
    pub subject: String,

    /// Date header, if present and valid
    pub date: Option<DateTime<Utc>>,

    /// Body part the text came from
    pub body_kind: BodyKind,

    /// Cleaned body
    pub parts: MessageParts,

    /// Short excerpt for list views
    pub preview: String,
}

//! Sender addresses and display names

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown when a message carries no usable sender information
pub const UNKNOWN_SENDER: &str = "Okänd avsändare";

/// Email address with optional display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    /// Display name (e.g., "Lars Johansson")
    pub name: Option<String>,

    /// Email address (e.g., "lars@example.se")
    pub address: String,

    /// Domain extracted from address
    pub domain: String,
}

impl EmailAddress {
    /// Parse `Name <local@domain>` or a bare address
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(start) = s.find('<')
            && let Some(end) = s[start..].find('>').map(|e| start + e)
        {
            let name_part = s[..start].trim().trim_matches('"').trim();
            let address = s[start + 1..end].trim().to_string();

            if let Some((_, domain)) = address.split_once('@') {
                return Some(Self {
                    name: if name_part.is_empty() {
                        None
                    } else {
                        Some(name_part.to_string())
                    },
                    domain: domain.to_string(),
                    address,
                });
            }
        }

        if !s.contains(char::is_whitespace)
            && let Some((_, domain)) = s.split_once('@')
        {
            return Some(Self {
                name: None,
                domain: domain.to_string(),
                address: s.to_string(),
            });
        }

        None
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// Pick the raw (not yet normalized) display name for a sender
///
/// Prefers an explicit non-blank name, then the display part of a
/// `Name <address>` string, then the bare address.
#[must_use]
pub fn raw_display_name<'a>(from_name: Option<&'a str>, from_email: Option<&'a str>) -> &'a str {
    if let Some(name) = from_name.map(str::trim).filter(|n| !n.is_empty()) {
        return name;
    }

    let Some(email) = from_email.map(str::trim).filter(|e| !e.is_empty()) else {
        return UNKNOWN_SENDER;
    };

    if let Some(start) = email.find('<')
        && email.ends_with('>')
    {
        let name = email[..start].trim().trim_matches('"').trim();
        if !name.is_empty() {
            return name;
        }
        return email[start + 1..email.len() - 1].trim();
    }

    email
}

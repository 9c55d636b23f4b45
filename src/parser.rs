//! Raw message ingestion
//!
//! Parses an RFC 5322 message with `mailparse`, picks the best body part and
//! runs it through a [`Pipeline`].

use crate::error::{ParseError, Result};
use crate::pipeline::{Pipeline, default_pipeline};
use crate::sender::EmailAddress;
use crate::types::{BodyKind, InboundMessage};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Parse raw message bytes and clean the body with the default pipeline
pub fn parse_message(raw: &[u8]) -> Result<InboundMessage> {
    parse_message_with(default_pipeline(), raw)
}

/// Parse raw message bytes and clean the body with `pipeline`
pub fn parse_message_with(pipeline: &Pipeline, raw: &[u8]) -> Result<InboundMessage> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ParseError::Structure(e.to_string()))?;

    let from = extract_from(&parsed.headers)?;
    let sender = pipeline.display_sender(from.name.as_deref(), Some(&from.address));
    let subject = extract_subject(pipeline, &parsed.headers);
    let date = extract_date(&parsed.headers);

    let (body_kind, body) = extract_body(&parsed);
    let parts = pipeline.split(&body);
    let preview = pipeline.preview(&body);

    debug!(
        "Parsed message: {} from {} ({:?}, history: {})",
        subject,
        from.address,
        body_kind,
        parts.has_history()
    );

    Ok(InboundMessage {
        from,
        sender,
        subject,
        date,
        body_kind,
        parts,
        preview,
    })
}

fn header_value(headers: &[mailparse::MailHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.get_key().eq_ignore_ascii_case(name))
        .map(mailparse::MailHeader::get_value)
}

fn extract_from(headers: &[mailparse::MailHeader]) -> Result<EmailAddress> {
    let from_header =
        header_value(headers, "from").ok_or_else(|| ParseError::MissingHeader("From".into()))?;

    EmailAddress::parse(&from_header).ok_or_else(|| ParseError::InvalidHeader {
        header: "From".into(),
        details: format!("Could not parse: {from_header}"),
    })
}

fn extract_subject(pipeline: &Pipeline, headers: &[mailparse::MailHeader]) -> String {
    header_value(headers, "subject")
        .map(|s| pipeline.normalize(&s))
        .unwrap_or_default()
}

fn extract_date(headers: &[mailparse::MailHeader]) -> Option<DateTime<Utc>> {
    header_value(headers, "date")
        .and_then(|d| DateTime::parse_from_rfc2822(d.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Prefer text/plain, fall back to text/html
fn extract_body(parsed: &mailparse::ParsedMail) -> (BodyKind, String) {
    let mut text = String::new();
    let mut html: Option<String> = None;

    if parsed.subparts.is_empty() {
        if let Ok(body) = parsed.get_body() {
            if parsed.ctype.mimetype.eq_ignore_ascii_case("text/html") {
                html = Some(body);
            } else {
                text = body;
            }
        }
    } else {
        extract_body_recursive(parsed, &mut text, &mut html);
    }

    if !text.trim().is_empty() {
        (BodyKind::Plain, text)
    } else if let Some(html) = html {
        (BodyKind::Html, html)
    } else {
        (BodyKind::Empty, String::new())
    }
}

fn extract_body_recursive(
    parsed: &mailparse::ParsedMail,
    text: &mut String,
    html: &mut Option<String>,
) {
    for part in &parsed.subparts {
        let content_type = part.ctype.mimetype.to_lowercase();

        if part.subparts.is_empty() {
            if let Ok(body) = part.get_body() {
                if content_type == "text/plain" && text.is_empty() {
                    *text = body;
                } else if content_type == "text/html" && html.is_none() {
                    *html = Some(body);
                }
            }
        } else {
            extract_body_recursive(part, text, html);
        }
    }
}

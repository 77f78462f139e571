//! Associates exported messages with the profiles on either side of them

use crate::csv::{parse_line, split_records, strip_wrapping_quotes};
use crate::error::RowError;
use crate::types::{Direction, Message};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// Minimum columns for a message row (through CONTENT)
pub const MESSAGE_MIN_FIELDS: usize = 9;

/// One row of messages.csv:
/// `CONVERSATION ID,CONVERSATION TITLE,FROM,SENDER PROFILE URL,TO,RECIPIENT PROFILE URLS,DATE,SUBJECT,CONTENT[,FOLDER,IS MESSAGE DRAFT,IS CONVERSATION DRAFT]`
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRow {
    pub conversation_id: String,
    pub title: String,
    pub from: String,
    pub sender_profile_url: String,
    pub to: String,
    pub recipient_profile_urls: String,
    pub date: String,
    pub subject: String,
    pub content: String,
    pub folder: String,
    pub is_draft: bool,
    pub is_conversation_draft: bool,
}

impl MessageRow {
    pub fn from_fields(fields: &[String]) -> Result<Self, RowError> {
        if fields.len() < MESSAGE_MIN_FIELDS {
            return Err(RowError::TooFewFields {
                expected: MESSAGE_MIN_FIELDS,
                found: fields.len(),
            });
        }

        let field = |i: usize| fields.get(i).map(|f| f.trim()).unwrap_or("");

        Ok(Self {
            conversation_id: field(0).to_string(),
            title: field(1).to_string(),
            from: field(2).to_string(),
            sender_profile_url: strip_wrapping_quotes(field(3)).trim().to_string(),
            to: field(4).to_string(),
            recipient_profile_urls: strip_wrapping_quotes(field(5)).to_string(),
            date: field(6).to_string(),
            subject: field(7).to_string(),
            content: strip_wrapping_quotes(field(8)).to_string(),
            folder: field(9).to_string(),
            is_draft: parse_flag(field(10)),
            is_conversation_draft: parse_flag(field(11)),
        })
    }

    /// Non-empty, trimmed recipient URLs from the `;`-separated list
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        self.recipient_profile_urls
            .split(';')
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    fn to_message(&self, direction: Direction) -> Message {
        Message {
            conversation_id: self.conversation_id.clone(),
            title: self.title.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            date: self.date.clone(),
            subject: self.subject.clone(),
            content: self.content.clone(),
            folder: self.folder.clone(),
            is_draft: self.is_draft,
            is_conversation_draft: self.is_conversation_draft,
            direction,
        }
    }
}

/// Messages grouped by profile URL, newest first
#[derive(Debug, Default)]
pub struct MessageIndex {
    by_url: HashMap<String, Vec<Message>>,
    pub skipped_rows: usize,
}

impl MessageIndex {
    /// Parse a messages.csv source (header first).
    ///
    /// Every valid row yields one outgoing entry for the sender and one incoming entry
    /// per recipient. Rows that are too short are counted and skipped.
    pub fn from_csv(text: &str) -> Self {
        let mut index = Self::default();

        for record in split_records(text).into_iter().skip(1) {
            if record.trim().is_empty() {
                continue;
            }

            let row = match MessageRow::from_fields(&parse_line(record)) {
                Ok(row) => row,
                Err(e) => {
                    tracing::debug!("Skipping message row: {}", e);
                    index.skipped_rows += 1;
                    continue;
                }
            };
            index.insert(&row);
        }

        for messages in index.by_url.values_mut() {
            sort_newest_first(messages);
        }
        index
    }

    fn insert(&mut self, row: &MessageRow) {
        if !row.sender_profile_url.is_empty() {
            self.by_url
                .entry(row.sender_profile_url.clone())
                .or_default()
                .push(row.to_message(Direction::Outgoing));
        }

        for recipient in row.recipients() {
            self.by_url
                .entry(recipient.to_string())
                .or_default()
                .push(row.to_message(Direction::Incoming));
        }
    }

    pub fn get(&self, url: &str) -> &[Message] {
        self.by_url.get(url).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct profile URLs with at least one message
    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }
}

/// Parse a message timestamp in any of the shapes LinkedIn has exported
pub fn parse_message_date(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();
    let without_zone = date.strip_suffix(" UTC").unwrap_or(date);

    if let Ok(dt) = NaiveDateTime::parse_from_str(without_zone, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(without_zone, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Stable sort, newest first; unparsable dates go last in input order
fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| parse_message_date(&b.date).cmp(&parse_message_date(&a.date)));
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("yes") || value.eq_ignore_ascii_case("true")
}

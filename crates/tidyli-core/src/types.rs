//! Core types for connection review

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of a conversation a message was on, relative to the profile it is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The profile sent it
    Outgoing,
    /// The profile was a recipient
    Incoming,
}

/// One message from the export, as seen from a single profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub conversation_id: String,
    pub title: String,
    pub from: String,
    pub to: String,
    /// Free-text timestamp exactly as exported
    pub date: String,
    pub subject: String,
    pub content: String,
    #[serde(default)]
    pub folder: String,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub is_conversation_draft: bool,
    pub direction: Direction,
}

impl Message {
    /// Date part of the timestamp (`2024-03-01 10:00:00 UTC` -> `2024-03-01`)
    pub fn short_date(&self) -> &str {
        self.date.split(' ').next().unwrap_or(&self.date)
    }
}

/// A single LinkedIn connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    /// Unique key
    pub url: String,
    pub email: String,
    pub company: String,
    pub position: String,
    pub connected_on: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// The user's classification of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Keep,
    Remove,
    Pending,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Keep => "keep",
            Decision::Remove => "remove",
            Decision::Pending => "pending",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(Decision::Keep),
            "remove" => Ok(Decision::Remove),
            "pending" => Ok(Decision::Pending),
            _ => Err(ParseKindError {
                kind: "decision",
                value: s.to_string(),
            }),
        }
    }
}

/// Latest decision for one profile URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDecision {
    pub profile_url: String,
    pub decision: Decision,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Decision subset driving which profiles are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Keep,
    Remove,
    #[default]
    Pending,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::All,
        Category::Keep,
        Category::Remove,
        Category::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Keep => "keep",
            Category::Remove => "remove",
            Category::Pending => "pending",
        }
    }

    /// Whether a profile with `decision` belongs to this category
    pub fn matches(&self, decision: Decision) -> bool {
        match self {
            Category::All => true,
            Category::Keep => decision == Decision::Keep,
            Category::Remove => decision == Decision::Remove,
            Category::Pending => decision == Decision::Pending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All Profiles",
            Category::Keep => "To Keep",
            Category::Remove => "To Delete",
            Category::Pending => "Pending",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Category::All),
            "keep" => Ok(Category::Keep),
            "remove" => Ok(Category::Remove),
            "pending" => Ok(Category::Pending),
            _ => Err(ParseKindError {
                kind: "category",
                value: s.to_string(),
            }),
        }
    }
}

/// Unknown decision or category name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} \"{value}\"")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_matches() {
        assert!(Category::All.matches(Decision::Remove));
        assert!(Category::Keep.matches(Decision::Keep));
        assert!(!Category::Keep.matches(Decision::Pending));
        assert!(Category::Pending.matches(Decision::Pending));
        assert!(!Category::Remove.matches(Decision::Keep));
    }

    #[test]
    fn test_decision_from_str() {
        assert_eq!("keep".parse::<Decision>().unwrap(), Decision::Keep);
        assert_eq!(" Remove ".parse::<Decision>().unwrap(), Decision::Remove);
        let err = "maybe".parse::<Decision>().unwrap_err();
        assert_eq!(err.to_string(), "unknown decision \"maybe\"");
    }

    #[test]
    fn test_profile_decision_wire_shape() {
        let record = ProfileDecision {
            profile_url: "https://www.linkedin.com/in/jane".to_string(),
            decision: Decision::Keep,
            timestamp: 1_700_000_000_000,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["profileUrl"], "https://www.linkedin.com/in/jane");
        assert_eq!(json["decision"], "keep");
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_short_date() {
        let message = Message {
            conversation_id: "c1".to_string(),
            title: String::new(),
            from: "Jane".to_string(),
            to: "Me".to_string(),
            date: "2024-03-01 10:00:00 UTC".to_string(),
            subject: String::new(),
            content: "hi".to_string(),
            folder: "INBOX".to_string(),
            is_draft: false,
            is_conversation_draft: false,
            direction: Direction::Incoming,
        };
        assert_eq!(message.short_date(), "2024-03-01");
    }

    #[test]
    fn test_default_category_is_pending() {
        assert_eq!(Category::default(), Category::Pending);
    }
}

//! Chat record and dashboard statistics types for Voxbot.
//!
//! A chat history is a flat, append-only list of [`ChatMessage`] records
//! partitioned by an opaque, client-generated `userId`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::error::ChatError;

/// Which side of the exchange produced a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'bot'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A persisted chat message.
///
/// Messages are never mutated after creation. Within one `user_id`,
/// `created_at` is non-decreasing in insert order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: String,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
}

/// Body of an append request (`POST /api/chats`).
///
/// Every field is optional on the wire so that a missing or malformed field
/// surfaces as a [`ChatError::Validation`] rather than a deserialization
/// failure. Call [`AppendChatRequest::validate`] to obtain a [`NewChatMessage`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendChatRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
}

impl AppendChatRequest {
    pub fn new(user_id: impl Into<String>, text: impl Into<String>, sender: Sender) -> Self {
        Self {
            user_id: Some(user_id.into()),
            text: Some(text.into()),
            sender: Some(sender.to_string()),
        }
    }

    /// Check that `userId`, `text` and `sender` are present and well-formed.
    pub fn validate(&self) -> Result<NewChatMessage, ChatError> {
        let user_id = match self.user_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(ChatError::Validation("userId is required".to_string())),
        };

        let text = match self.text.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => return Err(ChatError::Validation("text is required".to_string())),
        };

        let sender = match self.sender.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse::<Sender>().map_err(|_| {
                ChatError::Validation(format!("sender must be 'user' or 'bot', got '{raw}'"))
            })?,
            _ => return Err(ChatError::Validation("sender is required".to_string())),
        };

        Ok(NewChatMessage {
            user_id,
            text,
            sender,
        })
    }
}

/// A validated message waiting to be stored.
///
/// The store assigns `id` and `created_at` on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    pub user_id: String,
    pub text: String,
    pub sender: Sender,
}

/// Response body of a clear request (`DELETE /api/chats/{userId}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    /// Absent in bodies from servers that only report `success`.
    #[serde(default)]
    pub deleted: u64,
}

/// Message count for one hour of the day (0-23, UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCount {
    pub hour: u8,
    pub count: u64,
}

/// Aggregate statistics over one user's history, as rendered by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStats {
    pub total: u64,
    pub user_count: u64,
    pub bot_count: u64,
    /// Always 24 entries, `hourly[h].hour == h`.
    pub hourly: Vec<HourlyCount>,
}

impl Default for ChatStats {
    fn default() -> Self {
        Self {
            total: 0,
            user_count: 0,
            bot_count: 0,
            hourly: (0..24).map(|hour| HourlyCount { hour, count: 0 }).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Bot] {
            let s = sender.to_string();
            let parsed: Sender = s.parse().unwrap();
            assert_eq!(sender, parsed);
        }
        assert!("robot".parse::<Sender>().is_err());
        assert_eq!(" BOT ".parse::<Sender>().unwrap(), Sender::Bot);
    }

    #[test]
    fn test_chat_message_uses_camel_case_on_the_wire() {
        let msg = ChatMessage {
            id: Uuid::now_v7(),
            user_id: "user_abc123xyz".to_string(),
            text: "Hi".to_string(),
            sender: Sender::User,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["userId"], "user_abc123xyz");
        assert_eq!(json["sender"], "user");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        let req = AppendChatRequest::new("u1", "Hello!", Sender::Bot);
        let msg = req.validate().unwrap();
        assert_eq!(msg.user_id, "u1");
        assert_eq!(msg.text, "Hello!");
        assert_eq!(msg.sender, Sender::Bot);
    }

    #[test]
    fn test_validate_rejects_empty_text() {
        let req = AppendChatRequest {
            user_id: Some("u1".to_string()),
            text: Some("   ".to_string()),
            sender: Some("user".to_string()),
        };
        let err = req.validate().unwrap_err();
        assert!(matches!(err, ChatError::Validation(ref m) if m.contains("text")));
    }

    #[test]
    fn test_validate_rejects_missing_sender() {
        let json = r#"{"userId":"u1","text":"Hi"}"#;
        let req: AppendChatRequest = serde_json::from_str(json).unwrap();
        let err = req.validate().unwrap_err();
        assert!(matches!(err, ChatError::Validation(ref m) if m.contains("sender")));
    }

    #[test]
    fn test_validate_rejects_unknown_sender() {
        let req = AppendChatRequest {
            user_id: Some("u1".to_string()),
            text: Some("Hi".to_string()),
            sender: Some("robot".to_string()),
        };
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("robot"));
    }

    #[test]
    fn test_validate_rejects_missing_user_id() {
        let req = AppendChatRequest {
            user_id: None,
            text: Some("Hi".to_string()),
            sender: Some("user".to_string()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_default_stats_have_24_empty_buckets() {
        let stats = ChatStats::default();
        assert_eq!(stats.hourly.len(), 24);
        assert!(stats.hourly.iter().enumerate().all(|(h, b)| b.hour as usize == h && b.count == 0));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["userCount"], 0);
    }
}

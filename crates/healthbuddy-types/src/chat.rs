//! Chat session and message types for Health Buddy.
//!
//! Messages are immutable once created and ordered by append order
//! within a session; both the v7 id and `sent_at` preserve that order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reply::ReplySource;

use std::fmt;
use std::str::FromStr;

/// Which side of the conversation a message belongs to.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'bot'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single message within a chat session.
///
/// `sent_at` serializes as integer epoch milliseconds, the wire format
/// the embedding page renders timestamps from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub session_id: Uuid,
    pub sender: Sender,
    pub text: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Create a user message for a session, stamped now.
    pub fn user(session_id: Uuid, text: impl Into<String>) -> Self {
        Self::new(session_id, Sender::User, text)
    }

    /// Create a bot message for a session, stamped now.
    pub fn bot(session_id: Uuid, text: impl Into<String>) -> Self {
        Self::new(session_id, Sender::Bot, text)
    }

    fn new(session_id: Uuid, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id,
            sender,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// A chat session between one visitor and the bot.
///
/// The selected locale persists on the session row, so a returning
/// visitor resumes in the language they last picked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub locale: String,
    pub started_at: DateTime<Utc>,
    pub message_count: u32,
}

/// One completed submit cycle: the user message, the bot reply
/// produced for it, and which path produced the reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub user: Message,
    pub bot: Message,
    pub source: ReplySource,
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
    }

    #[test]
    fn test_sender_serde() {
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
        let parsed: Sender = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Sender::Bot);
    }

    #[test]
    fn test_sender_rejects_unknown() {
        assert!("robot".parse::<Sender>().is_err());
    }

    #[test]
    fn test_message_sent_at_epoch_millis() {
        let msg = Message::user(Uuid::now_v7(), "hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json["sent_at"].as_i64().unwrap(),
            msg.sent_at.timestamp_millis()
        );
    }

    #[test]
    fn test_message_serde_roundtrip() {
        let msg = Message::bot(Uuid::now_v7(), "hi there");
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, msg.id);
        assert_eq!(parsed.sender, Sender::Bot);
        assert_eq!(parsed.text, "hi there");
        // Millisecond precision survives the round trip.
        assert_eq!(
            parsed.sent_at.timestamp_millis(),
            msg.sent_at.timestamp_millis()
        );
    }

    #[test]
    fn test_user_then_bot_ids_are_ordered() {
        let session_id = Uuid::now_v7();
        let user = Message::user(session_id, "a");
        let bot = Message::bot(session_id, "b");
        // v7 ids are time-sortable, so append order is preserved.
        assert!(user.id < bot.id);
    }
}

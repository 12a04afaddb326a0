use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Author of a chat turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the assistant conversation
///
/// Lives only in the chat panel's session log, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: NaiveDateTime,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: timestamp::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: timestamp::now(),
        }
    }
}

/// Body of `POST /api/chat/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Reply of `POST /api/chat/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub response: String,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
}

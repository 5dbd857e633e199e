//! Chat session and transcript types.
//!
//! A session is one continuous code-review conversation identified by an
//! opaque token. Clients resubmit the full transcript on every turn, so the
//! message list is always replaced wholesale rather than appended to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export MessageRole (it's used in both chat and llm contexts).
pub use crate::llm::MessageRole;

/// One turn in a conversation. Immutable once part of a stored transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

/// One code-review conversation.
///
/// `session_id` is the externally visible token, unique across all
/// sessions. `user_id` is the optional owner link -- sessions may be
/// anonymous, and an owner, once attached, is never detached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: i64,
    pub session_id: String,
    pub user_id: Option<i64>,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry for a user's chats, with a display name derived from the
/// transcript.
#[derive(Debug, Clone, Serialize)]
pub struct ChatSummary {
    pub id: i64,
    pub session_id: String,
    pub name: String,
    pub messages: Vec<ChatMessage>,
    pub updated_at: DateTime<Utc>,
}

//! Per-user chat listing with synthesized display names.

use codementor_types::chat::{ChatSession, ChatSummary, MessageRole};
use codementor_types::error::RepositoryError;

use crate::storage::Storage;

/// Display names are capped at this many characters.
const DISPLAY_NAME_MAX_CHARS: usize = 60;

/// Read side of the chat store: resolves an email to its sessions and
/// formats them for display.
pub struct ChatQueryService<S: Storage> {
    storage: S,
}

impl<S: Storage> ChatQueryService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List the chats owned by the user with the given email, most recently
    /// updated first.
    ///
    /// An unknown email is a normal "no chats" case, not an error. Sessions
    /// are emitted in storage order -- no re-sort here.
    pub async fn list_chats_for_email(
        &self,
        email: &str,
    ) -> Result<Vec<ChatSummary>, RepositoryError> {
        let Some(user) = self.storage.find_user_by_email(email).await? else {
            return Ok(Vec::new());
        };

        let sessions = self.storage.list_sessions_for_user(user.id).await?;
        Ok(sessions.into_iter().map(summarize).collect())
    }
}

fn summarize(session: ChatSession) -> ChatSummary {
    let name = display_name(&session);
    ChatSummary {
        id: session.id,
        session_id: session.session_id,
        name,
        messages: session.messages,
        updated_at: session.updated_at,
    }
}

/// Derive a session's display name from its transcript.
///
/// First line of the first user-role message with non-empty content,
/// truncated to 60 characters. Sessions without one fall back to
/// "Chat {id}".
fn display_name(session: &ChatSession) -> String {
    session
        .messages
        .iter()
        .find(|m| m.role == MessageRole::User && !m.content.is_empty())
        .map(|m| {
            m.content
                .lines()
                .next()
                .unwrap_or("")
                .chars()
                .take(DISPLAY_NAME_MAX_CHARS)
                .collect()
        })
        .unwrap_or_else(|| format!("Chat {}", session.id))
}

//! In-memory `Storage` implementation for unit tests.
//!
//! Mirrors the SQLite implementation's contract: monotonically increasing
//! ids, first-match email lookup, unique session tokens, updated_at bump on
//! save, and most-recently-updated-first listing.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use codementor_types::chat::ChatSession;
use codementor_types::error::RepositoryError;
use codementor_types::user::{NewUser, User};

use crate::storage::Storage;

/// Cloning shares the underlying state, like `SqliteStorage` sharing a
/// cloned pool.
#[derive(Clone, Default)]
pub(crate) struct MemStorage {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    sessions: Vec<ChatSession>,
    save_count: usize,
}

impl MemStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of `save_session` calls so far (one expected per turn).
    pub(crate) fn save_count(&self) -> usize {
        self.inner.lock().unwrap().save_count
    }

    pub(crate) fn session_by_token(&self, session_id: &str) -> Option<ChatSession> {
        self.inner
            .lock()
            .unwrap()
            .sessions
            .iter()
            .find(|s| s.session_id == session_id)
            .cloned()
    }
}

impl Storage for MemStorage {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let user = User {
            id: inner.users.len() as i64 + 1,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password: new_user.password.clone(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn get_or_create_session(
        &self,
        session_id: &str,
    ) -> Result<(ChatSession, bool), RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(existing) = inner.sessions.iter().find(|s| s.session_id == session_id) {
            return Ok((existing.clone(), false));
        }
        let now = Utc::now();
        let session = ChatSession {
            id: inner.sessions.len() as i64 + 1,
            session_id: session_id.to_string(),
            user_id: None,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        inner.sessions.push(session.clone());
        Ok((session, true))
    }

    async fn save_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.save_count += 1;
        let slot = inner
            .sessions
            .iter_mut()
            .find(|s| s.id == session.id)
            .ok_or(RepositoryError::NotFound)?;
        slot.messages = session.messages.clone();
        slot.user_id = session.user_id;
        slot.updated_at = Utc::now();
        Ok(())
    }

    async fn list_sessions_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ChatSession>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        let mut sessions: Vec<ChatSession> = inner
            .sessions
            .iter()
            .filter(|s| s.user_id == Some(user_id))
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(sessions)
    }
}

//! Turn submission: get-or-create a session, replace its transcript, and
//! attach an owner when the caller's email resolves to a known user.

use codementor_types::chat::ChatMessage;
use codementor_types::error::RepositoryError;
use tracing::debug;
use uuid::Uuid;

use crate::storage::Storage;

/// Mediates creation and update of chat sessions.
///
/// Generic over `Storage` so tests can substitute an in-memory fake.
pub struct SessionManager<S: Storage> {
    storage: S,
}

impl<S: Storage> SessionManager<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Access the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Submit one turn of a conversation and return its session token.
    ///
    /// The caller sends the complete transcript to date on every call; the
    /// stored message list is replaced wholesale, never appended to. When no
    /// token is supplied a fresh random one is generated (collision odds are
    /// negligible, so there is no re-check against existing rows).
    ///
    /// If `owner_email` resolves to a known user, that user becomes the
    /// session's owner -- overwriting any previous owner without a conflict
    /// check. An unknown email attaches nothing; a missing email leaves any
    /// existing owner untouched.
    ///
    /// Exactly one storage write per call. Concurrent submissions for the
    /// same token race at the storage layer; the last writer wins.
    pub async fn submit_turn(
        &self,
        session_id: Option<String>,
        messages: Vec<ChatMessage>,
        owner_email: Option<&str>,
    ) -> Result<String, RepositoryError> {
        let token = session_id.unwrap_or_else(new_session_token);

        let (mut session, created) = self.storage.get_or_create_session(&token).await?;
        if created {
            debug!(session_id = %token, "created chat session");
        }

        session.messages = messages;

        if let Some(email) = owner_email {
            match self.storage.find_user_by_email(email).await? {
                Some(user) => session.user_id = Some(user.id),
                None => debug!(session_id = %token, "owner email did not resolve to a user"),
            }
        }

        self.storage.save_session(&session).await?;
        Ok(token)
    }
}

/// Generate a fresh opaque session token.
pub fn new_session_token() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use codementor_types::chat::MessageRole;
    use codementor_types::user::NewUser;

    use crate::fake_storage::MemStorage;
    use crate::storage::Storage as _;

    fn msg(role: MessageRole, content: &str) -> ChatMessage {
        ChatMessage {
            role,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_generated_token_round_trips() {
        let manager = SessionManager::new(MemStorage::new());

        let m1 = vec![msg(MessageRole::User, "review this")];
        let token = manager.submit_turn(None, m1.clone(), None).await.unwrap();
        assert!(!token.is_empty());

        // Passing the token back resolves to the same session.
        let m2 = vec![
            msg(MessageRole::User, "review this"),
            msg(MessageRole::Assistant, "looks fine"),
        ];
        let token2 = manager
            .submit_turn(Some(token.clone()), m2.clone(), None)
            .await
            .unwrap();
        assert_eq!(token, token2);

        let session = manager.storage().session_by_token(&token).unwrap();
        assert_eq!(session.messages, m2);
    }

    #[tokio::test]
    async fn test_transcript_replaced_wholesale() {
        let manager = SessionManager::new(MemStorage::new());

        let token = manager
            .submit_turn(None, vec![msg(MessageRole::User, "one"), msg(MessageRole::User, "two")], None)
            .await
            .unwrap();

        let m2 = vec![msg(MessageRole::User, "three")];
        manager
            .submit_turn(Some(token.clone()), m2.clone(), None)
            .await
            .unwrap();

        let session = manager.storage().session_by_token(&token).unwrap();
        // Full overwrite, not append.
        assert_eq!(session.messages, m2);
    }

    #[tokio::test]
    async fn test_owner_attached_and_retained() {
        let storage = MemStorage::new();
        let user = storage
            .create_user(&NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        let manager = SessionManager::new(storage);

        let token = manager
            .submit_turn(None, vec![msg(MessageRole::User, "hi")], Some("ada@example.com"))
            .await
            .unwrap();
        assert_eq!(
            manager.storage().session_by_token(&token).unwrap().user_id,
            Some(user.id)
        );

        // Omitting the email on a later turn does not clear the owner.
        manager
            .submit_turn(Some(token.clone()), vec![msg(MessageRole::User, "again")], None)
            .await
            .unwrap();
        assert_eq!(
            manager.storage().session_by_token(&token).unwrap().user_id,
            Some(user.id)
        );
    }

    #[tokio::test]
    async fn test_unknown_email_leaves_session_anonymous() {
        let manager = SessionManager::new(MemStorage::new());

        let token = manager
            .submit_turn(None, vec![msg(MessageRole::User, "hi")], Some("ghost@example.com"))
            .await
            .unwrap();

        assert_eq!(manager.storage().session_by_token(&token).unwrap().user_id, None);
    }

    #[tokio::test]
    async fn test_owner_overwritten_by_later_email() {
        let storage = MemStorage::new();
        let first = storage
            .create_user(&NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        let second = storage
            .create_user(&NewUser {
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        let manager = SessionManager::new(storage);

        let token = manager
            .submit_turn(None, vec![msg(MessageRole::User, "hi")], Some("ada@example.com"))
            .await
            .unwrap();
        assert_eq!(
            manager.storage().session_by_token(&token).unwrap().user_id,
            Some(first.id)
        );

        // No conflict check: a different known email silently takes over.
        manager
            .submit_turn(Some(token.clone()), vec![msg(MessageRole::User, "hi")], Some("grace@example.com"))
            .await
            .unwrap();
        assert_eq!(
            manager.storage().session_by_token(&token).unwrap().user_id,
            Some(second.id)
        );
    }

    #[tokio::test]
    async fn test_one_write_per_turn() {
        let manager = SessionManager::new(MemStorage::new());

        let token = manager
            .submit_turn(None, vec![msg(MessageRole::User, "hi")], None)
            .await
            .unwrap();
        assert_eq!(manager.storage().save_count(), 1);

        manager
            .submit_turn(Some(token), vec![msg(MessageRole::User, "hi again")], None)
            .await
            .unwrap();
        assert_eq!(manager.storage().save_count(), 2);
    }

    #[test]
    fn test_tokens_are_distinct() {
        assert_ne!(new_session_token(), new_session_token());
    }
}

//! Storage trait definition.
//!
//! The single persistence port for the backend: user records and chat
//! sessions. The implementation lives in codementor-infra
//! (`SqliteStorage`); tests substitute an in-memory fake.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use codementor_types::chat::ChatSession;
use codementor_types::error::RepositoryError;
use codementor_types::user::{NewUser, User};

/// Persistence operations for users and chat sessions.
///
/// No deletion operations are exposed; users are immutable after signup and
/// sessions only ever grow or get rewritten.
pub trait Storage: Send + Sync {
    /// Look up a user by exact email match.
    ///
    /// The schema does not forbid duplicate emails; implementations return
    /// the first match (lowest id) so lookups are deterministic.
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Insert a new user record unconditionally.
    ///
    /// No duplicate-email check, no password hashing. Format validation is
    /// the caller's job (see `SignupService`).
    fn create_user(
        &self,
        new_user: &NewUser,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Fetch the session with the given token, creating an empty anonymous
    /// one if none exists. The bool is true when a row was created.
    ///
    /// Must be atomic under concurrent calls for the same token: two
    /// submitters may race, but only one row may ever exist per token.
    fn get_or_create_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(ChatSession, bool), RepositoryError>> + Send;

    /// Persist the full current state of a session (message list and owner
    /// link), bumping its updated timestamp.
    fn save_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List a user's sessions, most recently updated first.
    fn list_sessions_for_user(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;
}

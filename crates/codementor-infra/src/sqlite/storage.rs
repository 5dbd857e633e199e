//! SQLite `Storage` implementation.
//!
//! Raw sqlx queries with private Row structs mapping SQLite rows to domain
//! types. Writes go through the single-connection writer pool, reads through
//! the reader pool. Timestamps are stored as RFC 3339 strings; transcripts
//! as a JSON-encoded column replaced wholesale on every save.

use chrono::{DateTime, Utc};
use sqlx::Row;

use codementor_core::storage::Storage;
use codementor_types::chat::{ChatMessage, ChatSession};
use codementor_types::error::RepositoryError;
use codementor_types::user::{NewUser, User};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `Storage`.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: DatabasePool,
}

impl SqliteStorage {
    /// Create a new storage backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct UserRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        let created_at = parse_datetime(&self.created_at)?;
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            password: self.password,
            created_at,
        })
    }
}

struct ChatSessionRow {
    id: i64,
    session_id: String,
    user_id: Option<i64>,
    messages: String,
    created_at: String,
    updated_at: String,
}

impl ChatSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            user_id: row.try_get("user_id")?,
            messages: row.try_get("messages")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        let messages: Vec<ChatMessage> = serde_json::from_str(&self.messages)
            .map_err(|e| RepositoryError::Query(format!("invalid transcript: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(ChatSession {
            id: self.id,
            session_id: self.session_id,
            user_id: self.user_id,
            messages,
            created_at,
            updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// Storage implementation
// ---------------------------------------------------------------------------

impl Storage for SqliteStorage {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        // ORDER BY id: duplicate emails are legal, the first signup wins.
        let row = sqlx::query("SELECT * FROM users WHERE email = ? ORDER BY id LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let user_row =
                    UserRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(user_row.into_user()?))
            }
            None => Ok(None),
        }
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (name, email, password, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .bind(format_datetime(&now))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password: new_user.password.clone(),
            created_at: now,
        })
    }

    async fn get_or_create_session(
        &self,
        session_id: &str,
    ) -> Result<(ChatSession, bool), RepositoryError> {
        let now = format_datetime(&Utc::now());

        // Insert-or-fetch against the UNIQUE(session_id) constraint:
        // concurrent calls for one token converge on a single row, and
        // rows_affected tells us whether this call created it.
        let result = sqlx::query(
            r#"INSERT INTO chat_sessions (session_id, messages, created_at, updated_at)
               VALUES (?, '[]', ?, ?)
               ON CONFLICT(session_id) DO NOTHING"#,
        )
        .bind(session_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let was_created = result.rows_affected() > 0;

        let row = sqlx::query("SELECT * FROM chat_sessions WHERE session_id = ?")
            .bind(session_id)
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let session_row =
            ChatSessionRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok((session_row.into_session()?, was_created))
    }

    async fn save_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        let messages = serde_json::to_string(&session.messages)
            .map_err(|e| RepositoryError::Query(format!("serialize transcript: {e}")))?;

        let result = sqlx::query(
            "UPDATE chat_sessions SET messages = ?, user_id = ?, updated_at = ? WHERE id = ?",
        )
        .bind(messages)
        .bind(session.user_id)
        .bind(format_datetime(&Utc::now()))
        .bind(session.id)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_sessions_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ChatSession>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM chat_sessions WHERE user_id = ? ORDER BY updated_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                ChatSessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            sessions.push(session_row.into_session()?);
        }

        Ok(sessions)
    }
}

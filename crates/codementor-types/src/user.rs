//! User signup record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A signed-up user.
///
/// Created once at signup and never mutated or deleted afterwards. Email is
/// the lookup key but the schema does not enforce its uniqueness; callers
/// must tolerate duplicates.
///
/// The password is stored as plain text -- a known weakness of the original
/// system, kept as-is. `skip_serializing` keeps it out of API responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user record at signup.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_not_serialized() {
        let user = User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("password"));
        assert!(json.contains("ada@example.com"));
    }

    #[test]
    fn test_user_deserialize_requires_password() {
        let json = r#"{"id":1,"name":"Ada","email":"ada@example.com","password":"pw","created_at":"2026-01-01T00:00:00Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.password, "pw");
    }
}

use thiserror::Error;

/// Errors from storage operations (used by trait definitions in
/// codementor-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors related to signup.
///
/// The `Invalid*` variants cover basic format rules only; there is no
/// duplicate-email check and no password strength policy.
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("invalid password: {0}")]
    InvalidPassword(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_signup_error_display() {
        let err = SignupError::InvalidEmail("missing '@'".to_string());
        assert_eq!(err.to_string(), "invalid email: missing '@'");
    }

    #[test]
    fn test_signup_error_from_repository() {
        let err: SignupError = RepositoryError::Connection.into();
        assert!(matches!(err, SignupError::Storage(_)));
    }
}

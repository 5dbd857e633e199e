//! Signup: basic format validation followed by an unconditional insert.

use codementor_types::error::SignupError;
use codementor_types::user::{NewUser, User};
use tracing::info;

use crate::storage::Storage;

const MAX_NAME_CHARS: usize = 100;
const MAX_PASSWORD_CHARS: usize = 128;

/// Creates user records from signup submissions.
///
/// Validation covers format only. There is no duplicate-email check and the
/// password is stored as submitted -- both preserved behaviors of the
/// original system, not oversights to patch here.
pub struct SignupService<S: Storage> {
    storage: S,
}

impl<S: Storage> SignupService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Validate and persist a signup. No storage mutation on validation
    /// failure.
    pub async fn signup(&self, new_user: NewUser) -> Result<User, SignupError> {
        validate(&new_user)?;
        let user = self.storage.create_user(&new_user).await?;
        info!(user_id = user.id, "user signed up");
        Ok(user)
    }
}

fn validate(new_user: &NewUser) -> Result<(), SignupError> {
    if new_user.name.trim().is_empty() {
        return Err(SignupError::InvalidName("name must not be empty".to_string()));
    }
    if new_user.name.chars().count() > MAX_NAME_CHARS {
        return Err(SignupError::InvalidName(format!(
            "name must be at most {MAX_NAME_CHARS} characters"
        )));
    }
    if !is_valid_email(&new_user.email) {
        return Err(SignupError::InvalidEmail(format!(
            "'{}' is not a valid email address",
            new_user.email
        )));
    }
    if new_user.password.is_empty() {
        return Err(SignupError::InvalidPassword("password must not be empty".to_string()));
    }
    if new_user.password.chars().count() > MAX_PASSWORD_CHARS {
        return Err(SignupError::InvalidPassword(format!(
            "password must be at most {MAX_PASSWORD_CHARS} characters"
        )));
    }
    Ok(())
}

/// Minimal syntactic check: one '@', non-empty local part, and a dotted
/// domain. Not RFC 5322; the same bar the original system set.
fn is_valid_email(s: &str) -> bool {
    if s.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

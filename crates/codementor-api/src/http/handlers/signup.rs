//! Signup HTTP handler.
//!
//! POST /api/signup - Create a signup record.

use axum::Json;
use axum::extract::State;

use codementor_types::user::{NewUser, User};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/signup - Validate and persist a signup.
///
/// Returns the created record; the password field is never serialized.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<NewUser>,
) -> Result<Json<User>, AppError> {
    let user = state.signup_service.signup(body).await?;
    Ok(Json(user))
}

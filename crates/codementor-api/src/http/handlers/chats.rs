//! Chat listing HTTP handler.
//!
//! POST /api/fetch-user-chats - List a user's chats with derived names.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use codementor_types::chat::ChatSummary;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for the chat listing.
#[derive(Debug, Deserialize)]
pub struct FetchUserChatsRequest {
    #[serde(default)]
    pub email: String,
}

/// Response body for the chat listing.
#[derive(Debug, Serialize)]
pub struct FetchUserChatsResponse {
    pub chats: Vec<ChatSummary>,
}

/// POST /api/fetch-user-chats - Chats for an email, most recent first.
///
/// An empty email is a 400; an unknown one is a normal empty result.
pub async fn fetch_user_chats(
    State(state): State<AppState>,
    Json(body): Json<FetchUserChatsRequest>,
) -> Result<Json<FetchUserChatsResponse>, AppError> {
    if body.email.is_empty() {
        return Err(AppError::Validation("email must not be empty".to_string()));
    }

    let chats = state
        .chat_query_service
        .list_chats_for_email(&body.email)
        .await?;

    Ok(Json(FetchUserChatsResponse { chats }))
}

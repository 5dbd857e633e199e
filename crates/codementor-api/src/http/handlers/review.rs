//! Code review HTTP handler.
//!
//! POST /api/code-review - Forward a review turn to the LLM and persist the
//! transcript.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use codementor_core::llm::prompt::review_system_prompt;
use codementor_types::chat::ChatMessage;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for a review turn.
///
/// The client sends the complete transcript to date on every call,
/// including any assistant replies it wants persisted.
#[derive(Debug, Deserialize)]
pub struct CodeReviewRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub learning_mode: bool,
    /// Existing session token to continue; if absent, a new session is
    /// created and its token returned.
    pub session_id: Option<String>,
    /// When this resolves to a signed-up user, the session is attached to
    /// them.
    pub email: Option<String>,
}

/// Response body for a review turn.
#[derive(Debug, Serialize)]
pub struct CodeReviewResponse {
    pub feedback: String,
    pub session_id: String,
}

/// POST /api/code-review - One turn of a review conversation.
///
/// The LLM is called before the transcript is persisted, so a provider
/// failure leaves no storage mutation for this request.
pub async fn code_review(
    State(state): State<AppState>,
    Json(body): Json<CodeReviewRequest>,
) -> Result<Json<CodeReviewResponse>, AppError> {
    if body.messages.is_empty() {
        return Err(AppError::Validation("messages must not be empty".to_string()));
    }

    let system = review_system_prompt(body.learning_mode);
    let feedback = state.reviewer.complete(&system, &body.messages).await?;

    let session_id = state
        .session_manager
        .submit_turn(body.session_id, body.messages, body.email.as_deref())
        .await?;

    Ok(Json(CodeReviewResponse {
        feedback,
        session_id,
    }))
}

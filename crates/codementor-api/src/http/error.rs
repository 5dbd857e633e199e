//! Application error type mapping to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use codementor_types::error::{RepositoryError, SignupError};
use codementor_types::llm::LlmError;

/// Application-level error that maps to HTTP responses.
///
/// Unknown emails and fresh session tokens are normal results, never errors;
/// only validation failures and infrastructure problems land here.
#[derive(Debug)]
pub enum AppError {
    /// Signup validation or persistence failure.
    Signup(SignupError),
    /// LLM collaborator failure.
    Llm(LlmError),
    /// Storage failure outside of signup.
    Storage(RepositoryError),
    /// Malformed request detected before any service ran.
    Validation(String),
}

impl From<SignupError> for AppError {
    fn from(e: SignupError) -> Self {
        AppError::Signup(e)
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Storage(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Signup(SignupError::Storage(e)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
            }
            AppError::Signup(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::Llm(e) => (StatusCode::BAD_GATEWAY, "LLM_ERROR", e.to_string()),
            AppError::Storage(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

//! CompletionProvider trait definition.

use codementor_types::chat::ChatMessage;
use codementor_types::llm::LlmError;

/// Port for the external LLM collaborator: a system prompt plus the full
/// message list in, assistant text out.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition); see
/// [`super::BoxCompletionProvider`] for the dyn-compatible wrapper.
///
/// The returned text is handed straight back to the caller -- the server
/// never appends it to the stored transcript. Clients include it in the
/// next turn's full transcript if they want it persisted.
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "azure_openai").
    fn name(&self) -> &str;

    /// Send the conversation and return the assistant's reply.
    fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}

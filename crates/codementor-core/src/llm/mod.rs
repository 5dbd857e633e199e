//! The LLM collaborator seam.
//!
//! The core never talks to a provider directly; it defines the
//! [`CompletionProvider`] port plus an object-safe wrapper for runtime
//! injection, and builds the code-review system prompt. The concrete Azure
//! OpenAI implementation lives in codementor-infra.

pub mod box_provider;
pub mod prompt;
pub mod provider;

pub use box_provider::BoxCompletionProvider;
pub use provider::CompletionProvider;

//! LLM provider implementations.
//!
//! Contains the concrete implementation of the `CompletionProvider` trait
//! defined in `codementor-core`, targeting Azure OpenAI chat completions.

pub mod azure;

pub use azure::{AzureOpenAiConfig, AzureOpenAiProvider};

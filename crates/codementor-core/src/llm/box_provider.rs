//! BoxCompletionProvider -- object-safe dynamic dispatch wrapper for
//! CompletionProvider.
//!
//! 1. Define an object-safe `CompletionProviderDyn` trait with boxed futures
//! 2. Blanket-impl `CompletionProviderDyn` for all `T: CompletionProvider`
//! 3. `BoxCompletionProvider` wraps `Box<dyn CompletionProviderDyn>` and
//!    delegates

use std::future::Future;
use std::pin::Pin;

use codementor_types::chat::ChatMessage;
use codementor_types::llm::LlmError;

use super::provider::CompletionProvider;

/// Object-safe version of [`CompletionProvider`] with boxed futures.
///
/// Exists solely to enable dynamic dispatch; a blanket implementation is
/// provided for all types implementing `CompletionProvider`.
pub trait CompletionProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        system: &'a str,
        messages: &'a [ChatMessage],
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;
}

/// Blanket implementation: any `CompletionProvider` automatically implements
/// `CompletionProviderDyn`.
impl<T: CompletionProvider> CompletionProviderDyn for T {
    fn name(&self) -> &str {
        CompletionProvider::name(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        system: &'a str,
        messages: &'a [ChatMessage],
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(self.complete(system, messages))
    }
}

/// Type-erased completion provider.
///
/// `CompletionProvider` uses RPITIT, so it cannot be a trait object
/// directly; this wrapper provides equivalent methods that delegate to the
/// inner `CompletionProviderDyn`.
pub struct BoxCompletionProvider {
    inner: Box<dyn CompletionProviderDyn + Send + Sync>,
}

impl BoxCompletionProvider {
    /// Wrap a concrete `CompletionProvider` in a type-erased box.
    pub fn new<T: CompletionProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Send the conversation and return the assistant's reply.
    pub async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
    ) -> Result<String, LlmError> {
        self.inner.complete_boxed(system, messages).await
    }
}

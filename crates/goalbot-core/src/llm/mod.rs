//! CompletionProvider trait definition.
//!
//! The abstraction over the chat-completion API. Uses native async fn in
//! traits (RPITIT, Rust 2024 edition); there is no streaming surface --
//! every call blocks until the provider returns or errors.
//!
//! The concrete implementation lives in goalbot-infra (`OpenAiProvider`).

use goalbot_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends.
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g. "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}

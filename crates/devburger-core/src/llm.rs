//! ChatModel trait definition.
//!
//! The single abstraction over the language-model provider. The
//! orchestrator treats a completion as an opaque call over the full
//! transcript that yields either final text or a batch of tool calls.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//!
//! Implementations live in devburger-infra (e.g., `OpenAiChatModel`).

use devburger_types::llm::{CompletionRequest, LlmError, ModelReply};

/// Trait for chat-model backends.
pub trait ChatModel: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send one completion request and receive the model's reply.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<ModelReply, LlmError>> + Send;
}

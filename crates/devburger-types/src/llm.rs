//! Chat-model request/reply types for DevBurger.
//!
//! These types model the boundary with the language-model provider: one
//! completion request over the full transcript, answered by either final
//! text or a batch of tool calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::{ConversationTurn, ToolCall};

/// Declaration of a callable tool, in the shape the model is told about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema for the argument payload.
    pub parameters: Value,
}

/// Request to a chat model for one completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    /// The full transcript, in conversation order.
    pub turns: Vec<ConversationTurn>,
    /// Tools offered for this call. Empty on the summary pass after a tool
    /// round, so the reply is always final text.
    pub tools: Vec<ToolSpec>,
    pub temperature: Option<f64>,
    pub max_tokens: u32,
}

/// What the model produced: either final text for the customer, or a batch
/// of tool calls to execute before asking again.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    Text(String),
    ToolCalls(Vec<ToolCall>),
}

/// Errors from chat-model operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

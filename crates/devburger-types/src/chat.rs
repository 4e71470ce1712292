//! Conversation transcript types for DevBurger.
//!
//! A customer's conversation is an ordered, append-only sequence of
//! [`ConversationTurn`]s. Tool rounds are recorded verbatim: the model's
//! requested calls land as one `ToolIntent` turn, followed by exactly one
//! `ToolResult` turn per requested call, before the model is invoked again.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call identifier; ties a result back to its request.
    pub id: String,
    /// Registered tool name (e.g. "listMenu", "finalizeOrder").
    pub name: String,
    /// Raw JSON argument payload. Decoded into a validated request type at
    /// the tool-registry boundary, never consumed untyped by business logic.
    pub arguments: Value,
}

/// One turn in a customer's conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ConversationTurn {
    /// Fixed attendant instructions, seeded once when the session is created.
    System { content: String },
    /// An inbound customer message.
    User { content: String },
    /// A model reply shown to the customer.
    Assistant { content: String },
    /// The model's tool requests for this round, captured verbatim so the
    /// transcript the model sees on the next call stays consistent.
    ToolIntent { calls: Vec<ToolCall> },
    /// The serialized outcome of one requested call.
    ToolResult {
        /// The call identifier from the preceding `ToolIntent` this answers.
        call_id: String,
        tool_name: String,
        content: String,
    },
}

impl ConversationTurn {
    /// Short role name for logging and display.
    pub fn role_name(&self) -> &'static str {
        match self {
            ConversationTurn::System { .. } => "system",
            ConversationTurn::User { .. } => "user",
            ConversationTurn::Assistant { .. } => "assistant",
            ConversationTurn::ToolIntent { .. } => "tool_intent",
            ConversationTurn::ToolResult { .. } => "tool_result",
        }
    }

    /// Whether this turn starts a new round (an inbound customer message).
    pub fn is_user(&self) -> bool {
        matches!(self, ConversationTurn::User { .. })
    }
}

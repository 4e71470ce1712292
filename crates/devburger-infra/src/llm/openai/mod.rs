//! OpenAiChatModel -- concrete [`ChatModel`] implementation for any
//! OpenAI-compatible chat-completions endpoint.
//!
//! Sends non-streaming requests to `{base_url}/chat/completions` with
//! bearer authentication and maps the transcript turns to the wire message
//! shapes, including the assistant tool-call / tool-result replay the
//! provider requires for a consistent conversation.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use devburger_core::llm::ChatModel;
use devburger_types::chat::{ConversationTurn, ToolCall};
use devburger_types::llm::{CompletionRequest, LlmError, ModelReply};

use self::types::{
    ChatRequest, ChatRequestMessage, ChatResponse, FunctionDeclaration, ToolDeclaration,
    WireFunctionCall, WireToolCall,
};

/// OpenAI-compatible chat-model client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the Authorization header. It never appears in Debug output,
/// Display output, or tracing logs.
pub struct OpenAiChatModel {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAiChatModel {
    /// Create a new client against the official OpenAI endpoint.
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Override the base URL (compatible providers, proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Convert a generic [`CompletionRequest`] into the wire request.
    fn to_wire_request(&self, request: &CompletionRequest) -> ChatRequest {
        let messages = request
            .turns
            .iter()
            .map(|turn| match turn {
                ConversationTurn::System { content } => ChatRequestMessage::system(content),
                ConversationTurn::User { content } => ChatRequestMessage::user(content),
                ConversationTurn::Assistant { content } => ChatRequestMessage::assistant(content),
                ConversationTurn::ToolIntent { calls } => {
                    ChatRequestMessage::assistant_tool_calls(
                        calls
                            .iter()
                            .map(|call| WireToolCall {
                                id: call.id.clone(),
                                kind: "function".to_string(),
                                function: WireFunctionCall {
                                    name: call.name.clone(),
                                    arguments: call.arguments.to_string(),
                                },
                            })
                            .collect(),
                    )
                }
                ConversationTurn::ToolResult {
                    call_id, content, ..
                } => ChatRequestMessage::tool(call_id, content),
            })
            .collect();

        let tools = request
            .tools
            .iter()
            .map(|spec| ToolDeclaration {
                kind: "function",
                function: FunctionDeclaration {
                    name: spec.name.clone(),
                    description: spec.description.clone(),
                    parameters: spec.parameters.clone(),
                },
            })
            .collect();

        ChatRequest {
            model: request.model.clone(),
            messages,
            tools,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

// OpenAiChatModel intentionally does NOT derive Debug to prevent accidental
// exposure of internal state including the API key.

impl ChatModel for OpenAiChatModel {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<ModelReply, LlmError> {
        let body = self.to_wire_request(request);

        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited {
                    retry_after_ms: None,
                },
                400 => LlmError::InvalidRequest(error_body),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let Some(choice) = parsed.choices.into_iter().next() else {
            return Err(LlmError::Deserialization(
                "response contained no choices".to_string(),
            ));
        };

        match choice.message.tool_calls {
            Some(calls) if !calls.is_empty() => {
                let mut out = Vec::with_capacity(calls.len());
                for call in calls {
                    let arguments = serde_json::from_str(&call.function.arguments).map_err(|e| {
                        LlmError::Deserialization(format!(
                            "tool call '{}' carried invalid JSON arguments: {e}",
                            call.function.name
                        ))
                    })?;
                    out.push(ToolCall {
                        id: call.id,
                        name: call.function.name,
                        arguments,
                    });
                }
                Ok(ModelReply::ToolCalls(out))
            }
            _ => match choice.message.content {
                Some(text) => Ok(ModelReply::Text(text)),
                None => Err(LlmError::Deserialization(
                    "response carried neither text nor tool calls".to_string(),
                )),
            },
        }
    }
}

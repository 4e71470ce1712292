//! Conversation orchestrator: the tool-calling round loop.
//!
//! [`Orchestrator::handle_message`] drives one round: append the user turn,
//! ask the model, execute any requested tools in the order the model asked
//! for them, feed the results back, and return the final text. Errors never
//! escape its boundary -- a model breakdown degrades to a fixed fallback
//! reply instead of a crash.

use tracing::{debug, error, info};

use devburger_types::llm::{CompletionRequest, LlmError, ModelReply};

use crate::catalog::CatalogRepository;
use crate::ledger::OrderLedger;
use crate::llm::ChatModel;
use crate::session::{Session, SessionStore};
use crate::tools::{ToolName, ToolRegistry};

/// Reply sent when the model call breaks down mid-round.
pub const FALLBACK_REPLY: &str = "Desculpe, tive um erro interno. Pode repetir?";

/// Tunables forwarded on every model invocation.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

/// Drives the request/response cycle for one inbound message at a time.
pub struct Orchestrator<M, C, L> {
    model: M,
    registry: ToolRegistry<C, L>,
    sessions: SessionStore,
    settings: ModelSettings,
}

impl<M, C, L> Orchestrator<M, C, L>
where
    M: ChatModel,
    C: CatalogRepository,
    L: OrderLedger,
{
    pub fn new(
        model: M,
        registry: ToolRegistry<C, L>,
        sessions: SessionStore,
        settings: ModelSettings,
    ) -> Self {
        Self {
            model,
            registry,
            sessions,
            settings,
        }
    }

    /// The session store, for inspection (status reporting, tests).
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Process one inbound message and produce the reply text.
    ///
    /// Holds the customer's session lock for the whole round, so concurrent
    /// messages from the same customer serialize while different customers
    /// run in parallel. Never returns an error: a failed model call yields
    /// [`FALLBACK_REPLY`].
    pub async fn handle_message(&self, customer_id: &str, text: &str) -> String {
        let handle = self.sessions.checkout(customer_id);
        let mut session = handle.lock().await;

        session.push_user(text);
        info!(
            customer = customer_id,
            turns = session.turns().len(),
            "processing message"
        );

        match self.run_round(&mut session).await {
            Ok(reply) => {
                session.push_assistant(reply.clone());
                self.sessions.apply_retention(&mut session);
                reply
            }
            Err(e) => {
                error!(customer = customer_id, error = %e, "round failed, sending fallback");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// One round: first model pass with tools offered, then (if the model
    /// requested tools) execute them all and make a summary pass without
    /// tool schemas. At most one tool round-trip per user message; the
    /// second reply is always final text.
    async fn run_round(&self, session: &mut Session) -> Result<String, LlmError> {
        match self.model.complete(&self.request(session, true)).await? {
            ModelReply::Text(text) => Ok(text),
            ModelReply::ToolCalls(calls) => {
                info!(count = calls.len(), "model requested tools");
                session.push_tool_intent(calls.clone());

                for call in &calls {
                    let result = self.registry.execute(&call.name, &call.arguments).await;
                    debug!(tool = %call.name, call_id = %call.id, "tool executed");
                    session.push_tool_result(call.id.clone(), call.name.clone(), result);
                }

                match self.model.complete(&self.request(session, false)).await? {
                    ModelReply::Text(text) => Ok(text),
                    // No schemas were offered, so this is a provider fault.
                    ModelReply::ToolCalls(_) => Err(LlmError::Provider {
                        message: "model requested tools in the summary pass".to_string(),
                    }),
                }
            }
        }
    }

    fn request(&self, session: &Session, with_tools: bool) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            turns: session.turns().to_vec(),
            tools: if with_tools {
                ToolName::specs()
            } else {
                Vec::new()
            },
            temperature: Some(self.settings.temperature),
            max_tokens: self.settings.max_tokens,
        }
    }
}

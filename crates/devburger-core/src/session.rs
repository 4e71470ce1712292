//! Per-customer session store.
//!
//! The store owns every conversation transcript, keyed by customer id.
//! Sessions are created lazily on first contact (seeded with the fixed
//! System turn) and mutated under a per-key mutex: one active handler per
//! customer, unordered across different customers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use devburger_types::chat::{ConversationTurn, ToolCall};

/// How much transcript history a session keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetentionPolicy {
    /// Keep every turn for the life of the process.
    #[default]
    Unbounded,
    /// Keep at most this many turns, dropping the oldest complete rounds.
    /// The System turn is never dropped, and a round (User turn plus its
    /// tool turns and reply) is always dropped whole, so a `ToolIntent` is
    /// never separated from its `ToolResult`s.
    MaxTurns(usize),
}

/// One customer's conversation state.
#[derive(Debug, Clone)]
pub struct Session {
    customer_id: String,
    turns: Vec<ConversationTurn>,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

impl Session {
    fn new(customer_id: &str, system_prompt: &str) -> Self {
        let now = Utc::now();
        Self {
            customer_id: customer_id.to_string(),
            turns: vec![ConversationTurn::System {
                content: system_prompt.to_string(),
            }],
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// The transcript in conversation order (insertion order, never
    /// reordered).
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn::User {
            content: text.into(),
        });
        self.touch();
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn::Assistant {
            content: text.into(),
        });
        self.touch();
    }

    /// Record the model's tool requests verbatim.
    pub fn push_tool_intent(&mut self, calls: Vec<ToolCall>) {
        self.turns.push(ConversationTurn::ToolIntent { calls });
        self.touch();
    }

    /// Record one tool outcome, associated to its request by call id.
    pub fn push_tool_result(
        &mut self,
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) {
        self.turns.push(ConversationTurn::ToolResult {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            content: content.into(),
        });
        self.touch();
    }

    fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// Drop the oldest complete rounds until the transcript fits the policy.
    ///
    /// A round starts at a User turn and runs to (but not including) the
    /// next User turn; the leading System turn is untouchable. The newest
    /// round is never dropped, even if it alone exceeds the cap.
    fn enforce(&mut self, policy: RetentionPolicy) {
        let RetentionPolicy::MaxTurns(max) = policy else {
            return;
        };
        while self.turns.len() > max {
            let Some(first_user) = self.turns.iter().position(ConversationTurn::is_user) else {
                break;
            };
            let Some(next_user) = self
                .turns
                .iter()
                .skip(first_user + 1)
                .position(ConversationTurn::is_user)
                .map(|offset| first_user + 1 + offset)
            else {
                break;
            };
            self.turns.drain(first_user..next_user);
        }
    }
}

/// The cross-request map from customer id to transcript.
///
/// The only shared mutable structure in the core. Access is synchronized
/// per key: [`SessionStore::checkout`] hands out an `Arc<Mutex<Session>>`
/// and handlers hold the lock for their whole round.
pub struct SessionStore {
    sessions: DashMap<String, Arc<Mutex<Session>>>,
    system_prompt: String,
    policy: RetentionPolicy,
}

impl SessionStore {
    pub fn new(system_prompt: impl Into<String>, policy: RetentionPolicy) -> Self {
        Self {
            sessions: DashMap::new(),
            system_prompt: system_prompt.into(),
            policy,
        }
    }

    /// Get the session handle for a customer, creating and seeding it on
    /// first contact. The returned mutex serializes handlers per customer.
    pub fn checkout(&self, customer_id: &str) -> Arc<Mutex<Session>> {
        self.sessions
            .entry(customer_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(customer = customer_id, "creating session");
                Arc::new(Mutex::new(Session::new(customer_id, &self.system_prompt)))
            })
            .clone()
    }

    /// Apply the store's retention policy after a round completes.
    pub fn apply_retention(&self, session: &mut Session) {
        session.enforce(self.policy);
    }

    /// Number of sessions currently held.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

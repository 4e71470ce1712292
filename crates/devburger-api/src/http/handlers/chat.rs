//! Inbound message webhook handler.
//!
//! Accepts the Twilio webhook shape: form fields `From` (the customer's
//! number) and `Body` (the message text). The reply is returned as plain
//! text for the channel adapter to wrap in whatever envelope it needs.
//!
//! The handler is infallible by design: the orchestrator converts every
//! internal failure into a degraded reply string.

use std::time::Instant;

use axum::extract::{Form, State};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::state::AppState;

/// The Twilio webhook payload, reduced to the two fields the agent needs.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    /// The customer identifier (the sender's number).
    #[serde(rename = "From")]
    pub from: String,
    /// The message text.
    #[serde(rename = "Body")]
    pub body: String,
}

/// POST /chat - Process one inbound message and reply with text.
pub async fn receive_message(
    State(state): State<AppState>,
    Form(inbound): Form<InboundMessage>,
) -> String {
    let start = Instant::now();
    let request_id = Uuid::now_v7();
    info!(%request_id, customer = %inbound.from, "inbound message");

    let reply = state
        .orchestrator
        .handle_message(&inbound.from, &inbound.body)
        .await;

    debug!(
        %request_id,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "reply produced"
    );
    reply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_message_parses_twilio_form_fields() {
        let inbound: InboundMessage =
            serde_urlencoded::from_str("From=%2B5511999990000&Body=quanto+custa+o+X-Python%3F")
                .unwrap();
        assert_eq!(inbound.from, "+5511999990000");
        assert_eq!(inbound.body, "quanto custa o X-Python?");
    }
}

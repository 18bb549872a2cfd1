//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording every exchange
//! with the reasoning service (persona, prompt, reply or failure) to a
//! structured transcript.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! transcript in a machine-readable format (JSONL).

use coscientist_domain::{AgentRole, HypothesisId};
use serde_json::{Value, json};

/// A structured conversation event for logging.
///
/// The adapter adds the `type` and `timestamp` fields when writing.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "reasoning_exchange", "reasoning_failure").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// A prompt and the reply it received.
    pub fn exchange(
        role: AgentRole,
        hypothesis_id: Option<&HypothesisId>,
        prompt: &str,
        response: &str,
    ) -> Self {
        Self::new(
            "reasoning_exchange",
            json!({
                "role": role.as_str(),
                "hypothesis_id": hypothesis_id.map(HypothesisId::as_str),
                "prompt": prompt,
                "response": response,
            }),
        )
    }

    /// A prompt whose call failed.
    pub fn failure(
        role: AgentRole,
        hypothesis_id: Option<&HypothesisId>,
        prompt: &str,
        error: &str,
    ) -> Self {
        Self::new(
            "reasoning_failure",
            json!({
                "role": role.as_str(),
                "hypothesis_id": hypothesis_id.map(HypothesisId::as_str),
                "prompt": prompt,
                "error": error,
            }),
        )
    }
}

/// Port for logging conversation events to a structured log.
///
/// The `log` method is synchronous and infallible: a transcript that cannot
/// be written must never fail the research run.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

//! Role executors.
//!
//! Each role wraps the reasoning gateway and the extraction contract with a
//! persona and a prompt policy. Roles are stateless with respect to the
//! pipeline: they take hypotheses by value and hand back updated copies,
//! and every hypothesis gets its own conversation.
//!
//! A failed reasoning call never aborts a batch. The failure is recorded on
//! the hypothesis (`error`) and the Orchestrator decides whether the stage
//! as a whole failed.

pub mod evolution;
pub mod generation;
pub mod proximity;
pub mod ranking;
pub mod reflection;
pub mod supervisor;
pub mod synthesis;

pub use evolution::{EvolutionOutcome, EvolutionRole};
pub use generation::GenerationRole;
pub use proximity::ProximityRole;
pub use ranking::{RankingOutcome, RankingRole};
pub use reflection::ReflectionRole;
pub use supervisor::SupervisorRole;
pub use synthesis::SynthesisRole;

use crate::config::RoleSettings;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::reasoning_gateway::{GatewayError, ReasoningGateway};
use coscientist_domain::{AgentRole, Conversation, HypothesisId};
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors a role reports instead of recording them on a hypothesis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoleError {
    #[error("{role} call failed: {source}")]
    Gateway {
        role: AgentRole,
        #[source]
        source: GatewayError,
    },

    #[error("No hypotheses to rank")]
    NothingToRank,
}

impl RoleError {
    pub(crate) fn gateway(role: AgentRole) -> impl FnOnce(GatewayError) -> Self {
        move |source| RoleError::Gateway { role, source }
    }
}

/// Shared machinery for every role: one reasoning call inside a conversation.
pub struct RoleRunner<G: ReasoningGateway + 'static> {
    gateway: Arc<G>,
    settings: Arc<RoleSettings>,
    logger: Arc<dyn ConversationLogger>,
    max_concurrency: usize,
}

impl<G: ReasoningGateway + 'static> Clone for RoleRunner<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            settings: Arc::clone(&self.settings),
            logger: Arc::clone(&self.logger),
            max_concurrency: self.max_concurrency,
        }
    }
}

impl<G: ReasoningGateway + 'static> RoleRunner<G> {
    pub fn new(
        gateway: Arc<G>,
        settings: Arc<RoleSettings>,
        logger: Arc<dyn ConversationLogger>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            gateway,
            settings,
            logger,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Send `prompt` as the next user turn of `conversation`.
    ///
    /// On success the reply is appended to the conversation. A blank reply
    /// counts as [`GatewayError::EmptyResponse`]. Every exchange is logged.
    pub async fn converse(
        &self,
        role: AgentRole,
        conversation: &mut Conversation,
        prompt: String,
        subject: Option<&HypothesisId>,
    ) -> Result<String, GatewayError> {
        conversation.add_user_message(prompt.clone());
        let request = self.settings.request(role, conversation.messages());

        let result = match self.gateway.invoke(&request).await {
            Ok(text) if text.trim().is_empty() => Err(GatewayError::EmptyResponse),
            other => other,
        };

        match result {
            Ok(text) => {
                debug!(role = %role, hypothesis = ?subject.map(HypothesisId::as_str), chars = text.len(), "Reasoning call succeeded");
                self.logger
                    .log(ConversationEvent::exchange(role, subject, &prompt, &text));
                conversation.add_assistant_message(text.clone());
                Ok(text)
            }
            Err(e) => {
                warn!(role = %role, hypothesis = ?subject.map(HypothesisId::as_str), "Reasoning call failed: {}", e);
                self.logger.log(ConversationEvent::failure(
                    role,
                    subject,
                    &prompt,
                    &e.to_string(),
                ));
                Err(e)
            }
        }
    }

    /// One-shot call in a fresh conversation with `persona`.
    pub async fn ask(
        &self,
        role: AgentRole,
        persona: &str,
        prompt: String,
        subject: Option<&HypothesisId>,
    ) -> Result<String, GatewayError> {
        let mut conversation = Conversation::new(persona);
        self.converse(role, &mut conversation, prompt, subject).await
    }

    /// Run `f` over `items` with at most `max_concurrency` calls in flight.
    ///
    /// Results come back in input order.
    pub async fn fan_out<T, R, F, Fut>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = R>,
    {
        stream::iter(items)
            .map(f)
            .buffered(self.max_concurrency)
            .collect()
            .await
    }
}

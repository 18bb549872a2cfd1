//! Test doubles shared by the use-case tests.

use crate::config::RoleSettings;
use crate::ports::conversation_logger::NoConversationLogger;
use crate::ports::reasoning_gateway::{GatewayError, ReasoningGateway, ReasoningRequest};
use crate::use_cases::roles::RoleRunner;
use async_trait::async_trait;
use coscientist_domain::{AgentRole, ResearchGoal};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub(crate) const DEFAULT_RESPONSE: &str = "(default response)";

type Responder = Box<dyn Fn(&ReasoningRequest) -> Result<String, GatewayError> + Send + Sync>;

/// Gateway that replays scripted replies per role.
///
/// Queued replies are consumed first; once a role's queue is empty its
/// responder (if any) answers, otherwise [`DEFAULT_RESPONSE`].
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    queued: Mutex<HashMap<AgentRole, VecDeque<Result<String, GatewayError>>>>,
    responders: Mutex<HashMap<AgentRole, Responder>>,
    requests: Mutex<Vec<ReasoningRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, role: AgentRole, reply: Result<String, GatewayError>) {
        self.queued
            .lock()
            .unwrap()
            .entry(role)
            .or_default()
            .push_back(reply);
    }

    pub fn respond<F>(&self, role: AgentRole, f: F)
    where
        F: Fn(&ReasoningRequest) -> Result<String, GatewayError> + Send + Sync + 'static,
    {
        self.responders.lock().unwrap().insert(role, Box::new(f));
    }

    pub fn requests(&self) -> Vec<ReasoningRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls_for(&self, role: AgentRole) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.role == role)
            .count()
    }
}

#[async_trait]
impl ReasoningGateway for ScriptedGateway {
    async fn invoke(&self, request: &ReasoningRequest) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        let queued = self
            .queued
            .lock()
            .unwrap()
            .get_mut(&request.role)
            .and_then(VecDeque::pop_front);
        if let Some(reply) = queued {
            return reply;
        }
        match self.responders.lock().unwrap().get(&request.role) {
            Some(f) => f(request),
            None => Ok(DEFAULT_RESPONSE.to_string()),
        }
    }
}

pub(crate) fn runner(
    gateway: ScriptedGateway,
) -> (RoleRunner<ScriptedGateway>, Arc<ScriptedGateway>) {
    let gateway = Arc::new(gateway);
    let runner = RoleRunner::new(
        Arc::clone(&gateway),
        Arc::new(RoleSettings::default()),
        Arc::new(NoConversationLogger),
        1,
    );
    (runner, gateway)
}

pub(crate) fn caffeine_goal() -> ResearchGoal {
    ResearchGoal::parse(
        "To investigate the effect of caffeine intake on reaction time in sleep-deprived adults.",
    )
    .unwrap()
}

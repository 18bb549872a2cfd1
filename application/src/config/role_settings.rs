//! Reasoning-call settings shared by every role.

use crate::ports::reasoning_gateway::ReasoningRequest;
use coscientist_domain::{AgentRole, Message, Model};
use serde::{Deserialize, Serialize};

/// Model, temperatures and token limit for reasoning calls.
///
/// Each role has its own default temperature: creative roles run warmer,
/// critical ones colder. A global override replaces all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSettings {
    pub model: Model,
    pub temperature_override: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for RoleSettings {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature_override: None,
            max_tokens: Some(4000),
        }
    }
}

impl RoleSettings {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature_override = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn default_temperature(role: AgentRole) -> f32 {
        match role {
            AgentRole::Generation => 0.7,
            AgentRole::Reflection => 0.2,
            AgentRole::Proximity => 0.2,
            AgentRole::Ranking => 0.3,
            AgentRole::Evolution => 0.5,
            AgentRole::MetaReview => 0.4,
            AgentRole::Supervisor => 0.3,
        }
    }

    /// Temperature sent for `role`; `None` when the model rejects one.
    pub fn temperature_for(&self, role: AgentRole) -> Option<f32> {
        if !self.model.accepts_temperature() {
            return None;
        }
        Some(
            self.temperature_override
                .unwrap_or_else(|| Self::default_temperature(role)),
        )
    }

    pub fn request(&self, role: AgentRole, messages: Vec<Message>) -> ReasoningRequest {
        ReasoningRequest {
            role,
            model: self.model.clone(),
            temperature: self.temperature_for(role),
            max_tokens: self.max_tokens,
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_role_defaults() {
        let settings = RoleSettings::default();
        assert_eq!(settings.temperature_for(AgentRole::Generation), Some(0.7));
        assert_eq!(settings.temperature_for(AgentRole::Reflection), Some(0.2));
    }

    #[test]
    fn test_override_applies_to_all_roles() {
        let settings = RoleSettings::default().with_temperature(Some(1.0));
        assert_eq!(settings.temperature_for(AgentRole::Ranking), Some(1.0));
        assert_eq!(settings.temperature_for(AgentRole::Supervisor), Some(1.0));
    }

    #[test]
    fn test_reasoning_model_gets_no_temperature() {
        let settings = RoleSettings::new(Model::O3Mini).with_temperature(Some(0.9));
        let request = settings.request(AgentRole::Generation, vec![Message::user("hi")]);
        assert_eq!(request.temperature, None);
        assert_eq!(request.max_tokens, Some(4000));
    }
}

//! Reasoning gateway port
//!
//! Defines the interface for sending a role-scoped conversation to a
//! text-generation service and getting raw text back.

use async_trait::async_trait;
use coscientist_domain::{AgentRole, Message, Model};
use thiserror::Error;

/// Errors that can occur at the reasoning service boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Timeout")]
    Timeout,

    #[error("Empty response")]
    EmptyResponse,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether retrying the same request may succeed.
    ///
    /// Connection failures, timeouts, rate limits and 5xx statuses are
    /// transient. Everything else is permanent for this request.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::ConnectionError(_)
            | GatewayError::RateLimited(_)
            | GatewayError::Timeout => true,
            GatewayError::RequestFailed { status, .. } => *status >= 500,
            GatewayError::ModelNotAvailable(_)
            | GatewayError::EmptyResponse
            | GatewayError::Other(_) => false,
        }
    }
}

/// One call to the reasoning service.
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningRequest {
    /// Role issuing the call, for logging and routing
    pub role: AgentRole,
    pub model: Model,
    /// `None` for models that reject a temperature parameter
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Persona first, then the running history, ending with the new prompt
    pub messages: Vec<Message>,
}

/// Gateway to the reasoning service
///
/// Adapters live in the infrastructure layer. Retrying transient failures
/// is the adapter's job; callers treat every error as final.
#[async_trait]
pub trait ReasoningGateway: Send + Sync {
    async fn invoke(&self, request: &ReasoningRequest) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(GatewayError::Timeout.is_transient());
        assert!(GatewayError::RateLimited("slow down".into()).is_transient());
        assert!(
            GatewayError::RequestFailed {
                status: 503,
                message: "unavailable".into()
            }
            .is_transient()
        );
        assert!(
            !GatewayError::RequestFailed {
                status: 401,
                message: "bad key".into()
            }
            .is_transient()
        );
        assert!(!GatewayError::EmptyResponse.is_transient());
    }
}

//! Error types for the OpenAI-compatible adapter

use coscientist_application::GatewayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Map a transport failure onto the port's error taxonomy.
pub(crate) fn classify_transport(e: &reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() || e.is_request() {
        GatewayError::ConnectionError(e.to_string())
    } else if e.is_decode() {
        GatewayError::Other(format!("Malformed response body: {e}"))
    } else {
        GatewayError::Other(e.to_string())
    }
}

/// Map a non-success HTTP status onto the port's error taxonomy.
pub(crate) fn classify_status(status: u16, body: &str, model: &str) -> GatewayError {
    let message = super::protocol::error_message(body).unwrap_or_else(|| body.trim().to_string());
    match status {
        429 => GatewayError::RateLimited(message),
        404 if message.contains("model") => GatewayError::ModelNotAvailable(model.to_string()),
        _ => GatewayError::RequestFailed { status, message },
    }
}

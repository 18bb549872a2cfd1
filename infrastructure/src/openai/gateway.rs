//! Reasoning gateway over an OpenAI-compatible HTTP API

use super::error::{OpenAiError, classify_status, classify_transport};
use super::protocol::{ChatRequest, ChatResponse, completions_url};
use crate::config::FileReasoningConfig;
use async_trait::async_trait;
use coscientist_application::{GatewayError, ReasoningGateway, ReasoningRequest};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Exponential backoff for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): base * 2^(attempt-1), capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Run `op` until it succeeds, fails permanently, or retries run out.
    pub async fn run<F, Fut>(&self, mut op: F) -> Result<String, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<String, GatewayError>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    warn!(
                        "Transient reasoning failure ({}), retry {}/{} in {:?}",
                        e, attempt, self.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// [`ReasoningGateway`] backed by `POST {base_url}/chat/completions`.
pub struct OpenAiGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    retry: RetryPolicy,
}

impl OpenAiGateway {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, OpenAiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("co-scientist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: completions_url(base_url),
            api_key: api_key.into(),
            retry: RetryPolicy::default(),
        })
    }

    /// Build from the `[reasoning]` section, reading the key from its env var.
    pub fn from_config(config: &FileReasoningConfig) -> Result<Self, OpenAiError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| OpenAiError::MissingApiKey(config.api_key_env.clone()))?;
        let gateway = Self::new(&config.base_url, api_key, config.timeout())?;
        info!("Reasoning gateway ready at {}", gateway.endpoint);
        Ok(gateway.with_retry(RetryPolicy {
            max_retries: config.max_retries,
            ..RetryPolicy::default()
        }))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_once(&self, request: &ReasoningRequest) -> Result<String, GatewayError> {
        let body = ChatRequest::from_request(request);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(
                status.as_u16(),
                &text,
                request.model.as_str(),
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| classify_transport(&e))?;
        parsed.into_text().ok_or(GatewayError::EmptyResponse)
    }
}

#[async_trait]
impl ReasoningGateway for OpenAiGateway {
    async fn invoke(&self, request: &ReasoningRequest) -> Result<String, GatewayError> {
        debug!(
            "{} -> {} ({} messages)",
            request.role.as_str(),
            request.model,
            request.messages.len()
        );
        self.retry.run(move || self.send_once(request)).await
    }
}

//! Reasoning service configuration from TOML (`[reasoning]` section)

use coscientist_application::RoleSettings;
use coscientist_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw reasoning service configuration
///
/// # Example
///
/// ```toml
/// [reasoning]
/// model = "gpt-4o-mini"
/// temperature = 0.4             # overrides every per-role default
/// max_tokens = 4000
/// base_url = "https://api.openai.com/v1"
/// api_key_env = "OPENAI_API_KEY"
/// timeout_secs = 120
/// max_retries = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReasoningConfig {
    pub model: Option<String>,
    /// Global temperature override; unset keeps the per-role defaults
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// OpenAI-compatible API root
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// Retries for transient failures (connection, timeout, 429, 5xx)
    pub max_retries: u32,
}

impl Default for FileReasoningConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: None,
            max_tokens: Some(4000),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 120,
            max_retries: 3,
        }
    }
}

impl FileReasoningConfig {
    /// Parse the model name. A blank name is an error and falls back to the default.
    pub fn parse_model(&self) -> (Model, Vec<ConfigIssue>) {
        match &self.model {
            None => (Model::default(), Vec::new()),
            Some(name) if name.trim().is_empty() => (
                Model::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::UnknownValue,
                    "reasoning.model: model name cannot be empty",
                )],
            ),
            Some(name) => (name.trim().parse().unwrap_or_default(), Vec::new()),
        }
    }

    pub fn to_role_settings(&self) -> (RoleSettings, Vec<ConfigIssue>) {
        let (model, mut issues) = self.parse_model();
        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::TemperatureOutOfRange,
                format!("reasoning.temperature must be within 0.0-2.0 (got {t})"),
            ));
        }
        if self.temperature.is_some() && !model.accepts_temperature() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownValue,
                format!("reasoning.temperature is ignored by {model}"),
            ));
        }
        let settings = RoleSettings::new(model)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);
        (settings, issues)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, if the configured variable is set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_is_custom() {
        let config = FileReasoningConfig {
            model: Some("llama-3.1-70b".to_string()),
            ..Default::default()
        };
        let (model, issues) = config.parse_model();
        assert_eq!(model, Model::Custom("llama-3.1-70b".to_string()));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_blank_model_is_error() {
        let config = FileReasoningConfig {
            model: Some("  ".to_string()),
            ..Default::default()
        };
        let (model, issues) = config.parse_model();
        assert_eq!(model, Model::default());
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_temperature_range() {
        let config = FileReasoningConfig {
            temperature: Some(3.5),
            ..Default::default()
        };
        let (settings, issues) = config.to_role_settings();
        assert_eq!(issues[0].code, ConfigIssueCode::TemperatureOutOfRange);
        assert_eq!(settings.temperature_override, Some(3.5));
    }

    #[test]
    fn test_temperature_ignored_by_reasoning_model() {
        let config = FileReasoningConfig {
            model: Some("o3-mini".to_string()),
            temperature: Some(0.5),
            ..Default::default()
        };
        let (_, issues) = config.to_role_settings();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }
}

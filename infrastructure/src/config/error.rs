//! Configuration errors

use coscientist_domain::ConfigIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

impl ConfigError {
    /// `Invalid` carrying the error-severity issues, if there are any.
    pub fn from_issues(issues: &[ConfigIssue]) -> Option<Self> {
        let errors: Vec<ConfigIssue> = issues.iter().filter(|i| i.is_error()).cloned().collect();
        (!errors.is_empty()).then_some(ConfigError::Invalid(errors))
    }
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue.message))
        .collect::<Vec<_>>()
        .join("\n")
}

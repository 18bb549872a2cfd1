//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod output;
mod pipeline;
mod reasoning;

pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use pipeline::FilePipelineConfig;
pub use reasoning::FileReasoningConfig;

use coscientist_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning service connection and sampling
    pub reasoning: FileReasoningConfig,
    /// Stage sizes, thresholds and failure policy
    pub pipeline: FilePipelineConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. The model name and temperature range
    /// 2. Pipeline counts, thresholds and enumerated values
    /// 3. Retry and timeout settings
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Reasoning settings
        issues.extend(self.reasoning.to_role_settings().1);

        // 2. Pipeline parameters
        issues.extend(self.pipeline.to_pipeline_params().1);

        // 3. Transport
        if self.reasoning.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                coscientist_domain::ConfigIssueCode::ZeroCount,
                "reasoning.timeout_secs must be at least 1",
            ));
        }

        issues
    }

    /// Render the effective configuration as TOML (for `--show-config`).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coscientist_domain::{Model, OutputFormat, ReportFormat};
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[reasoning]
model = "gpt-4o-mini"
temperature = 0.4
max_retries = 5

[pipeline]
hypothesis_count = 7
iterations = 2
output_format = "grant_proposal"

[output]
format = "full"
color = false

[logging]
file = false
directory = "/tmp/co-scientist"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.reasoning.parse_model().0, Model::Gpt4oMini);
        assert_eq!(config.reasoning.temperature, Some(0.4));
        assert_eq!(config.reasoning.max_retries, 5);
        assert_eq!(config.reasoning.api_key_env, "OPENAI_API_KEY");

        let (params, issues) = config.pipeline.to_pipeline_params();
        assert_eq!(params.hypothesis_count, 7);
        assert_eq!(params.iterations, 2);
        assert_eq!(params.report_format, ReportFormat::GrantProposal);
        assert!(issues.is_empty());

        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(!config.logging.file);
        assert_eq!(
            config.logging.directory,
            Some(PathBuf::from("/tmp/co-scientist"))
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[pipeline]
top_k = 2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pipeline.top_k, Some(2));
        // Defaults should apply
        assert!(config.reasoning.model.is_none());
        assert!(config.output.color);
        assert!(config.logging.file);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let toml_str = r#"
[reasoning]
model = ""
temperature = 4.0
timeout_secs = 0

[pipeline]
iterations = 9
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 3);
        assert_eq!(issues.iter().filter(|i| !i.is_error()).count(), 1);
    }

    #[test]
    fn test_validate_covers_conversion_issues() {
        let toml_str = r#"
[reasoning]
temperature = 4.0

[pipeline]
iterations = 9
output_format = "poster"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        let converted = config
            .reasoning
            .to_role_settings()
            .1
            .into_iter()
            .chain(config.pipeline.to_pipeline_params().1);
        for issue in converted {
            assert!(issues.contains(&issue), "missing {:?}", issue);
        }
    }

    #[test]
    fn test_effective_config_renders_as_toml() {
        let rendered = FileConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[reasoning]"));
        assert!(rendered.contains("api_key_env = \"OPENAI_API_KEY\""));
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, FileConfig::default());
    }
}

//! Pipeline configuration from TOML (`[pipeline]` section)

use coscientist_application::PipelineParams;
use coscientist_domain::{ConfigIssue, ConfigIssueCode, ReportFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw pipeline configuration
///
/// Unset fields keep the [`PipelineParams`] defaults.
///
/// # Example
///
/// ```toml
/// [pipeline]
/// hypothesis_count = 7
/// iterations = 2
/// proximity_threshold = 6.0
/// output_format = "research_brief"
/// max_concurrency = 4
/// time_budget_secs = 900
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    pub hypothesis_count: Option<usize>,
    pub iterations: Option<u32>,
    pub max_iterations: Option<u32>,
    pub top_k: Option<usize>,
    pub pairwise_threshold: Option<usize>,
    pub proximity_threshold: Option<f64>,
    pub acceptance_threshold: Option<f64>,
    pub report_cap: Option<usize>,
    /// Report template: scientific_report, grant_proposal or research_brief
    pub output_format: Option<String>,
    pub failure_tolerance: Option<f64>,
    pub max_concurrency: Option<usize>,
    pub use_supervisor: Option<bool>,
    pub executive_summary: Option<bool>,
    pub validate_hypotheses: Option<bool>,
    pub time_budget_secs: Option<u64>,
}

impl FilePipelineConfig {
    /// Parse the report template name, falling back to the default with a warning.
    pub fn parse_output_format(&self) -> (Option<ReportFormat>, Vec<ConfigIssue>) {
        match &self.output_format {
            None => (None, Vec::new()),
            Some(s) => match s.parse::<ReportFormat>() {
                Ok(format) => (Some(format), Vec::new()),
                Err(e) => (
                    None,
                    vec![ConfigIssue::warning(
                        ConfigIssueCode::UnknownValue,
                        format!("pipeline.output_format: {e}, falling back to '{}'", ReportFormat::default()),
                    )],
                ),
            },
        }
    }

    /// Overlay the set fields on the defaults and validate the result.
    pub fn to_pipeline_params(&self) -> (PipelineParams, Vec<ConfigIssue>) {
        let defaults = PipelineParams::default();
        let (format, mut issues) = self.parse_output_format();

        let params = PipelineParams {
            hypothesis_count: self.hypothesis_count.unwrap_or(defaults.hypothesis_count),
            iterations: self.iterations.unwrap_or(defaults.iterations),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            top_k: self.top_k.unwrap_or(defaults.top_k),
            pairwise_threshold: self
                .pairwise_threshold
                .unwrap_or(defaults.pairwise_threshold),
            proximity_threshold: self
                .proximity_threshold
                .unwrap_or(defaults.proximity_threshold),
            acceptance_threshold: self
                .acceptance_threshold
                .unwrap_or(defaults.acceptance_threshold),
            report_cap: self.report_cap.unwrap_or(defaults.report_cap),
            report_format: format.unwrap_or(defaults.report_format),
            failure_tolerance: self.failure_tolerance.unwrap_or(defaults.failure_tolerance),
            max_concurrency: self.max_concurrency.unwrap_or(defaults.max_concurrency),
            use_supervisor: self.use_supervisor.unwrap_or(defaults.use_supervisor),
            executive_summary: self.executive_summary.unwrap_or(defaults.executive_summary),
            validate_hypotheses: self
                .validate_hypotheses
                .unwrap_or(defaults.validate_hypotheses),
            time_budget: self
                .time_budget_secs
                .map(Duration::from_secs)
                .or(defaults.time_budget),
            ..defaults
        };

        issues.extend(params.validate());
        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_keep_defaults() {
        let (params, issues) = FilePipelineConfig::default().to_pipeline_params();
        assert_eq!(params, PipelineParams::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = FilePipelineConfig {
            hypothesis_count: Some(7),
            output_format: Some("brief".to_string()),
            time_budget_secs: Some(60),
            ..Default::default()
        };
        let (params, issues) = config.to_pipeline_params();
        assert_eq!(params.hypothesis_count, 7);
        assert_eq!(params.report_format, ReportFormat::ResearchBrief);
        assert_eq!(params.time_budget, Some(Duration::from_secs(60)));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_unknown_format_warns() {
        let config = FilePipelineConfig {
            output_format: Some("poster".to_string()),
            ..Default::default()
        };
        let (params, issues) = config.to_pipeline_params();
        assert_eq!(params.report_format, ReportFormat::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::UnknownValue);
    }

    #[test]
    fn test_invalid_values_are_collected() {
        let config = FilePipelineConfig {
            top_k: Some(0),
            proximity_threshold: Some(12.0),
            ..Default::default()
        };
        let (_, issues) = config.to_pipeline_params();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(ConfigIssue::is_error));
    }
}

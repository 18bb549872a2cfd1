//! Pipeline parameters: orchestration control.
//!
//! [`PipelineParams`] groups the static parameters that control the
//! research pipeline in [`RunPipelineUseCase`](crate::use_cases::run_pipeline::RunPipelineUseCase).
//! The Supervisor's plan may adjust the count, iteration and threshold
//! values for a single run; everything else is fixed at startup.

use coscientist_domain::ranking::DEFAULT_PAIRWISE_THRESHOLD;
use coscientist_domain::{ConfigIssue, ConfigIssueCode, PlanSettings, ReportFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Above this pairwise threshold a single tournament needs over 45 judgments.
const EXPENSIVE_PAIRWISE_THRESHOLD: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Hypotheses requested from Generation.
    pub hypothesis_count: usize,
    /// Refinement iterations.
    pub iterations: u32,
    /// Upper bound on iterations, whatever the plan asks for.
    pub max_iterations: u32,
    /// Hypotheses refined per iteration.
    pub top_k: usize,
    /// Largest set ranked by pairwise tournament; larger sets are scored.
    pub pairwise_threshold: usize,
    /// Minimum proximity score (1-10) to stay in the active set.
    pub proximity_threshold: f64,
    /// Minimum normalised proximity (score / 10) for an evolved variant to
    /// replace its parent.
    pub acceptance_threshold: f64,
    /// Hypotheses included in the report.
    pub report_cap: usize,
    pub report_format: ReportFormat,
    /// Largest tolerated fraction of failed reasoning calls in one stage.
    pub failure_tolerance: f64,
    /// Reasoning calls in flight at once within a stage.
    pub max_concurrency: usize,
    /// Let the Supervisor analyse the goal and adjust the plan.
    pub use_supervisor: bool,
    pub executive_summary: bool,
    pub summary_max_length: usize,
    /// Drop hypotheses failing the statement checklist from the active set.
    pub validate_hypotheses: bool,
    /// Search results quoted to Generation when a literature source is set.
    pub literature_results: usize,
    /// Wall-clock cap, checked between stages.
    pub time_budget: Option<Duration>,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            hypothesis_count: 5,
            iterations: 3,
            max_iterations: 5,
            top_k: 3,
            pairwise_threshold: DEFAULT_PAIRWISE_THRESHOLD,
            proximity_threshold: 6.0,
            acceptance_threshold: 0.7,
            report_cap: 5,
            report_format: ReportFormat::default(),
            failure_tolerance: 0.5,
            max_concurrency: 1,
            use_supervisor: true,
            executive_summary: true,
            summary_max_length: 500,
            validate_hypotheses: false,
            literature_results: 5,
            time_budget: None,
        }
    }
}

impl PipelineParams {
    // ==================== Builder Methods ====================

    pub fn with_hypothesis_count(mut self, count: usize) -> Self {
        self.hypothesis_count = count;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn with_supervisor(mut self, enabled: bool) -> Self {
        self.use_supervisor = enabled;
        self
    }

    pub fn with_executive_summary(mut self, enabled: bool) -> Self {
        self.executive_summary = enabled;
        self
    }

    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    // ==================== Derived Values ====================

    /// Settings for the Supervisor's default step sequence.
    pub fn plan_settings(&self) -> PlanSettings {
        PlanSettings {
            hypothesis_count: self.hypothesis_count,
            iterations: self.clamped_iterations(self.iterations),
            proximity_threshold: self.proximity_threshold,
            format: self.report_format,
        }
    }

    pub fn clamped_iterations(&self, iterations: u32) -> u32 {
        iterations.min(self.max_iterations)
    }

    /// Whether `failed` out of `total` calls exceeds the tolerance.
    pub fn exceeds_tolerance(&self, failed: usize, total: usize) -> bool {
        total > 0 && failed as f64 / total as f64 > self.failure_tolerance
    }

    // ==================== Validation ====================

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (name, value) in [
            ("hypothesis_count", self.hypothesis_count),
            ("top_k", self.top_k),
            ("report_cap", self.report_cap),
            ("max_concurrency", self.max_concurrency),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroCount,
                    format!("pipeline.{name} must be at least 1"),
                ));
            }
        }

        if !(1.0..=10.0).contains(&self.proximity_threshold) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ThresholdOutOfRange,
                format!(
                    "pipeline.proximity_threshold must be within 1-10 (got {})",
                    self.proximity_threshold
                ),
            ));
        }
        for (name, value) in [
            ("acceptance_threshold", self.acceptance_threshold),
            ("failure_tolerance", self.failure_tolerance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ThresholdOutOfRange,
                    format!("pipeline.{name} must be within 0.0-1.0 (got {value})"),
                ));
            }
        }

        if self.iterations > self.max_iterations {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::IterationsClamped,
                format!(
                    "pipeline.iterations ({}) exceeds max_iterations ({}); {} will run",
                    self.iterations, self.max_iterations, self.max_iterations
                ),
            ));
        }
        if self.pairwise_threshold > EXPENSIVE_PAIRWISE_THRESHOLD {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ExpensiveTournament,
                format!(
                    "pipeline.pairwise_threshold {} allows tournaments of {} comparisons",
                    self.pairwise_threshold,
                    self.pairwise_threshold * (self.pairwise_threshold - 1) / 2
                ),
            ));
        }

        issues
    }
}

//! Type definitions for the RunPipeline use case.

use crate::config::{PipelineParams, RoleSettings};
use crate::use_cases::roles::RoleError;
use coscientist_domain::{
    Comparison, DomainError, Hypothesis, HypothesisStore, PipelineState, ReportFormat,
    ResearchPlan, ResearchReport, Stage,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that end a research run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunPipelineError {
    #[error("Invalid research goal: {}", .0.join("; "))]
    InvalidGoal(Vec<String>),

    #[error("Generation produced no hypotheses")]
    NoHypotheses,

    #[error("No hypotheses left to rank")]
    NothingToRank,

    #[error("{failed} of {total} reasoning calls failed during {stage}")]
    TooManyFailures {
        stage: Stage,
        failed: usize,
        total: usize,
    },

    #[error(transparent)]
    Role(RoleError),

    #[error("Time budget of {budget:?} exhausted after {elapsed:?}")]
    BudgetExhausted { budget: Duration, elapsed: Duration },

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Domain(DomainError),
}

impl RunPipelineError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunPipelineError::Cancelled)
    }
}

impl From<RoleError> for RunPipelineError {
    fn from(e: RoleError) -> Self {
        match e {
            RoleError::NothingToRank => RunPipelineError::NothingToRank,
            other => RunPipelineError::Role(other),
        }
    }
}

impl From<DomainError> for RunPipelineError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidGoal(issues) => RunPipelineError::InvalidGoal(issues),
            DomainError::Cancelled => RunPipelineError::Cancelled,
            other => RunPipelineError::Domain(other),
        }
    }
}

/// Input for the RunPipeline use case
#[derive(Debug, Clone)]
pub struct RunPipelineInput {
    pub goal: String,
    pub params: PipelineParams,
}

impl RunPipelineInput {
    pub fn new(goal: impl Into<String>, params: PipelineParams) -> Self {
        Self {
            goal: goal.into(),
            params,
        }
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub plan: ResearchPlan,
    /// Full history and the final active set
    pub store: HypothesisStore,
    /// Hypotheses as generated, before any review
    pub initial: Vec<Hypothesis>,
    /// Final active set in rank order
    pub ranked: Vec<Hypothesis>,
    /// Judgments from the final pairwise ranking, if one ran
    pub comparisons: Vec<Comparison>,
    pub report: ResearchReport,
    pub iterations_run: u32,
    /// Recoverable problems met along the way
    pub issues: Vec<String>,
    pub state: PipelineState,
    /// Where the result bundle was written, when a sink is configured
    pub saved_to: Option<String>,
}

/// A run that ended in `Failed`.
///
/// Nothing produced before the failure is discarded: the store holds every
/// hypothesis created so far.
#[derive(Error, Debug)]
#[error("Research run failed during {stage} ({state}): {cause}")]
pub struct PipelineFailure {
    pub research_goal: String,
    pub stage: Stage,
    /// Last state reached before the failure
    pub state: PipelineState,
    #[source]
    pub cause: RunPipelineError,
    pub store: HypothesisStore,
}

impl PipelineFailure {
    pub fn is_cancelled(&self) -> bool {
        self.cause.is_cancelled()
    }
}

// ==================== Result Bundle ====================

/// Snapshot written once per completed run.
///
/// The key layout is read by downstream tooling and must stay stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultBundle {
    pub research_goal: String,
    pub configuration: BundleConfiguration,
    pub hypotheses: BundleHypotheses,
    pub final_report: ResearchReport,
    pub meta: BundleMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleConfiguration {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub max_iterations: u32,
    pub iterations: u32,
    pub hypothesis_count: usize,
    pub report_format: ReportFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleHypotheses {
    pub initial: Vec<Hypothesis>,
    pub ranked: Vec<Hypothesis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleMeta {
    pub model: String,
    /// ISO 8601 local time
    pub timestamp: String,
}

impl ResultBundle {
    pub fn new(
        goal: &str,
        settings: &RoleSettings,
        params: &PipelineParams,
        output: &PipelineOutput,
        timestamp: String,
    ) -> Self {
        let model = settings.model.to_string();
        Self {
            research_goal: goal.to_string(),
            configuration: BundleConfiguration {
                model: model.clone(),
                temperature: settings.temperature_override,
                max_tokens: settings.max_tokens,
                max_iterations: params.max_iterations,
                iterations: output.iterations_run,
                hypothesis_count: output.initial.len(),
                report_format: output.report.format,
            },
            hypotheses: BundleHypotheses {
                initial: output.initial.clone(),
                ranked: output.ranked.clone(),
            },
            final_report: output.report.clone(),
            meta: BundleMeta { model, timestamp },
        }
    }
}

//! Domain layer for co-scientist
//!
//! This crate contains the core research logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Hypothesis lifecycle
//!
//! A [`Hypothesis`] is created by Generation or Evolution and then annotated
//! in place by Reflection (review), Proximity (relevance) and Ranking
//! (standing). Records are never destroyed: the [`HypothesisStore`] keeps the
//! full history and a separate *active* set that later stages operate on.
//!
//! ## Tournament ranking
//!
//! Small sets are ranked by an all-pairs tournament, larger ones by
//! independent per-criterion scoring. See [`ranking`].
//!
//! ## Extraction contract
//!
//! Reasoning-service replies are free text. The [`extraction`] functions are
//! total: anything they cannot find falls back to a documented default.

pub mod config;
pub mod core;
pub mod extraction;
pub mod hypothesis;
pub mod literature;
pub mod pipeline;
pub mod plan;
pub mod prompt;
pub mod ranking;
pub mod report;
pub mod session;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, goal::ResearchGoal, model::Model};
pub use hypothesis::{
    FilterOutcome, Hypothesis, HypothesisDraft, HypothesisId, HypothesisIdGenerator,
    HypothesisStore, Origin, Proximity, Review, Standing,
};
pub use literature::{Citation, CitationStyle, FormattedCitation, SearchResult};
pub use pipeline::{PipelineState, Stage};
pub use plan::{
    AgentRole, ExecutionStatus, PlanSettings, PlanStatus, PlanStep, QueryAnalysis, ResearchPlan,
    UpdateReason, analyze_query,
};
pub use prompt::PromptTemplate;
pub use ranking::{Comparison, Criterion, RankingMethod, Winner};
pub use report::{ReportFormat, ResearchReport};
pub use session::{Conversation, Message, Role};
pub use validation::{ValidationReport, validate_hypothesis, validate_research_goal};

//! Research plan: the ordered pipeline steps the Orchestrator follows,
//! and the advisory text matching that adjusts it mid-run.

pub mod analysis;
pub mod entities;

pub use analysis::{QueryAnalysis, analyze_query};
pub use entities::{
    AgentRole, ExecutionStatus, PlanSettings, PlanStatus, PlanStep, ResearchPlan, UpdateReason,
    task,
};

//! Research plan entities

use crate::core::string::take_chars;
use crate::report::ReportFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Task names used in plan steps.
pub mod task {
    pub const GENERATE_INITIAL_HYPOTHESES: &str = "generate_initial_hypotheses";
    pub const REVIEW_HYPOTHESES: &str = "review_hypotheses";
    pub const EVALUATE_RELEVANCE: &str = "evaluate_relevance";
    pub const RANK_HYPOTHESES: &str = "rank_hypotheses";
    pub const IMPROVE_HYPOTHESES: &str = "improve_hypotheses";
    pub const RANK_FINAL_HYPOTHESES: &str = "rank_final_hypotheses";
    pub const CREATE_RESEARCH_REPORT: &str = "create_research_report";
    pub const CREATE_EXECUTIVE_SUMMARY: &str = "create_executive_summary";
}

/// Length of advisory text kept on the plan.
const NOTE_LEN: usize = 500;

/// A pipeline role a plan step is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRole {
    Generation,
    Reflection,
    Proximity,
    Ranking,
    Evolution,
    MetaReview,
    Supervisor,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Generation => "Generation",
            AgentRole::Reflection => "Reflection",
            AgentRole::Proximity => "Proximity",
            AgentRole::Ranking => "Ranking",
            AgentRole::Evolution => "Evolution",
            AgentRole::MetaReview => "MetaReview",
            AgentRole::Supervisor => "Supervisor",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub agent_role: AgentRole,
    pub task_name: String,
    pub params: Map<String, Value>,
}

impl PlanStep {
    pub fn new(agent_role: AgentRole, task_name: &str, params: Value) -> Self {
        let params = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            agent_role,
            task_name: task_name.to_string(),
            params,
        }
    }

    pub fn param_u64(&self, key: &str) -> Option<u64> {
        self.params.get(key).and_then(Value::as_u64)
    }

    pub fn param_f64(&self, key: &str) -> Option<f64> {
        self.params.get(key).and_then(Value::as_f64)
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}

/// Inputs for the default step sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanSettings {
    pub hypothesis_count: usize,
    pub iterations: u32,
    pub proximity_threshold: f64,
    pub format: ReportFormat,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            hypothesis_count: 3,
            iterations: 2,
            proximity_threshold: 6.0,
            format: ReportFormat::ScientificReport,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Planned,
    InProgress,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateReason {
    ExecutionStatus,
    ExecutionStatusAndFeedback,
}

/// Progress summary handed to a plan update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStatus {
    pub completed_steps: Vec<String>,
    pub current_step: String,
    pub issues: Vec<String>,
}

impl ExecutionStatus {
    /// Issues joined for display, or "none".
    pub fn issues_summary(&self) -> String {
        if self.issues.is_empty() {
            "none".to_string()
        } else {
            self.issues.join("; ")
        }
    }
}

/// Ordered pipeline steps with metadata (Entity)
///
/// Owned by the Orchestrator. Created once per run, then adjusted between
/// refinement iterations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchPlan {
    pub research_goal: String,
    pub steps: Vec<PlanStep>,
    /// Leading excerpt of the planning text the plan was derived from.
    pub reasoning: String,
    pub status: PlanStatus,
    pub created_at: String,
    pub last_updated: Option<String>,
    pub update_reason: Option<UpdateReason>,
    pub update_notes: Option<String>,
    /// Number of leading steps that have already run.
    pub executed_steps: usize,
}

impl ResearchPlan {
    /// The default sequence for `settings`.
    pub fn default_steps(settings: &PlanSettings) -> Vec<PlanStep> {
        vec![
            PlanStep::new(
                AgentRole::Generation,
                task::GENERATE_INITIAL_HYPOTHESES,
                json!({ "count": settings.hypothesis_count }),
            ),
            PlanStep::new(AgentRole::Reflection, task::REVIEW_HYPOTHESES, json!({})),
            PlanStep::new(
                AgentRole::Proximity,
                task::EVALUATE_RELEVANCE,
                json!({ "threshold": settings.proximity_threshold }),
            ),
            PlanStep::new(AgentRole::Ranking, task::RANK_HYPOTHESES, json!({})),
            PlanStep::new(
                AgentRole::Evolution,
                task::IMPROVE_HYPOTHESES,
                json!({ "iterations": settings.iterations }),
            ),
            PlanStep::new(AgentRole::Ranking, task::RANK_FINAL_HYPOTHESES, json!({})),
            PlanStep::new(
                AgentRole::MetaReview,
                task::CREATE_RESEARCH_REPORT,
                json!({ "format": settings.format.as_str() }),
            ),
        ]
    }

    /// Build a plan from the default sequence, adjusted by `planning_text`.
    ///
    /// Recognised phrases (case-insensitive):
    /// - "skip proximity evaluation" / "omit proximity": drop the Proximity step
    /// - "additional iterations" / "more iterations": one more refinement iteration
    /// - "fewer iterations" / "reduce iterations": one fewer, never below 1
    ///
    /// Text without a recognised phrase leaves the default sequence untouched.
    pub fn create(
        research_goal: impl Into<String>,
        settings: &PlanSettings,
        planning_text: &str,
        timestamp: impl Into<String>,
    ) -> Self {
        let lower = planning_text.to_lowercase();
        let mut steps = Self::default_steps(settings);

        if lower.contains("skip proximity evaluation") || lower.contains("omit proximity") {
            steps.retain(|s| s.agent_role != AgentRole::Proximity);
        }

        adjust_iterations(&mut steps, &lower);

        Self {
            research_goal: research_goal.into(),
            steps,
            reasoning: take_chars(planning_text, NOTE_LEN).to_string(),
            status: PlanStatus::Planned,
            created_at: timestamp.into(),
            last_updated: None,
            update_reason: None,
            update_notes: None,
            executed_steps: 0,
        }
    }

    /// Adjust the plan from update text (advisory).
    ///
    /// - "add step" / "additional step": append a MetaReview executive-summary step
    /// - "remove step" / "skip step": drop the last step, if it has not run yet
    /// - "additional iterations" / "more iterations": one more refinement iteration
    /// - "fewer iterations" / "reduce iterations": one fewer, never below 1
    ///
    /// The update is always recorded (`last_updated`, `update_reason`,
    /// `update_notes`) even when no phrase matched.
    pub fn apply_update(
        &mut self,
        update_text: &str,
        had_feedback: bool,
        timestamp: impl Into<String>,
    ) {
        let lower = update_text.to_lowercase();

        if lower.contains("add step") || lower.contains("additional step") {
            self.steps.push(PlanStep::new(
                AgentRole::MetaReview,
                task::CREATE_EXECUTIVE_SUMMARY,
                json!({}),
            ));
        }
        if (lower.contains("remove step") || lower.contains("skip step"))
            && self.executed_steps < self.steps.len()
        {
            self.steps.pop();
        }
        adjust_iterations(&mut self.steps, &lower);

        self.update_notes = Some(take_chars(update_text, NOTE_LEN).to_string());
        self.last_updated = Some(timestamp.into());
        self.update_reason = Some(if had_feedback {
            UpdateReason::ExecutionStatusAndFeedback
        } else {
            UpdateReason::ExecutionStatus
        });
    }

    pub fn has_role(&self, role: AgentRole) -> bool {
        self.steps.iter().any(|s| s.agent_role == role)
    }

    pub fn has_task(&self, task_name: &str) -> bool {
        self.steps.iter().any(|s| s.task_name == task_name)
    }

    fn step(&self, task_name: &str) -> Option<&PlanStep> {
        self.steps.iter().find(|s| s.task_name == task_name)
    }

    /// Hypotheses to generate, if the plan has a generation step.
    pub fn hypothesis_count(&self) -> Option<usize> {
        self.step(task::GENERATE_INITIAL_HYPOTHESES)
            .and_then(|s| s.param_u64("count"))
            .map(|n| n as usize)
    }

    /// Refinement iterations; 0 when the plan has no evolution step.
    pub fn iterations(&self) -> u32 {
        self.step(task::IMPROVE_HYPOTHESES)
            .and_then(|s| s.param_u64("iterations"))
            .map_or(0, |n| n.min(u64::from(u32::MAX)) as u32)
    }

    /// Relevance threshold, if proximity filtering is planned.
    pub fn proximity_threshold(&self) -> Option<f64> {
        self.step(task::EVALUATE_RELEVANCE)
            .map(|s| s.param_f64("threshold").unwrap_or(6.0))
    }

    pub fn report_format(&self) -> Option<ReportFormat> {
        self.step(task::CREATE_RESEARCH_REPORT)
            .and_then(|s| s.param_str("format"))
            .and_then(|f| f.parse().ok())
    }

    pub fn wants_executive_summary(&self) -> bool {
        self.has_task(task::CREATE_EXECUTIVE_SUMMARY)
    }

    /// Record that the next `n` steps have run.
    pub fn mark_executed(&mut self, n: usize) {
        self.executed_steps = (self.executed_steps + n).min(self.steps.len());
        self.status = PlanStatus::InProgress;
    }

    pub fn finish(&mut self, succeeded: bool) {
        self.status = if succeeded {
            PlanStatus::Completed
        } else {
            PlanStatus::Failed
        };
    }
}

/// Apply the iteration phrases in `lower` to every Evolution step.
fn adjust_iterations(steps: &mut [PlanStep], lower: &str) {
    let delta: i64 = if lower.contains("additional iterations") || lower.contains("more iterations")
    {
        1
    } else if lower.contains("fewer iterations") || lower.contains("reduce iterations") {
        -1
    } else {
        return;
    };
    for step in steps
        .iter_mut()
        .filter(|s| s.agent_role == AgentRole::Evolution)
    {
        let current = step.param_u64("iterations").unwrap_or(1);
        let adjusted = if delta > 0 {
            current + 1
        } else {
            current.saturating_sub(1).max(1)
        };
        step.params.insert("iterations".to_string(), json!(adjusted));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plan(text: &str) -> ResearchPlan {
        ResearchPlan::create(
            "To investigate caffeine",
            &PlanSettings::default(),
            text,
            "2024-01-01 00:00:00",
        )
    }

    // ==================== Creation Tests ====================

    #[test]
    fn test_default_sequence() {
        let plan = plan("Looks good as proposed.");
        let tasks: Vec<&str> = plan.steps.iter().map(|s| s.task_name.as_str()).collect();
        assert_eq!(
            tasks,
            vec![
                "generate_initial_hypotheses",
                "review_hypotheses",
                "evaluate_relevance",
                "rank_hypotheses",
                "improve_hypotheses",
                "rank_final_hypotheses",
                "create_research_report",
            ]
        );
        assert_eq!(plan.hypothesis_count(), Some(3));
        assert_eq!(plan.iterations(), 2);
        assert_eq!(plan.proximity_threshold(), Some(6.0));
        assert_eq!(plan.report_format(), Some(ReportFormat::ScientificReport));
        assert_eq!(plan.status, PlanStatus::Planned);
    }

    #[test]
    fn test_skip_proximity() {
        let plan = plan("We can omit proximity for this narrow question.");
        assert!(!plan.has_role(AgentRole::Proximity));
        assert_eq!(plan.proximity_threshold(), None);
        assert_eq!(plan.steps.len(), 6);
    }

    #[test]
    fn test_iteration_adjustments() {
        assert_eq!(plan("Plan MORE ITERATIONS please").iterations(), 3);
        assert_eq!(plan("fewer iterations").iterations(), 1);

        let settings = PlanSettings {
            iterations: 1,
            ..Default::default()
        };
        let plan = ResearchPlan::create("g", &settings, "reduce iterations", "t");
        assert_eq!(plan.iterations(), 1);
    }

    #[test]
    fn test_reasoning_is_truncated() {
        let text = "a".repeat(800);
        assert_eq!(plan(&text).reasoning.len(), 500);
    }

    // ==================== Update Tests ====================

    #[test]
    fn test_update_without_phrases_is_a_no_op_on_steps() {
        let mut plan = plan("");
        let before = plan.steps.clone();
        plan.apply_update("Continue as planned.", false, "t1");
        assert_eq!(plan.steps, before);
        assert_eq!(plan.update_reason, Some(UpdateReason::ExecutionStatus));
        assert_eq!(plan.last_updated.as_deref(), Some("t1"));
    }

    #[test]
    fn test_add_step_appends_executive_summary() {
        let mut plan = plan("");
        plan.apply_update("I suggest we add step for a summary", true, "t1");
        assert!(plan.wants_executive_summary());
        assert_eq!(
            plan.update_reason,
            Some(UpdateReason::ExecutionStatusAndFeedback)
        );
    }

    #[test]
    fn test_update_adjusts_iterations() {
        let mut plan = plan("");
        plan.apply_update("Results are promising; run additional iterations.", false, "t1");
        assert_eq!(plan.iterations(), 3);

        plan.apply_update("Let's reduce iterations now.", false, "t2");
        plan.apply_update("fewer iterations", false, "t3");
        plan.apply_update("fewer iterations", false, "t4");
        assert_eq!(plan.iterations(), 1);
    }

    #[test]
    fn test_remove_step_respects_executed_steps() {
        let mut plan = plan("");
        plan.apply_update("remove step", false, "t1");
        assert_eq!(plan.steps.len(), 6);
        assert!(!plan.has_task(task::CREATE_RESEARCH_REPORT));

        plan.mark_executed(6);
        plan.apply_update("skip step", false, "t2");
        assert_eq!(plan.steps.len(), 6);
    }
}

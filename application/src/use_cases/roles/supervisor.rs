//! Supervisor role: goal analysis, planning and plan updates.
//!
//! Unlike the other roles the Supervisor keeps one conversation for the
//! whole run, so later plan updates can refer back to the analysis. The
//! caller owns that conversation and passes it in.

use super::{RoleError, RoleRunner};
use crate::ports::reasoning_gateway::ReasoningGateway;
use coscientist_domain::{
    AgentRole, Conversation, ExecutionStatus, PlanSettings, PromptTemplate, QueryAnalysis,
    ResearchGoal, ResearchPlan, analyze_query,
};
use tracing::{debug, info};

pub struct SupervisorRole<G: ReasoningGateway + 'static> {
    runner: RoleRunner<G>,
}

impl<G: ReasoningGateway + 'static> SupervisorRole<G> {
    pub fn new(runner: RoleRunner<G>) -> Self {
        Self { runner }
    }

    pub fn conversation() -> Conversation {
        Conversation::new(PromptTemplate::supervisor_system())
    }

    pub async fn analyze(
        &self,
        conversation: &mut Conversation,
        goal: &ResearchGoal,
    ) -> Result<QueryAnalysis, RoleError> {
        let text = self
            .runner
            .converse(
                AgentRole::Supervisor,
                conversation,
                PromptTemplate::analysis_prompt(goal.content()),
                None,
            )
            .await
            .map_err(RoleError::gateway(AgentRole::Supervisor))?;
        let analysis = analyze_query(&text);
        debug!(?analysis, "Query analysis");
        Ok(analysis)
    }

    /// Ask for a plan and apply the recognised adjustments to the default sequence.
    pub async fn plan(
        &self,
        conversation: &mut Conversation,
        goal: &ResearchGoal,
        analysis: &QueryAnalysis,
        settings: &PlanSettings,
        timestamp: String,
    ) -> Result<ResearchPlan, RoleError> {
        let prompt = PromptTemplate::plan_prompt(
            goal.content(),
            analysis,
            &ResearchPlan::default_steps(settings),
        );
        let text = self
            .runner
            .converse(AgentRole::Supervisor, conversation, prompt, None)
            .await
            .map_err(RoleError::gateway(AgentRole::Supervisor))?;
        let plan = ResearchPlan::create(goal.content(), settings, &text, timestamp);
        info!(
            "Research plan: {} steps, {} iterations",
            plan.steps.len(),
            plan.iterations()
        );
        Ok(plan)
    }

    /// Revise `plan` from the execution status and optional user feedback.
    pub async fn update(
        &self,
        conversation: &mut Conversation,
        plan: &mut ResearchPlan,
        status: &ExecutionStatus,
        feedback: Option<&str>,
        timestamp: String,
    ) -> Result<(), RoleError> {
        let prompt = PromptTemplate::plan_update_prompt(plan, status, feedback);
        let text = self
            .runner
            .converse(AgentRole::Supervisor, conversation, prompt, None)
            .await
            .map_err(RoleError::gateway(AgentRole::Supervisor))?;
        let before = plan.steps.len();
        plan.apply_update(&text, feedback.is_some(), timestamp);
        if plan.steps.len() != before {
            info!("Plan updated: {} -> {} steps", before, plan.steps.len());
        }
        Ok(())
    }
}

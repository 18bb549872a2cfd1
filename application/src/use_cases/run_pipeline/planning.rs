//! Supervisor planning and plan updates.
//!
//! Planning is advisory. When the Supervisor cannot be reached the run
//! continues on the default step sequence the run started with.

use super::{Run, RunPipelineUseCase};
use crate::ports::progress::ProgressNotifier;
use crate::ports::reasoning_gateway::ReasoningGateway;
use crate::use_cases::roles::SupervisorRole;
use crate::use_cases::shared::display_timestamp;
use coscientist_domain::plan::task;
use coscientist_domain::{Conversation, ExecutionStatus, Stage};
use tracing::debug;

impl<G: ReasoningGateway + 'static> RunPipelineUseCase<G> {
    pub(super) async fn create_plan(
        &self,
        run: &mut Run,
        supervisor: &SupervisorRole<G>,
        conversation: &mut Conversation,
        progress: &dyn ProgressNotifier,
    ) {
        progress.on_stage_start(Stage::Planning, 2);

        let analysis = supervisor.analyze(conversation, &run.goal).await;
        progress.on_task_complete(Stage::Planning, analysis.is_ok());
        let analysis = match analysis {
            Ok(analysis) => analysis,
            Err(e) => {
                run.note(progress, format!("Goal analysis failed, using default plan: {e}"));
                progress.on_stage_complete(Stage::Planning);
                return;
            }
        };

        let settings = run.params.plan_settings();
        let plan = supervisor
            .plan(
                conversation,
                &run.goal,
                &analysis,
                &settings,
                display_timestamp(),
            )
            .await;
        progress.on_task_complete(Stage::Planning, plan.is_ok());
        match plan {
            Ok(plan) => run.plan = plan,
            Err(e) => run.note(progress, format!("Planning failed, using default plan: {e}")),
        }
        progress.on_stage_complete(Stage::Planning);
    }

    /// Let the Supervisor revise the plan after a refinement iteration.
    pub(super) async fn update_plan(
        &self,
        run: &mut Run,
        supervisor: &SupervisorRole<G>,
        conversation: &mut Conversation,
        iteration: u32,
        progress: &dyn ProgressNotifier,
    ) {
        let status = execution_status(run, iteration);
        let feedback = self.feedback.feedback(&status);
        if let Some(text) = &feedback {
            debug!("User feedback for plan update: {}", text);
        }

        if let Err(e) = supervisor
            .update(
                conversation,
                &mut run.plan,
                &status,
                feedback.as_deref(),
                display_timestamp(),
            )
            .await
        {
            run.note(progress, format!("Plan update skipped: {e}"));
        }
    }
}

fn execution_status(run: &Run, iteration: u32) -> ExecutionStatus {
    ExecutionStatus {
        completed_steps: run.plan.steps[..run.plan.executed_steps]
            .iter()
            .map(|s| s.task_name.clone())
            .collect(),
        current_step: format!("{} (iteration {iteration})", task::IMPROVE_HYPOTHESES),
        issues: run.issues.clone(),
    }
}

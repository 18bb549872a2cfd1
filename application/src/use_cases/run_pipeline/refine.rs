//! The refinement loop.
//!
//! Each iteration works on the same top-k working set: Reflection reviews
//! it, Evolution proposes variants, Proximity scores the variants. A refined
//! variant replaces its parent (in the working set and the active set) only
//! when its normalised proximity reaches the acceptance threshold; otherwise
//! the parent stays. A combination joins the active set under the same
//! rule. Every variant is kept in history either way.

use super::{Run, RunPipelineError, RunPipelineUseCase};
use crate::ports::progress::ProgressNotifier;
use crate::ports::reasoning_gateway::ReasoningGateway;
use crate::use_cases::roles::{
    EvolutionOutcome, EvolutionRole, ProximityRole, ReflectionRole, RoleRunner, SupervisorRole,
};
use coscientist_domain::{Conversation, Hypothesis, Origin, PipelineState, Stage};
use tracing::info;

impl<G: ReasoningGateway + 'static> RunPipelineUseCase<G> {
    /// Run up to `iterations` refinement passes. A supervisor plan update
    /// between passes may raise or lower the count. Returns the number run.
    pub(super) async fn refine(
        &self,
        run: &mut Run,
        runner: &RoleRunner<G>,
        supervisor: &SupervisorRole<G>,
        conversation: &mut Conversation,
        iterations: u32,
        progress: &dyn ProgressNotifier,
    ) -> Result<u32, RunPipelineError> {
        let reflection = ReflectionRole::new(runner.clone());
        let evolution = EvolutionRole::new(runner.clone());
        let proximity = ProximityRole::new(runner.clone());
        let top_k = run.params.top_k;

        let mut working: Vec<Hypothesis> = run
            .store
            .ranked()
            .into_iter()
            .take(top_k)
            .cloned()
            .collect();

        let mut total = iterations;
        let mut iteration = 0;
        while iteration < total {
            iteration += 1;
            self.boundary(run)?;
            run.state.advance(PipelineState::Refining { iteration })?;
            progress.on_iteration_start(iteration, total);
            info!(iteration, "Refinement iteration {}/{}", iteration, total);

            progress.on_stage_start(Stage::Reflection, working.len());
            let reviewed = reflection.run(&run.goal, working, progress).await;
            progress.on_stage_complete(Stage::Reflection);
            run.check_failures(Stage::Reflection, &reviewed)?;
            run.store.update_all(reviewed.iter().cloned())?;

            let expected = reviewed.len().min(top_k) + usize::from(reviewed.len() >= 2);
            progress.on_stage_start(Stage::Evolution, expected);
            let outcome = evolution
                .run(&run.goal, &reviewed, top_k, iteration, &run.ids, progress)
                .await;
            progress.on_stage_complete(Stage::Evolution);
            run.check_tolerance(
                Stage::Evolution,
                outcome.failed_calls(),
                outcome.variants().count(),
            )?;

            let EvolutionOutcome { refined, combined } = outcome;
            let (viable, failed): (Vec<Hypothesis>, Vec<Hypothesis>) = refined
                .into_iter()
                .chain(combined)
                .partition(|h| !h.has_error());

            progress.on_stage_start(Stage::Proximity, viable.len());
            let scored = proximity.run(&run.goal, viable, progress).await;
            progress.on_stage_complete(Stage::Proximity);
            run.check_failures(Stage::Proximity, &scored)?;

            working = reviewed;
            let mut accepted = 0;
            let evolved = scored.len() + failed.len();
            for variant in scored.into_iter().chain(failed) {
                if self.settle_variant(run, &mut working, variant)? {
                    accepted += 1;
                }
            }
            info!(
                iteration,
                "Accepted {} of {} evolved variants", accepted, evolved
            );

            if run.params.use_supervisor && iteration < total {
                self.update_plan(run, supervisor, conversation, iteration, progress)
                    .await;
                total = run.params.clamped_iterations(run.plan.iterations());
            }
        }

        Ok(iteration)
    }

    /// Store `variant` and decide whether it enters the active set.
    fn settle_variant(
        &self,
        run: &mut Run,
        working: &mut [Hypothesis],
        variant: Hypothesis,
    ) -> Result<bool, RunPipelineError> {
        let threshold = run.params.acceptance_threshold;
        let accept = !variant.has_error()
            && variant
                .proximity_score()
                .is_some_and(|score| score / 10.0 >= threshold);

        match variant.origin() {
            Origin::EvolvedIndividual if accept => {
                let parent = variant.parent_ids()[0].clone();
                let id = variant.id().clone();
                if let Some(slot) = working.iter_mut().find(|h| h.id() == &parent) {
                    *slot = variant.clone();
                }
                run.store.insert(variant)?;
                run.store.replace_active(&parent, id)?;
            }
            Origin::EvolvedCombination if accept => run.store.insert_active(variant)?,
            _ => run.store.insert(variant)?,
        }
        Ok(accept)
    }
}

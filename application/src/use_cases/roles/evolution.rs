//! Evolution role: refines and combines the top-ranked hypotheses.
//!
//! Every variant is a new record with its own id and explicit parents.
//! Variants start without review, proximity or standing.

use super::RoleRunner;
use crate::ports::progress::ProgressNotifier;
use crate::ports::reasoning_gateway::ReasoningGateway;
use coscientist_domain::extraction::parse_draft;
use coscientist_domain::{
    AgentRole, Hypothesis, HypothesisDraft, HypothesisId, HypothesisIdGenerator, PromptTemplate,
    ResearchGoal, Stage,
};
use tracing::info;

/// Variants produced by one evolution pass.
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// One individual refinement per input hypothesis, in input order
    pub refined: Vec<Hypothesis>,
    /// Hybrid of the top two, when there were at least two
    pub combined: Option<Hypothesis>,
}

impl EvolutionOutcome {
    pub fn variants(&self) -> impl Iterator<Item = &Hypothesis> {
        self.refined.iter().chain(self.combined.iter())
    }

    pub fn failed_calls(&self) -> usize {
        self.variants().filter(|h| h.has_error()).count()
    }
}

pub struct EvolutionRole<G: ReasoningGateway + 'static> {
    runner: RoleRunner<G>,
}

impl<G: ReasoningGateway + 'static> EvolutionRole<G> {
    pub fn new(runner: RoleRunner<G>) -> Self {
        Self { runner }
    }

    /// Refine `parent` using its review.
    ///
    /// When the call fails the variant is a copy of the parent's fields with
    /// the error recorded, so lineage stays complete.
    pub async fn refine(
        &self,
        goal: &ResearchGoal,
        parent: &Hypothesis,
        id: HypothesisId,
        iteration: u32,
    ) -> Hypothesis {
        let prompt = PromptTemplate::refinement_prompt(goal.content(), parent);
        match self
            .runner
            .ask(
                AgentRole::Evolution,
                PromptTemplate::evolution_system(),
                prompt,
                Some(parent.id()),
            )
            .await
        {
            Ok(text) => Hypothesis::refined(id, parent, parse_draft(&text), iteration),
            Err(e) => Hypothesis::refined(id, parent, HypothesisDraft::default(), iteration)
                .with_error(e.to_string()),
        }
    }

    /// Combine the two strongest hypotheses into one hybrid.
    pub async fn combine(
        &self,
        goal: &ResearchGoal,
        first: &Hypothesis,
        second: &Hypothesis,
        id: HypothesisId,
        iteration: u32,
    ) -> Hypothesis {
        let prompt = PromptTemplate::combination_prompt(goal.content(), first, second);
        match self
            .runner
            .ask(
                AgentRole::Evolution,
                PromptTemplate::evolution_system(),
                prompt,
                Some(first.id()),
            )
            .await
        {
            Ok(text) => Hypothesis::combined(id, first, second, parse_draft(&text), iteration),
            Err(e) => Hypothesis::combined(id, first, second, HypothesisDraft::default(), iteration)
                .with_error(e.to_string()),
        }
    }

    /// Evolve the first `top_k` of `ranked` (already in rank order).
    ///
    /// Ids are allocated before any call is made, so they do not depend on
    /// completion order.
    pub async fn run(
        &self,
        goal: &ResearchGoal,
        ranked: &[Hypothesis],
        top_k: usize,
        iteration: u32,
        ids: &HypothesisIdGenerator,
        progress: &dyn ProgressNotifier,
    ) -> EvolutionOutcome {
        let top = &ranked[..top_k.min(ranked.len())];
        let jobs: Vec<(&Hypothesis, HypothesisId)> =
            top.iter().map(|h| (h, ids.next_id())).collect();
        let combination_id = (top.len() >= 2).then(|| ids.next_id());

        let refined = self
            .runner
            .fan_out(jobs, |(parent, id)| async move {
                let variant = self.refine(goal, parent, id, iteration).await;
                progress.on_task_complete(Stage::Evolution, !variant.has_error());
                variant
            })
            .await;

        let combined = match combination_id {
            Some(id) => {
                let hybrid = self.combine(goal, &top[0], &top[1], id, iteration).await;
                progress.on_task_complete(Stage::Evolution, !hybrid.has_error());
                Some(hybrid)
            }
            None => None,
        };

        let outcome = EvolutionOutcome { refined, combined };
        info!(
            "Evolution pass {} produced {} variants ({} failed)",
            iteration,
            outcome.variants().count(),
            outcome.failed_calls()
        );
        outcome
    }
}

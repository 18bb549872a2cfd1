//! Proximity role: relevance of each hypothesis to the goal.
//!
//! Evaluation only annotates. Removing irrelevant hypotheses from the active
//! set is a separate step owned by the Orchestrator.

use super::RoleRunner;
use crate::ports::progress::ProgressNotifier;
use crate::ports::reasoning_gateway::ReasoningGateway;
use coscientist_domain::extraction::assess_proximity;
use coscientist_domain::{AgentRole, Hypothesis, PromptTemplate, Proximity, ResearchGoal, Stage};

pub struct ProximityRole<G: ReasoningGateway + 'static> {
    runner: RoleRunner<G>,
}

impl<G: ReasoningGateway + 'static> ProximityRole<G> {
    pub fn new(runner: RoleRunner<G>) -> Self {
        Self { runner }
    }

    /// Attach a proximity assessment. On failure the previous one (if any) is kept.
    pub async fn evaluate(&self, goal: &ResearchGoal, mut hypothesis: Hypothesis) -> Hypothesis {
        let prompt = PromptTemplate::proximity_prompt(goal.content(), &hypothesis);
        match self
            .runner
            .ask(
                AgentRole::Proximity,
                PromptTemplate::proximity_system(),
                prompt,
                Some(hypothesis.id()),
            )
            .await
        {
            Ok(text) => {
                let (score, is_relevant) = assess_proximity(&text);
                hypothesis.proximity = Some(Proximity {
                    score,
                    is_relevant,
                    evaluation: text,
                });
                hypothesis.error = None;
            }
            Err(e) => hypothesis.error = Some(e.to_string()),
        }
        hypothesis
    }

    pub async fn run(
        &self,
        goal: &ResearchGoal,
        hypotheses: Vec<Hypothesis>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<Hypothesis> {
        self.runner
            .fan_out(hypotheses, |h| async move {
                let evaluated = self.evaluate(goal, h).await;
                progress.on_task_complete(Stage::Proximity, !evaluated.has_error());
                evaluated
            })
            .await
    }
}

//! Generation role: proposes the initial hypotheses for a goal.

use super::{RoleError, RoleRunner};
use crate::ports::reasoning_gateway::ReasoningGateway;
use coscientist_domain::extraction::{parse_draft, parse_drafts};
use coscientist_domain::{
    AgentRole, Hypothesis, HypothesisIdGenerator, PromptTemplate, ResearchGoal,
    validate_hypothesis,
};
use tracing::{info, warn};

pub struct GenerationRole<G: ReasoningGateway + 'static> {
    runner: RoleRunner<G>,
}

impl<G: ReasoningGateway + 'static> GenerationRole<G> {
    pub fn new(runner: RoleRunner<G>) -> Self {
        Self { runner }
    }

    /// Ask for `count` hypotheses and parse what comes back.
    ///
    /// Best effort: fewer than `count` (even none) is not an error here.
    /// A reply without "Hypothesis N:" headers is read as a single draft.
    /// Each hypothesis carries its statement checklist.
    pub async fn run(
        &self,
        goal: &ResearchGoal,
        count: usize,
        literature: &[String],
        ids: &HypothesisIdGenerator,
    ) -> Result<Vec<Hypothesis>, RoleError> {
        let prompt = PromptTemplate::generation_prompt(goal.content(), count, literature);
        let text = self
            .runner
            .ask(
                AgentRole::Generation,
                PromptTemplate::generation_system(),
                prompt,
                None,
            )
            .await
            .map_err(RoleError::gateway(AgentRole::Generation))?;

        let mut drafts = parse_drafts(&text, count);
        if drafts.is_empty() {
            let single = parse_draft(&text);
            if !single.statement.is_empty() && count > 0 {
                drafts.push(single);
            }
        }
        if drafts.len() < count {
            warn!("Requested {} hypotheses, parsed {}", count, drafts.len());
        }

        let hypotheses: Vec<Hypothesis> = drafts
            .into_iter()
            .map(|draft| {
                let mut h = Hypothesis::generated(ids.next_id(), draft);
                h.checklist = Some(validate_hypothesis(&h.statement));
                h
            })
            .collect();

        info!("Generated {} hypotheses", hypotheses.len());
        Ok(hypotheses)
    }
}

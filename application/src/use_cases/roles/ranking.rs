//! Ranking role: runs the tournament over a hypothesis set.
//!
//! | Set size          | Method   | Reasoning calls |
//! |-------------------|----------|-----------------|
//! | `n <= threshold`  | Pairwise | `n(n-1)/2`      |
//! | `n > threshold`   | Scoring  | `n`             |
//!
//! Judgments are gathered first (possibly concurrently) and the win counts
//! are accumulated afterwards, in pair order, so the ranking never depends
//! on call completion order.

use super::{RoleError, RoleRunner};
use crate::ports::progress::ProgressNotifier;
use crate::ports::reasoning_gateway::{GatewayError, ReasoningGateway};
use coscientist_domain::extraction::{criteria_scores, determine_winner};
use coscientist_domain::ranking::{apply_pairwise, apply_scores, pairings};
use coscientist_domain::{
    AgentRole, Comparison, Criterion, Hypothesis, PromptTemplate, RankingMethod, ResearchGoal,
    Stage, Winner,
};
use std::collections::BTreeMap;
use tracing::info;

/// A ranked set plus the evidence behind it.
#[derive(Debug, Clone)]
pub struct RankingOutcome {
    pub method: RankingMethod,
    /// Hypotheses in rank order, each with its standing set
    pub ranked: Vec<Hypothesis>,
    /// Pairwise judgments; empty for the scoring method
    pub comparisons: Vec<Comparison>,
    pub failed_calls: usize,
    pub total_calls: usize,
}

pub struct RankingRole<G: ReasoningGateway + 'static> {
    runner: RoleRunner<G>,
}

impl<G: ReasoningGateway + 'static> RankingRole<G> {
    pub fn new(runner: RoleRunner<G>) -> Self {
        Self { runner }
    }

    /// Rank `hypotheses`, choosing the method by set size.
    ///
    /// A failed comparison counts as a tie; a failed scoring call leaves the
    /// hypothesis with no scores (overall 0) and records the error on it.
    pub async fn run(
        &self,
        goal: &ResearchGoal,
        hypotheses: Vec<Hypothesis>,
        pairwise_threshold: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<RankingOutcome, RoleError> {
        if hypotheses.is_empty() {
            return Err(RoleError::NothingToRank);
        }
        let method = RankingMethod::for_set_size(hypotheses.len(), pairwise_threshold);
        info!(
            "Ranking {} hypotheses by {:?} ({} calls)",
            hypotheses.len(),
            method,
            method.judgment_count(hypotheses.len())
        );
        let outcome = match method {
            RankingMethod::Pairwise => self.tournament(goal, hypotheses, progress).await,
            RankingMethod::Scoring => self.score_all(goal, hypotheses, progress).await,
        };
        Ok(outcome)
    }

    /// Judge one pair. Returns the winner and the judge's full reasoning.
    pub async fn compare(
        &self,
        goal: &ResearchGoal,
        first: &Hypothesis,
        second: &Hypothesis,
    ) -> Result<(Winner, String), GatewayError> {
        let prompt = PromptTemplate::comparison_prompt(goal.content(), first, second);
        let text = self
            .runner
            .ask(
                AgentRole::Ranking,
                PromptTemplate::ranking_system(),
                prompt,
                Some(first.id()),
            )
            .await?;
        Ok((determine_winner(&text), text))
    }

    /// Score one hypothesis on every criterion.
    pub async fn score(
        &self,
        goal: &ResearchGoal,
        hypothesis: &Hypothesis,
    ) -> Result<BTreeMap<Criterion, u8>, GatewayError> {
        let prompt = PromptTemplate::scoring_prompt(goal.content(), hypothesis);
        let text = self
            .runner
            .ask(
                AgentRole::Ranking,
                PromptTemplate::ranking_system(),
                prompt,
                Some(hypothesis.id()),
            )
            .await?;
        Ok(criteria_scores(&text))
    }

    async fn tournament(
        &self,
        goal: &ResearchGoal,
        hypotheses: Vec<Hypothesis>,
        progress: &dyn ProgressNotifier,
    ) -> RankingOutcome {
        let pairs = pairings(hypotheses.len());
        let total_calls = pairs.len();

        let results = {
            let set = &hypotheses;
            self.runner
                .fan_out(pairs, |(i, j)| async move {
                    let result = self.compare(goal, &set[i], &set[j]).await;
                    progress.on_task_complete(Stage::Ranking, result.is_ok());
                    ((i, j), result)
                })
                .await
        };

        let mut judgments = Vec::with_capacity(results.len());
        let mut comparisons = Vec::with_capacity(results.len());
        let mut failed_calls = 0;
        for ((i, j), result) in results {
            let (winner, reasoning) = match result {
                Ok(judged) => judged,
                Err(e) => {
                    failed_calls += 1;
                    (Winner::Tie, format!("Comparison failed: {e}"))
                }
            };
            judgments.push(((i, j), winner));
            comparisons.push(Comparison {
                first: hypotheses[i].id().clone(),
                second: hypotheses[j].id().clone(),
                winner,
                reasoning,
            });
        }

        RankingOutcome {
            method: RankingMethod::Pairwise,
            ranked: apply_pairwise(hypotheses, &judgments),
            comparisons,
            failed_calls,
            total_calls,
        }
    }

    async fn score_all(
        &self,
        goal: &ResearchGoal,
        mut hypotheses: Vec<Hypothesis>,
        progress: &dyn ProgressNotifier,
    ) -> RankingOutcome {
        let total_calls = hypotheses.len();
        let results = {
            let set = &hypotheses;
            self.runner
                .fan_out((0..set.len()).collect::<Vec<usize>>(), |i| async move {
                    let result = self.score(goal, &set[i]).await;
                    progress.on_task_complete(Stage::Ranking, result.is_ok());
                    result
                })
                .await
        };

        let mut failed_calls = 0;
        let scores = results
            .into_iter()
            .zip(hypotheses.iter_mut())
            .map(|(result, h)| match result {
                Ok(scores) => {
                    h.error = None;
                    scores
                }
                Err(e) => {
                    failed_calls += 1;
                    h.error = Some(e.to_string());
                    BTreeMap::new()
                }
            })
            .collect();

        RankingOutcome {
            method: RankingMethod::Scoring,
            ranked: apply_scores(hypotheses, scores),
            comparisons: Vec::new(),
            failed_calls,
            total_calls,
        }
    }
}

//! Reflection role: peer review of each hypothesis.

use super::RoleRunner;
use crate::ports::progress::ProgressNotifier;
use crate::ports::reasoning_gateway::ReasoningGateway;
use coscientist_domain::extraction::assess_review;
use coscientist_domain::{AgentRole, Hypothesis, PromptTemplate, ResearchGoal, Stage};

pub struct ReflectionRole<G: ReasoningGateway + 'static> {
    runner: RoleRunner<G>,
}

impl<G: ReasoningGateway + 'static> ReflectionRole<G> {
    pub fn new(runner: RoleRunner<G>) -> Self {
        Self { runner }
    }

    /// Attach a fresh review, replacing any earlier one.
    pub async fn review(&self, goal: &ResearchGoal, mut hypothesis: Hypothesis) -> Hypothesis {
        let prompt = PromptTemplate::reflection_prompt(goal.content(), &hypothesis);
        match self
            .runner
            .ask(
                AgentRole::Reflection,
                PromptTemplate::reflection_system(),
                prompt,
                Some(hypothesis.id()),
            )
            .await
        {
            Ok(text) => {
                hypothesis.review = Some(assess_review(&text));
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
                let reviewed = self.review(goal, h).await;
                progress.on_task_complete(Stage::Reflection, !reviewed.has_error());
                reviewed
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::ports::reasoning_gateway::GatewayError;
    use crate::use_cases::testing::{ScriptedGateway, caffeine_goal, runner};
    use coscientist_domain::hypothesis::HypothesisId;

    fn sample(id: &str) -> Hypothesis {
        Hypothesis::generated(
            HypothesisId::new(id),
            coscientist_domain::HypothesisDraft {
                statement: format!("Statement {id}"),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_failure_is_recorded_and_batch_continues() {
        let gateway = ScriptedGateway::new();
        gateway.push(AgentRole::Reflection, Err(GatewayError::Timeout));
        gateway.push(
            AgentRole::Reflection,
            Ok("Strengths:\n- Novel and well-supported mechanism".into()),
        );
        let (runner, _) = runner(gateway);
        let role = ReflectionRole::new(runner);

        let out = role
            .run(&caffeine_goal(), vec![sample("H-1"), sample("H-2")], &NoProgress)
            .await;

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].error.as_deref(), Some("Timeout"));
        assert!(out[0].review.is_none());
        assert!(out[1].review.is_some());
        assert!(out[1].error.is_none());
    }

    #[tokio::test]
    async fn test_each_hypothesis_gets_a_fresh_conversation() {
        let gateway = ScriptedGateway::new();
        let (runner, gateway) = runner(gateway);
        ReflectionRole::new(runner)
            .run(&caffeine_goal(), vec![sample("H-1"), sample("H-2")], &NoProgress)
            .await;

        let requests = gateway.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.messages.len() == 2));
        assert!(requests[1].messages[1].content.contains("Statement H-2"));
        assert!(!requests[1].messages[1].content.contains("Statement H-1"));
    }
}

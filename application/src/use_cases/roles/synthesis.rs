//! Meta-review role: writes the report and its executive summary.

use super::{RoleError, RoleRunner};
use crate::ports::reasoning_gateway::ReasoningGateway;
use coscientist_domain::core::string::truncate;
use coscientist_domain::{
    AgentRole, Hypothesis, PromptTemplate, ReportFormat, ResearchGoal, ResearchReport,
};
use tracing::info;

pub struct SynthesisRole<G: ReasoningGateway + 'static> {
    runner: RoleRunner<G>,
}

impl<G: ReasoningGateway + 'static> SynthesisRole<G> {
    pub fn new(runner: RoleRunner<G>) -> Self {
        Self { runner }
    }

    /// Synthesize a report over the first `cap` of `ranked`.
    pub async fn report(
        &self,
        goal: &ResearchGoal,
        ranked: &[Hypothesis],
        format: ReportFormat,
        cap: usize,
        timestamp: String,
    ) -> Result<ResearchReport, RoleError> {
        let included = &ranked[..cap.min(ranked.len())];
        let prompt = PromptTemplate::report_prompt(goal.content(), included, format);
        let text = self
            .runner
            .ask(
                AgentRole::MetaReview,
                PromptTemplate::meta_review_system(),
                prompt,
                None,
            )
            .await
            .map_err(RoleError::gateway(AgentRole::MetaReview))?;

        let report = ResearchReport::new(
            goal.content(),
            text.trim(),
            format,
            included.len(),
            timestamp,
        );
        info!(
            "Report \"{}\" covers {} hypotheses",
            report.title, report.hypothesis_count
        );
        Ok(report)
    }

    /// Condense `report` to at most `max_length` characters.
    pub async fn executive_summary(
        &self,
        report: &ResearchReport,
        max_length: usize,
    ) -> Result<String, RoleError> {
        let prompt = PromptTemplate::executive_summary_prompt(
            &report.research_goal,
            &report.title,
            &report.body_text,
            max_length,
        );
        let text = self
            .runner
            .ask(
                AgentRole::MetaReview,
                PromptTemplate::meta_review_system(),
                prompt,
                None,
            )
            .await
            .map_err(RoleError::gateway(AgentRole::MetaReview))?;
        Ok(truncate(text.trim(), max_length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{ScriptedGateway, caffeine_goal, runner};
    use coscientist_domain::report::DEFAULT_TITLE;
    use coscientist_domain::{HypothesisDraft, HypothesisId};

    fn ranked(n: usize) -> Vec<Hypothesis> {
        (1..=n)
            .map(|i| {
                Hypothesis::generated(
                    HypothesisId::new(format!("H-{i}")),
                    HypothesisDraft {
                        statement: format!("Statement {i}"),
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_report_caps_hypotheses_and_extracts_title() {
        let gateway = ScriptedGateway::new();
        gateway.push(
            AgentRole::MetaReview,
            Ok("# Heading\nCaffeine and Vigilance\n\nAbstract: ...".into()),
        );
        let (runner, gateway) = runner(gateway);

        let report = SynthesisRole::new(runner)
            .report(
                &caffeine_goal(),
                &ranked(7),
                ReportFormat::ResearchBrief,
                5,
                "2026-01-01 00:00:00".into(),
            )
            .await
            .unwrap();

        assert_eq!(report.title, "Caffeine and Vigilance");
        assert_eq!(report.hypothesis_count, 5);
        let prompt = &gateway.requests()[0].messages[1].content;
        assert!(prompt.contains("Statement 5"));
        assert!(!prompt.contains("Statement 6"));
    }

    #[tokio::test]
    async fn test_report_without_title_line_uses_default() {
        let gateway = ScriptedGateway::new();
        gateway.push(AgentRole::MetaReview, Ok(format!("{}\n", "x".repeat(150))));
        let (runner, _) = runner(gateway);
        let report = SynthesisRole::new(runner)
            .report(
                &caffeine_goal(),
                &ranked(1),
                ReportFormat::default(),
                5,
                String::new(),
            )
            .await
            .unwrap();
        assert_eq!(report.title, DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn test_summary_is_truncated() {
        let gateway = ScriptedGateway::new();
        gateway.push(AgentRole::MetaReview, Ok("s".repeat(800)));
        let (runner, _) = runner(gateway);
        let report = ResearchReport::new("goal", "body", ReportFormat::default(), 1, "");

        let summary = SynthesisRole::new(runner)
            .executive_summary(&report, 500)
            .await
            .unwrap();

        assert_eq!(summary.chars().count(), 500);
        assert!(summary.ends_with("..."));
    }
}

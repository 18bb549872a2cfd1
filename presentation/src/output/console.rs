//! Console output formatter for research runs

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use coscientist_application::{PipelineFailure, PipelineOutput, ResultBundle};
use coscientist_domain::core::string::excerpt;
use coscientist_domain::{Hypothesis, Standing, Winner};

const SUMMARY_TOP: usize = 3;
const REPORT_PREVIEW_CHARS: usize = 600;

/// Formats research runs for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Every ranked hypothesis with review and proximity details, then the report
    pub fn format_full(output: &PipelineOutput) -> String {
        let mut out = String::new();

        out.push_str(&Self::header(&output.report.title));
        out.push('\n');
        out.push_str(&format!(
            "{} {}\n",
            "Goal:".cyan().bold(),
            output.report.research_goal
        ));
        out.push_str(&format!(
            "{} {} generated, {} iteration(s), {} in history\n",
            "Run:".cyan().bold(),
            output.initial.len(),
            output.iterations_run,
            output.store.len()
        ));

        out.push_str(&Self::section_header("Ranked Hypotheses"));
        for hypothesis in &output.ranked {
            out.push_str(&Self::hypothesis_block(hypothesis));
        }

        if !output.comparisons.is_empty() {
            out.push_str(&Self::section_header("Final Tournament"));
            for comparison in &output.comparisons {
                let verdict = match comparison.winner {
                    Winner::First => comparison.first.to_string(),
                    Winner::Second => comparison.second.to_string(),
                    Winner::Tie => "tie".to_string(),
                };
                out.push_str(&format!(
                    "  {} vs {}: {}\n",
                    comparison.first, comparison.second, verdict
                ));
            }
        }

        out.push_str(&Self::section_header("Report"));
        out.push('\n');
        out.push_str(&output.report.body_text);
        out.push('\n');

        if let Some(summary) = &output.report.executive_summary {
            out.push_str(&format!("\n{}\n{}\n", "Executive Summary:".green().bold(), summary));
        }

        out.push_str(&Self::issues(&output.issues));
        out.push_str(&Self::saved_to(output.saved_to.as_deref()));
        out.push_str(&Self::footer());
        out
    }

    /// Top hypotheses and the executive summary, or the opening of the report
    pub fn format_summary(output: &PipelineOutput) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{}\n\n",
            format!("=== {} ===", output.report.title).cyan().bold()
        ));
        out.push_str(&format!(
            "{} {}\n\n",
            "Goal:".bold(),
            output.report.research_goal
        ));

        out.push_str(&format!("{}\n", "Top hypotheses:".cyan().bold()));
        for hypothesis in output.ranked.iter().take(SUMMARY_TOP) {
            out.push_str(&format!(
                "  {}. {} {}\n",
                hypothesis.rank().unwrap_or_default(),
                format!("[{}]", hypothesis.id()).dimmed(),
                hypothesis.statement
            ));
        }
        out.push('\n');

        match &output.report.executive_summary {
            Some(summary) => out.push_str(summary),
            None => out.push_str(&excerpt(&output.report.body_text, REPORT_PREVIEW_CHARS)),
        }
        out.push('\n');

        out.push_str(&Self::issues(&output.issues));
        out.push_str(&Self::saved_to(output.saved_to.as_deref()));
        out
    }

    /// The result bundle as pretty JSON
    pub fn format_json(bundle: &ResultBundle) -> String {
        serde_json::to_string_pretty(bundle).unwrap_or_else(|_| "{}".to_string())
    }

    /// A failed run: what failed, where, and what survived
    pub fn format_failure(failure: &PipelineFailure) -> String {
        let mut out = format!(
            "{} {}\n",
            "Research run failed:".red().bold(),
            failure.cause
        );
        out.push_str(&format!(
            "  {} {} ({})\n",
            "stage:".dimmed(),
            failure.stage,
            failure.state
        ));
        out.push_str(&format!(
            "  {} {} hypotheses kept\n",
            "history:".dimmed(),
            failure.store.len()
        ));
        out
    }

    fn hypothesis_block(hypothesis: &Hypothesis) -> String {
        let mut out = String::new();
        let rank = hypothesis
            .rank()
            .map_or_else(|| "-".to_string(), |r| format!("#{r}"));
        out.push_str(&format!(
            "\n{}\n{}\n",
            format!("── {} {} ({}) ──", rank, hypothesis.id(), hypothesis.origin().as_str())
                .yellow()
                .bold(),
            hypothesis.statement
        ));

        if !hypothesis.rationale.is_empty() {
            out.push_str(&format!("{} {}\n", "Rationale:".bold(), hypothesis.rationale));
        }

        match &hypothesis.standing {
            Some(Standing::Pairwise {
                wins,
                total_comparisons,
                ..
            }) => out.push_str(&format!(
                "{} {}/{} comparisons won\n",
                "Tournament:".bold(),
                wins,
                total_comparisons
            )),
            Some(Standing::Scored {
                overall_score,
                scores,
                ..
            }) => {
                let detail = scores
                    .iter()
                    .map(|(criterion, score)| format!("{criterion} {score}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                out.push_str(&format!(
                    "{} {:.1} ({})\n",
                    "Score:".bold(),
                    overall_score,
                    detail
                ));
            }
            None => {}
        }

        if let Some(score) = hypothesis.proximity_score() {
            out.push_str(&format!("{} {score}/10\n", "Proximity:".bold()));
        }

        if let Some(review) = &hypothesis.review {
            for strength in &review.strengths {
                out.push_str(&format!("  {} {}\n", "+".green(), strength));
            }
            for weakness in &review.weaknesses {
                out.push_str(&format!("  {} {}\n", "-".red(), weakness));
            }
        }

        if let Some(error) = &hypothesis.error {
            out.push_str(&format!("{} {}\n", "Error:".red().bold(), error));
        }

        out
    }

    fn issues(issues: &[String]) -> String {
        if issues.is_empty() {
            return String::new();
        }
        let mut out = format!("\n{}\n", "Notes:".yellow().bold());
        for issue in issues {
            out.push_str(&format!("  * {}\n", issue));
        }
        out
    }

    fn saved_to(path: Option<&str>) -> String {
        path.map(|p| format!("\n{} {}\n", "Results saved to".dimmed(), p))
            .unwrap_or_default()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, output: &PipelineOutput) -> String {
        Self::format_full(output)
    }

    fn format_summary(&self, output: &PipelineOutput) -> String {
        Self::format_summary(output)
    }

    fn format_json(&self, bundle: &ResultBundle) -> String {
        Self::format_json(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coscientist_domain::{
        HypothesisDraft, HypothesisId, HypothesisStore, PipelineState, PlanSettings,
        ReportFormat, ResearchPlan, ResearchReport,
    };

    const GOAL: &str = "To investigate how caffeine affects reaction time";

    fn hypothesis(id: &str, statement: &str, rank: usize) -> Hypothesis {
        let mut h = Hypothesis::generated(
            HypothesisId::new(id),
            HypothesisDraft {
                statement: statement.to_string(),
                rationale: "Adenosine antagonism".to_string(),
                ..HypothesisDraft::default()
            },
        );
        h.standing = Some(Standing::Pairwise {
            rank,
            wins: 4 - rank,
            total_comparisons: 3,
        });
        h
    }

    fn output(executive_summary: Option<&str>) -> PipelineOutput {
        let ranked = vec![
            hypothesis("H-0002", "Caffeine shortens reaction time", 1),
            hypothesis("H-0001", "Caffeine reduces lapses", 2),
            hypothesis("H-0003", "Tolerance blunts the effect", 3),
            hypothesis("H-0004", "Timing of intake changes the effect", 4),
        ];
        let mut store = HypothesisStore::new();
        for h in &ranked {
            store.insert_active(h.clone()).unwrap();
        }
        let mut report = ResearchReport::new(
            GOAL,
            "Caffeine and Reaction Time\n\nBody of the report.",
            ReportFormat::ScientificReport,
            ranked.len(),
            "2026-01-01 10:00:00",
        );
        report.executive_summary = executive_summary.map(str::to_string);

        PipelineOutput {
            plan: ResearchPlan::create(GOAL, &PlanSettings::default(), "", "2026-01-01 10:00:00"),
            store,
            initial: ranked.clone(),
            ranked,
            comparisons: Vec::new(),
            report,
            iterations_run: 1,
            issues: vec!["Proximity filter would remove every hypothesis".to_string()],
            state: PipelineState::Done,
            saved_to: Some("results/research_results_20260101_100000.json".to_string()),
        }
    }

    #[test]
    fn test_summary_shows_top_three() {
        let text = ConsoleFormatter::format_summary(&output(None));
        assert!(text.contains("Caffeine and Reaction Time"));
        assert!(text.contains("Caffeine shortens reaction time"));
        assert!(text.contains("Tolerance blunts the effect"));
        assert!(!text.contains("Timing of intake"));
        assert!(text.contains("Body of the report."));
        assert!(text.contains("research_results_20260101_100000.json"));
    }

    #[test]
    fn test_summary_prefers_executive_summary() {
        let text = ConsoleFormatter::format_summary(&output(Some("Short version.")));
        assert!(text.contains("Short version."));
        assert!(!text.contains("Body of the report."));
    }

    #[test]
    fn test_full_lists_every_hypothesis() {
        let text = ConsoleFormatter::format_full(&output(None));
        for id in ["H-0001", "H-0002", "H-0003", "H-0004"] {
            assert!(text.contains(id), "missing {id}");
        }
        assert!(text.contains("Adenosine antagonism"));
        assert!(text.contains("3/3 comparisons won"));
        assert!(text.contains("Proximity filter would remove every hypothesis"));
    }
}

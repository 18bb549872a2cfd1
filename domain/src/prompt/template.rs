//! Personas and prompt builders for each pipeline role

use crate::core::string::{excerpt, take_chars};
use crate::hypothesis::{Hypothesis, Origin};
use crate::plan::{ExecutionStatus, PlanStep, QueryAnalysis, ResearchPlan};
use crate::ranking::Criterion;
use crate::report::ReportFormat;

/// Characters of a review quoted back to Evolution.
const REVIEW_FOR_EVOLUTION: usize = 1000;
/// Characters of a review quoted to the scoring judge.
const REVIEW_FOR_SCORING: usize = 500;
/// Characters of a rationale quoted in combination and proximity prompts.
const RATIONALE_EXCERPT: usize = 300;
/// Characters of a rationale included per hypothesis in the report prompt.
const RATIONALE_FOR_REPORT: usize = 500;
/// Characters of the report body quoted to the summariser.
const REPORT_FOR_SUMMARY: usize = 2000;

/// Templates for every role's persona and prompts
pub struct PromptTemplate;

fn hypothesis_block(h: &Hypothesis) -> String {
    format!(
        "Statement: {}\nRationale: {}\nEvidence: {}\nAssumptions: {}\nValidation Approach: {}",
        h.statement, h.rationale, h.evidence, h.assumptions, h.validation_approach
    )
}

fn statement_or_placeholder(h: &Hypothesis) -> &str {
    if h.statement.is_empty() {
        "No statement provided"
    } else {
        &h.statement
    }
}

const STRUCTURE_INSTRUCTIONS: &str = r#"Use exactly these labels, each starting its own paragraph:
Statement: <the hypothesis>
Rationale: <scientific rationale>
Evidence: <known evidence or references>
Assumptions: <conditions that must hold>
Validation: <how to test or validate it>"#;

impl PromptTemplate {
    // ==================== Generation ====================

    pub fn generation_system() -> &'static str {
        r#"You are the Generation role of a research assistant team. You propose scientific hypotheses for a stated research goal, drawing on PhD-level knowledge across disciplines.
Each hypothesis must be testable, specific enough to be falsifiable, novel yet grounded in established knowledge, relevant to the goal, and stated with precise terminology.
Explore distinct avenues of inquiry, including interdisciplinary ones. Be bold in ideation while keeping scientific rigor."#
    }

    /// Ask for `count` hypotheses, optionally seeded with literature summaries.
    pub fn generation_prompt(goal: &str, count: usize, literature: &[String]) -> String {
        let mut prompt = format!(
            r#"RESEARCH GOAL: {goal}

Generate {count} distinct scientific hypotheses that address this research goal.
Make them as different from one another as possible: vary the mechanism, the scale and the discipline."#
        );

        if !literature.is_empty() {
            prompt.push_str("\n\nRELATED LITERATURE:\n");
            for item in literature {
                prompt.push_str(&format!("- {item}\n"));
            }
        }

        prompt.push_str(
            r#"

Start each hypothesis with a line "Hypothesis N: <one-sentence statement>", then give these labeled paragraphs:
Rationale: <scientific rationale>
Evidence: <known evidence or references>
Assumptions: <conditions that must hold>
Validation: <how to test or validate it>

Separate paragraphs with a blank line."#,
        );
        prompt
    }

    // ==================== Reflection ====================

    pub fn reflection_system() -> &'static str {
        r#"You are the Reflection role of a research assistant team: a rigorous but constructive peer reviewer.
Evaluate hypotheses for scientific soundness and plausibility, cross-check them against established knowledge, and point out weaknesses, inconsistencies and logical flaws.
Flag ethical concerns and practical limitations, judge novelty and potential impact, and suggest concrete improvements. Your aim is to strengthen hypotheses, not to dismiss them."#
    }

    pub fn reflection_prompt(goal: &str, hypothesis: &Hypothesis) -> String {
        format!(
            r#"RESEARCH GOAL: {goal}

HYPOTHESIS TO REVIEW:
{}

Conduct a thorough peer review of this hypothesis. Assess:
1. Scientific validity and plausibility
2. Strengths of the hypothesis
3. Weaknesses, inconsistencies, or logical flaws
4. Potential contradictions with established knowledge
5. Ethical considerations
6. Practical limitations for testing or implementation
7. Suggested modifications

List strengths under a "Strengths:" heading and weaknesses under a "Weaknesses:" heading, one "- " bullet per point."#,
            hypothesis_block(hypothesis)
        )
    }

    // ==================== Proximity ====================

    pub fn proximity_system() -> &'static str {
        r#"You are the Proximity role of a research assistant team. You judge how closely a hypothesis aligns with the research goal: conceptual alignment, problem-solution fit, appropriate scope, domain match and practical applicability.
Focus on relevance only; scientific validity is judged elsewhere."#
    }

    pub fn proximity_prompt(goal: &str, hypothesis: &Hypothesis) -> String {
        format!(
            r#"RESEARCH GOAL: {goal}

HYPOTHESIS TO EVALUATE:
Statement: {}
Rationale: {}

Evaluate how closely this hypothesis aligns with the research goal on:
1. Conceptual alignment
2. Problem-solution fit
3. Scope appropriateness
4. Scientific domain match
5. Practical applicability

Score each criterion from 1-10 with a brief justification.
Then write "Overall proximity score: <1-10>" on its own line and summarise the relevance.
Finally, suggest how the hypothesis could be made more relevant, if needed."#,
            hypothesis.statement,
            excerpt(&hypothesis.rationale, RATIONALE_EXCERPT)
        )
    }

    // ==================== Ranking ====================

    pub fn ranking_system() -> &'static str {
        r#"You are the Ranking role of a research assistant team. You compare and rank scientific hypotheses tournament-style.
Weigh novelty, plausibility, relevance to the goal, testability, potential impact, parsimony and breadth of explanation.
Be balanced and fair, judge on scientific merit, and justify every comparative judgment."#
    }

    pub fn comparison_prompt(goal: &str, first: &Hypothesis, second: &Hypothesis) -> String {
        format!(
            r#"RESEARCH GOAL: {goal}

HYPOTHESIS 1:
Statement: {}

HYPOTHESIS 2:
Statement: {}

Compare these two hypotheses on:
1. Novelty
2. Plausibility
3. Relevance to the research goal
4. Testability
5. Potential impact

Discuss the strengths and weaknesses of each relative to the other. Then state the overall winner explicitly, as "Hypothesis 1 is superior" or "Hypothesis 2 is superior"."#,
            statement_or_placeholder(first),
            statement_or_placeholder(second)
        )
    }

    pub fn scoring_prompt(goal: &str, hypothesis: &Hypothesis) -> String {
        let review = hypothesis
            .review
            .as_ref()
            .map_or("No review available", |r| r.text.as_str());
        let rationale = if hypothesis.rationale.is_empty() {
            "No rationale provided"
        } else {
            &hypothesis.rationale
        };

        let mut prompt = format!(
            r#"RESEARCH GOAL: {goal}

HYPOTHESIS TO EVALUATE:
Statement: {}
Rationale: {rationale}
Review Summary: {}...

Evaluate this hypothesis on each criterion using a scale of 1-10:
"#,
            statement_or_placeholder(hypothesis),
            take_chars(review, REVIEW_FOR_SCORING)
        );
        for (i, criterion) in Criterion::ALL.iter().enumerate() {
            prompt.push_str(&format!(
                "{}. {} ({})\n",
                i + 1,
                capitalize(criterion.label()),
                criterion.scale_hint()
            ));
        }
        prompt.push_str("\nFormat your response as follows:\n");
        for criterion in Criterion::ALL {
            prompt.push_str(&format!(
                "{}: [score] - [justification]\n",
                capitalize(criterion.label())
            ));
        }
        prompt.push_str("Overall score: [average score] - [brief summary]");
        prompt
    }

    // ==================== Evolution ====================

    pub fn evolution_system() -> &'static str {
        r#"You are the Evolution role of a research assistant team. You improve promising hypotheses: refine them using reviewer feedback, combine the strengths of several into hybrids, and simplify where possible.
Keep what works, fix what the reviews found lacking, and make every result more precise and more testable."#
    }

    pub fn refinement_prompt(goal: &str, hypothesis: &Hypothesis) -> String {
        let review = hypothesis
            .review
            .as_ref()
            .map(|r| excerpt(&r.text, REVIEW_FOR_EVOLUTION))
            .unwrap_or_default();
        format!(
            r#"RESEARCH GOAL: {goal}

HYPOTHESIS TO EVOLVE:
{}

REVIEW FEEDBACK:
{review}

Evolve this hypothesis to address its weaknesses while keeping its core strengths:
1. Make the statement more precise and testable
2. Resolve inconsistencies or logical flaws raised in the review
3. Strengthen the rationale with additional scientific context
4. Reconsider problematic assumptions
5. Make the validation approach more feasible and conclusive

{STRUCTURE_INSTRUCTIONS}"#,
            hypothesis_block(hypothesis)
        )
    }

    pub fn combination_prompt(goal: &str, first: &Hypothesis, second: &Hypothesis) -> String {
        let rank = |h: &Hypothesis, fallback: usize| h.rank().unwrap_or(fallback);
        format!(
            r#"RESEARCH GOAL: {goal}

HYPOTHESIS 1 (Rank {}):
Statement: {}
Rationale: {}...

HYPOTHESIS 2 (Rank {}):
Statement: {}
Rationale: {}...

These are the two strongest hypotheses for the research goal. Create one hybrid hypothesis that integrates their strongest elements.
Consider whether their core insights can be unified, whether one covers a weakness of the other, and whether a more general framework encompasses both.
Do not simply list both ideas; produce a genuine integration.

{STRUCTURE_INSTRUCTIONS}"#,
            rank(first, 1),
            first.statement,
            take_chars(&first.rationale, RATIONALE_EXCERPT),
            rank(second, 2),
            second.statement,
            take_chars(&second.rationale, RATIONALE_EXCERPT),
        )
    }

    // ==================== Meta-review ====================

    pub fn meta_review_system() -> &'static str {
        r#"You are the Meta-Review role of a research assistant team, with excellent scientific writing skills.
You synthesize the best hypotheses of a research run into a coherent, well-structured report or proposal: their significance, supporting evidence, relation to existing literature, a plan for testing them, expected outcomes and limitations.
Write in a clear, concise scientific style that researchers in adjacent fields can follow."#
    }

    /// Report prompt over the final ranked hypotheses.
    pub fn report_prompt(goal: &str, hypotheses: &[Hypothesis], format: ReportFormat) -> String {
        let mut listing = String::new();
        for (i, h) in hypotheses.iter().enumerate() {
            let rank = h.rank().map_or_else(|| "N/A".to_string(), |r| r.to_string());
            listing.push_str(&format!("HYPOTHESIS {} (Rank: {rank}):\n", i + 1));
            listing.push_str(&format!("Statement: {}\n", h.statement));
            listing.push_str(&format!(
                "Rationale: {}\n",
                take_chars(&h.rationale, RATIONALE_FOR_REPORT)
            ));
            let evolution = match h.origin() {
                Origin::Generated => "original",
                evolved => evolved.as_str(),
            };
            listing.push_str(&format!("Evolution: {evolution}\n\n"));
        }

        let mut sections = String::new();
        for (i, (name, guidance)) in format.sections().iter().enumerate() {
            sections.push_str(&format!("{}. {name}: {guidance}\n", i + 1));
        }

        let mut prompt = format!(
            r#"RESEARCH GOAL: {goal}

FINAL HYPOTHESES:
{listing}
Format your response as a {} with the following sections:
{sections}
Synthesize these hypotheses into a coherent research narrative following the structure above.
Present the most promising ideas while acknowledging limitations and uncertainty, and support every claim with reasoning and references to established knowledge.
Put the title alone on the first line, without markdown."#,
            format.display_name()
        );

        if hypotheses.iter().any(|h| h.origin().is_evolved()) {
            prompt.push_str(
                "\n\nInclude a section on how the hypotheses evolved during the research process, highlighting the key refinements.",
            );
        }
        prompt
    }

    pub fn executive_summary_prompt(
        goal: &str,
        title: &str,
        body: &str,
        max_length: usize,
    ) -> String {
        format!(
            r#"Write a concise executive summary of the following research report in no more than {max_length} characters.
Capture the research goal, the main hypotheses and their most significant implications.

RESEARCH GOAL: {goal}

REPORT TITLE: {title}

REPORT:
{}...

The summary should be accessible to scientific peers and quick to read."#,
            take_chars(body, REPORT_FOR_SUMMARY)
        )
    }

    // ==================== Supervisor ====================

    pub fn supervisor_system() -> &'static str {
        r#"You are the Supervisor of a research assistant team. You parse research goals, break them into manageable components, decide which roles run in which order, track progress and adjust the workflow.
The roles you direct are Generation, Reflection, Ranking, Evolution, Proximity and Meta-Review. Optimise for both thoroughness and efficiency."#
    }

    pub fn analysis_prompt(goal: &str) -> String {
        format!(
            r#"RESEARCH QUERY: {goal}

Analyse this research query to guide planning:
1. The primary scientific domain(s), as a comma-separated list after "Domains:"
2. The type of research goal (explanation, prediction, design, discovery, exploration or validation)
3. Scope and complexity (narrow/focused or broad/complex)
4. Key concepts, as a comma-separated list after "Key concepts:"
5. Constraints or special requirements
6. The most relevant background knowledge"#
        )
    }

    pub fn plan_prompt(goal: &str, analysis: &QueryAnalysis, default_steps: &[PlanStep]) -> String {
        let analysis = serde_json::to_string_pretty(analysis).unwrap_or_default();
        let steps = serde_json::to_string_pretty(default_steps).unwrap_or_default();
        format!(
            r#"RESEARCH QUERY: {goal}

QUERY ANALYSIS:
{analysis}

The default sequence of role tasks is:
{steps}

You may adjust this sequence for this query. Say "skip proximity evaluation" to drop the relevance filter, "more iterations" or "fewer iterations" to change the refinement loop, or keep the default.
Justify the plan briefly."#
        )
    }

    pub fn plan_update_prompt(
        plan: &ResearchPlan,
        status: &ExecutionStatus,
        feedback: Option<&str>,
    ) -> String {
        let plan_json = serde_json::to_string_pretty(plan).unwrap_or_default();
        let mut prompt = format!(
            r#"CURRENT RESEARCH PLAN:
{plan_json}

EXECUTION STATUS:
Completed steps: {}
Current step: {}
Issues encountered: {}"#,
            status.completed_steps.len(),
            status.current_step,
            status.issues_summary()
        );
        if let Some(feedback) = feedback {
            prompt.push_str(&format!("\n\nUSER FEEDBACK:\n{feedback}"));
        }
        prompt.push_str(
            r#"

Update the research plan. You may continue as planned, "add step" for an executive summary, or "remove step" to drop the last pending step. Give clear reasoning for any change."#,
        );
        prompt
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

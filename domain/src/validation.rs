//! Structural quality checklists for research goals and hypothesis statements.
//!
//! Each checklist collects every issue it finds instead of stopping at the
//! first one. A subject passes when at most one issue is reported; a single
//! minor issue is tolerated.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Number of issues a subject may have and still be considered valid.
pub const ISSUE_TOLERANCE: usize = 1;

const GOAL_MIN_LEN: usize = 10;
const GOAL_MAX_LEN: usize = 500;
const HYPOTHESIS_MIN_LEN: usize = 10;
const HYPOTHESIS_MAX_LEN: usize = 1000;

const GOAL_OPENINGS: &[&str] = &[
    "to ",
    "the goal is to ",
    "this research aims to ",
    "we aim to ",
    "this study seeks to ",
    "the purpose is to ",
];

const RESEARCH_VERBS: &[&str] = &[
    "investigate",
    "explore",
    "analyze",
    "determine",
    "identify",
    "examine",
    "understand",
    "evaluate",
    "assess",
    "develop",
    "discover",
    "explain",
    "test",
    "validate",
    "characterize",
];

const TESTABILITY_TERMS: &[&str] = &[
    "increase",
    "decrease",
    "affect",
    "change",
    "cause",
    "lead to",
    "result in",
    "correlate",
    "association",
    "relationship",
];

const VAGUE_TERMS: &[&str] = &[
    "very",
    "extremely",
    "many",
    "most",
    "few",
    "several",
    "a lot",
    "better",
    "worse",
    "good",
    "bad",
    "significant",
];

static CONDITIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(if|when|as|while)\b").expect("static regex"));
static CAUSAL_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(causes|affects|influences|impacts|changes|increases|decreases)\b")
        .expect("static regex")
});

/// Outcome of running a checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.len() <= ISSUE_TOLERANCE
    }
}

/// True when `term` occurs in `text` delimited by spaces or the text edges.
fn contains_spaced(text: &str, term: &str) -> bool {
    format!(" {text} ").contains(&format!(" {term} "))
}

/// Run the research-goal checklist.
pub fn validate_research_goal(goal: &str) -> ValidationReport {
    let mut issues = Vec::new();
    let lower = goal.to_lowercase();
    let len = goal.chars().count();

    if len < GOAL_MIN_LEN {
        issues.push("Research goal is too short".to_string());
    }
    if len > GOAL_MAX_LEN {
        issues.push(format!(
            "Research goal is too long (>{GOAL_MAX_LEN} characters)"
        ));
    }
    if !GOAL_OPENINGS.iter().any(|start| lower.starts_with(start)) {
        issues.push("Research goal should typically start with 'To...' or similar phrase".to_string());
    }
    if !RESEARCH_VERBS.iter().any(|verb| contains_spaced(&lower, verb)) {
        issues.push("Research goal should include specific research action verbs".to_string());
    }
    if goal.trim().ends_with('?') {
        issues.push("Research goal should be a statement, not a question".to_string());
    }

    ValidationReport { issues }
}

/// Run the hypothesis-statement checklist.
pub fn validate_hypothesis(statement: &str) -> ValidationReport {
    let mut issues = Vec::new();
    let lower = statement.to_lowercase();
    let len = statement.chars().count();

    if len < HYPOTHESIS_MIN_LEN {
        issues.push("Hypothesis is too short".to_string());
    }
    if len > HYPOTHESIS_MAX_LEN {
        issues.push(format!(
            "Hypothesis is too long (>{HYPOTHESIS_MAX_LEN} characters)"
        ));
    }
    if statement.trim().ends_with('?') {
        issues.push("Hypothesis should be a statement, not a question".to_string());
    }
    if !TESTABILITY_TERMS.iter().any(|term| lower.contains(term)) {
        issues.push(
            "Hypothesis may not be testable - consider including terms that describe relationships, effects, or changes"
                .to_string(),
        );
    }

    let vague: Vec<&str> = VAGUE_TERMS
        .iter()
        .copied()
        .filter(|term| contains_spaced(&lower, term))
        .collect();
    if !vague.is_empty() {
        issues.push(format!(
            "Hypothesis contains vague terms: {}",
            vague.join(", ")
        ));
    }

    if !CONDITIONAL.is_match(&lower) && !CAUSAL_VERB.is_match(&lower) {
        issues.push(
            "Hypothesis may not clearly specify variables or relationships to test".to_string(),
        );
    }

    ValidationReport { issues }
}

//! Evaluation criteria of the scoring strategy

use serde::{Deserialize, Serialize};

/// A criterion hypotheses are scored against, each on a 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Novelty,
    Plausibility,
    Relevance,
    Testability,
    PotentialImpact,
}

impl Criterion {
    /// All criteria, in prompt order.
    pub const ALL: [Criterion; 5] = [
        Criterion::Novelty,
        Criterion::Plausibility,
        Criterion::Relevance,
        Criterion::Testability,
        Criterion::PotentialImpact,
    ];

    /// Lowercase label as it appears in evaluation text.
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Novelty => "novelty",
            Criterion::Plausibility => "plausibility",
            Criterion::Relevance => "relevance",
            Criterion::Testability => "testability",
            Criterion::PotentialImpact => "potential impact",
        }
    }

    /// Scale anchors shown to the Reasoning Service.
    pub fn scale_hint(&self) -> &'static str {
        match self {
            Criterion::Novelty => "1=Well-known, 10=Revolutionary",
            Criterion::Plausibility => "1=Implausible, 10=Highly plausible",
            Criterion::Relevance => "1=Unrelated to goal, 10=Directly addresses goal",
            Criterion::Testability => "1=Untestable, 10=Easily testable",
            Criterion::PotentialImpact => "1=Minimal impact, 10=Field-changing",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

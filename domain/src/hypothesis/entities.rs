//! Hypothesis entity and the assessments attached to it by each role

use super::id::HypothesisId;
use crate::ranking::Criterion;
use crate::validation::ValidationReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a hypothesis came into existence. Set once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Generated,
    EvolvedIndividual,
    EvolvedCombination,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Generated => "generated",
            Origin::EvolvedIndividual => "evolved_individual",
            Origin::EvolvedCombination => "evolved_combination",
        }
    }

    /// Number of parents a record with this origin must have.
    pub fn parent_count(&self) -> usize {
        match self {
            Origin::Generated => 0,
            Origin::EvolvedIndividual => 1,
            Origin::EvolvedCombination => 2,
        }
    }

    pub fn is_evolved(&self) -> bool {
        !matches!(self, Origin::Generated)
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The five free-text fields extracted from a Reasoning Service response.
///
/// An empty string means "not found", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypothesisDraft {
    pub statement: String,
    pub rationale: String,
    pub evidence: String,
    pub assumptions: String,
    pub validation_approach: String,
}

impl HypothesisDraft {
    pub fn is_empty(&self) -> bool {
        self.statement.is_empty()
            && self.rationale.is_empty()
            && self.evidence.is_empty()
            && self.assumptions.is_empty()
            && self.validation_approach.is_empty()
    }

    /// Fill every empty field from `base`.
    pub fn or_fields_of(mut self, base: &Hypothesis) -> Self {
        fn fill(field: &mut String, fallback: &str) {
            if field.is_empty() {
                *field = fallback.to_string();
            }
        }
        fill(&mut self.statement, &base.statement);
        fill(&mut self.rationale, &base.rationale);
        fill(&mut self.evidence, &base.evidence);
        fill(&mut self.assumptions, &base.assumptions);
        fill(&mut self.validation_approach, &base.validation_approach);
        self
    }
}

/// Structured critique attached by Reflection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub valid: bool,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub ethical_concerns: bool,
    pub practical_limitations: bool,
    /// Lexicon-based quality estimate in `[0, 1]`.
    pub quality: f64,
    /// The full critique as returned by the Reasoning Service.
    pub text: String,
}

/// Relevance assessment attached by Proximity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    /// Score in `[1, 10]`.
    pub score: f64,
    pub is_relevant: bool,
    pub evaluation: String,
}

/// Result of the most recent ranking pass.
///
/// Only one method's fields exist per pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Standing {
    Pairwise {
        rank: usize,
        wins: usize,
        total_comparisons: usize,
    },
    Scored {
        rank: usize,
        overall_score: f64,
        scores: BTreeMap<Criterion, u8>,
    },
}

impl Standing {
    pub fn rank(&self) -> usize {
        match self {
            Standing::Pairwise { rank, .. } | Standing::Scored { rank, .. } => *rank,
        }
    }
}

/// A candidate explanation with provenance and assessment metadata (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    id: HypothesisId,
    origin: Origin,
    parent_ids: Vec<HypothesisId>,

    pub statement: String,
    pub rationale: String,
    pub evidence: String,
    pub assumptions: String,
    pub validation_approach: String,

    pub review: Option<Review>,
    pub proximity: Option<Proximity>,
    pub standing: Option<Standing>,
    /// Refinement iteration at which this version was last modified (0 = initial).
    pub iteration: u32,
    /// Last Reasoning Service failure recorded while processing this record.
    pub error: Option<String>,
    /// Statement checklist result, attached after generation.
    pub checklist: Option<ValidationReport>,
}

impl Hypothesis {
    fn from_draft(
        id: HypothesisId,
        origin: Origin,
        parent_ids: Vec<HypothesisId>,
        draft: HypothesisDraft,
        iteration: u32,
    ) -> Self {
        Self {
            id,
            origin,
            parent_ids,
            statement: draft.statement,
            rationale: draft.rationale,
            evidence: draft.evidence,
            assumptions: draft.assumptions,
            validation_approach: draft.validation_approach,
            review: None,
            proximity: None,
            standing: None,
            iteration,
            error: None,
            checklist: None,
        }
    }

    /// A freshly generated hypothesis (no parents, iteration 0).
    pub fn generated(id: HypothesisId, draft: HypothesisDraft) -> Self {
        Self::from_draft(id, Origin::Generated, Vec::new(), draft, 0)
    }

    /// An individual refinement of `parent`.
    ///
    /// Fields missing from `draft` are carried over from the parent; the
    /// review, proximity and standing always start cleared.
    pub fn refined(
        id: HypothesisId,
        parent: &Hypothesis,
        draft: HypothesisDraft,
        iteration: u32,
    ) -> Self {
        let draft = draft.or_fields_of(parent);
        Self::from_draft(
            id,
            Origin::EvolvedIndividual,
            vec![parent.id.clone()],
            draft,
            iteration,
        )
    }

    /// A hybrid of two parents, in rank order.
    pub fn combined(
        id: HypothesisId,
        first: &Hypothesis,
        second: &Hypothesis,
        draft: HypothesisDraft,
        iteration: u32,
    ) -> Self {
        Self::from_draft(
            id,
            Origin::EvolvedCombination,
            vec![first.id.clone(), second.id.clone()],
            draft,
            iteration,
        )
    }

    pub fn id(&self) -> &HypothesisId {
        &self.id
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn parent_ids(&self) -> &[HypothesisId] {
        &self.parent_ids
    }

    pub fn rank(&self) -> Option<usize> {
        self.standing.as_ref().map(Standing::rank)
    }

    pub fn proximity_score(&self) -> Option<f64> {
        self.proximity.as_ref().map(|p| p.score)
    }

    /// Relevance flag; a hypothesis that was never evaluated counts as relevant.
    pub fn is_relevant(&self) -> bool {
        self.proximity.as_ref().is_none_or(|p| p.is_relevant)
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Passes the statement checklist, or was never checked.
    pub fn passes_checklist(&self) -> bool {
        self.checklist.as_ref().is_none_or(ValidationReport::is_valid)
    }

    /// True when the parent count matches the origin.
    pub fn has_consistent_lineage(&self) -> bool {
        self.parent_ids.len() == self.origin.parent_count()
    }

    /// Record a Reasoning Service failure without touching the other fields.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::hypothesis;
    use super::*;

    #[test]
    fn test_generated_has_no_parents() {
        let h = hypothesis("H-0001", "Caffeine shortens reaction time");
        assert_eq!(h.origin(), Origin::Generated);
        assert!(h.parent_ids().is_empty());
        assert!(h.has_consistent_lineage());
        assert_eq!(h.iteration, 0);
    }

    #[test]
    fn test_refined_inherits_missing_fields_and_clears_assessments() {
        let mut parent = hypothesis("H-0001", "Caffeine shortens reaction time");
        parent.evidence = "Prior trials".to_string();
        parent.standing = Some(Standing::Pairwise {
            rank: 1,
            wins: 2,
            total_comparisons: 2,
        });

        let draft = HypothesisDraft {
            statement: "200mg caffeine shortens reaction time by 10%".to_string(),
            ..Default::default()
        };
        let child = Hypothesis::refined(HypothesisId::new("H-0002"), &parent, draft, 1);

        assert_eq!(child.origin(), Origin::EvolvedIndividual);
        assert_eq!(child.parent_ids(), &[HypothesisId::new("H-0001")]);
        assert_eq!(child.statement, "200mg caffeine shortens reaction time by 10%");
        assert_eq!(child.evidence, "Prior trials");
        assert!(child.standing.is_none());
        assert!(child.review.is_none());
        assert_eq!(child.iteration, 1);
    }

    #[test]
    fn test_combined_has_two_parents_in_order() {
        let a = hypothesis("H-0001", "A");
        let b = hypothesis("H-0002", "B");
        let hybrid = Hypothesis::combined(
            HypothesisId::new("H-0003"),
            &a,
            &b,
            HypothesisDraft::default(),
            1,
        );
        assert_eq!(hybrid.origin(), Origin::EvolvedCombination);
        assert_eq!(
            hybrid.parent_ids(),
            &[HypothesisId::new("H-0001"), HypothesisId::new("H-0002")]
        );
        assert!(hybrid.has_consistent_lineage());
    }

    #[test]
    fn test_unevaluated_hypothesis_counts_as_relevant() {
        let mut h = hypothesis("H-0001", "A");
        assert!(h.is_relevant());
        h.proximity = Some(Proximity {
            score: 3.0,
            is_relevant: false,
            evaluation: String::new(),
        });
        assert!(!h.is_relevant());
        assert_eq!(h.proximity_score(), Some(3.0));
    }

    #[test]
    fn test_standing_serializes_with_method_tag() {
        let standing = Standing::Pairwise {
            rank: 1,
            wins: 3,
            total_comparisons: 4,
        };
        let json = serde_json::to_value(&standing).unwrap();
        assert_eq!(json["method"], "pairwise");
        assert_eq!(json["wins"], 3);
    }
}

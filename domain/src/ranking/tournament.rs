//! Tournament ranking engine.
//!
//! Two strategies turn judgments into ranks:
//!
//! | Strategy | Set size | Judgments | Order |
//! |----------|----------|-----------|-------|
//! | [`RankingMethod::Pairwise`] | `n <= threshold` | one per unordered pair, `C(n,2)` | wins, descending |
//! | [`RankingMethod::Scoring`] | `n > threshold` | one per hypothesis | mean of found criteria, descending |
//!
//! Both sorts are stable: equal keys keep their input order, so the earlier
//! hypothesis gets the better rank. Ranks are always `1..=n` with no gaps.
//!
//! Collecting the judgments is the caller's job; the functions here are pure.

use super::criterion::Criterion;
use crate::hypothesis::{Hypothesis, HypothesisId, Standing};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Largest set ranked by full pairwise comparison.
pub const DEFAULT_PAIRWISE_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMethod {
    Pairwise,
    Scoring,
}

impl RankingMethod {
    /// Pairwise up to `threshold` hypotheses, scoring above it.
    pub fn for_set_size(n: usize, threshold: usize) -> Self {
        if n <= threshold {
            RankingMethod::Pairwise
        } else {
            RankingMethod::Scoring
        }
    }

    /// Number of Reasoning Service judgments the method needs for `n` hypotheses.
    pub fn judgment_count(&self, n: usize) -> usize {
        match self {
            RankingMethod::Pairwise => n * n.saturating_sub(1) / 2,
            RankingMethod::Scoring => n,
        }
    }
}

/// Outcome of one pairwise judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    First,
    Second,
    Tie,
}

/// A recorded pairwise judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub first: HypothesisId,
    pub second: HypothesisId,
    pub winner: Winner,
    pub reasoning: String,
}

impl Comparison {
    pub fn involves(&self, id: &HypothesisId) -> bool {
        &self.first == id || &self.second == id
    }

    pub fn is_decisive(&self) -> bool {
        self.winner != Winner::Tie
    }
}

/// All unordered index pairs `(i, j)` with `i < j`, in lexicographic order.
pub fn pairings(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

/// Per-index standing of a pairwise tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairwiseEntry {
    pub index: usize,
    pub rank: usize,
    pub wins: usize,
    pub total_comparisons: usize,
}

/// Accumulate wins over `judgments` and order the `n` entrants.
///
/// Ties contribute to neither side. Pairs referencing an index `>= n` are ignored.
pub fn pairwise_order(n: usize, judgments: &[((usize, usize), Winner)]) -> Vec<PairwiseEntry> {
    let mut wins = vec![0usize; n];
    let mut played = vec![0usize; n];

    for &((i, j), winner) in judgments {
        if i >= n || j >= n {
            continue;
        }
        played[i] += 1;
        played[j] += 1;
        match winner {
            Winner::First => wins[i] += 1,
            Winner::Second => wins[j] += 1,
            Winner::Tie => {}
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| wins[b].cmp(&wins[a]));

    order
        .into_iter()
        .enumerate()
        .map(|(pos, index)| PairwiseEntry {
            index,
            rank: pos + 1,
            wins: wins[index],
            total_comparisons: played[index],
        })
        .collect()
}

/// Mean of the criteria that were found; 0.0 when none were.
///
/// The denominator is the number of extracted scores, not the number of
/// criteria: `{novelty: 8, relevance: 6}` averages to 7.0.
pub fn overall_score(scores: &BTreeMap<Criterion, u8>) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: u32 = scores.values().map(|&s| u32::from(s)).sum();
    f64::from(sum) / scores.len() as f64
}

/// Indices ordered by descending score, ties in input order.
pub fn scored_order(overall: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..overall.len()).collect();
    order.sort_by(|&a, &b| overall[b].total_cmp(&overall[a]));
    order
}

/// Rank `hypotheses` from pairwise judgments, returning them in rank order.
pub fn apply_pairwise(
    hypotheses: Vec<Hypothesis>,
    judgments: &[((usize, usize), Winner)],
) -> Vec<Hypothesis> {
    let entries = pairwise_order(hypotheses.len(), judgments);
    let mut slots: Vec<Option<Hypothesis>> = hypotheses.into_iter().map(Some).collect();

    entries
        .into_iter()
        .filter_map(|entry| {
            slots[entry.index].take().map(|mut h| {
                h.standing = Some(Standing::Pairwise {
                    rank: entry.rank,
                    wins: entry.wins,
                    total_comparisons: entry.total_comparisons,
                });
                h
            })
        })
        .collect()
}

/// Rank `hypotheses` from per-hypothesis criterion scores, returning them in rank order.
///
/// `scores[i]` belongs to `hypotheses[i]`; a missing entry counts as no scores.
pub fn apply_scores(
    hypotheses: Vec<Hypothesis>,
    mut scores: Vec<BTreeMap<Criterion, u8>>,
) -> Vec<Hypothesis> {
    scores.resize_with(hypotheses.len(), BTreeMap::new);
    let overall: Vec<f64> = scores.iter().map(overall_score).collect();
    let order = scored_order(&overall);

    let mut slots: Vec<Option<(Hypothesis, BTreeMap<Criterion, u8>)>> = hypotheses
        .into_iter()
        .zip(scores)
        .map(Some)
        .collect();

    order
        .into_iter()
        .enumerate()
        .filter_map(|(pos, index)| {
            slots[index].take().map(|(mut h, scores)| {
                h.standing = Some(Standing::Scored {
                    rank: pos + 1,
                    overall_score: overall[index],
                    scores,
                });
                h
            })
        })
        .collect()
}

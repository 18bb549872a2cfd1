//! Numeric score scans for Ranking and Proximity responses.

use crate::ranking::Criterion;
use std::collections::BTreeMap;

/// Proximity score used when no score phrase is found.
pub const DEFAULT_PROXIMITY_SCORE: f64 = 5.0;

/// Proximity score at or above which a hypothesis is relevant by default.
pub const RELEVANCE_CUTOFF: f64 = 6.0;

const PROXIMITY_PHRASES: &[&str] = &[
    "overall proximity score: ",
    "overall proximity score of ",
    "proximity score: ",
    "overall score: ",
];

/// First `n` in `1..=10` for which `{prefix}{n}{suffix}` occurs in `lower`.
fn first_hit(lower: &str, prefix: &str, suffix: &str) -> Option<u8> {
    (1..=10u8).find(|n| lower.contains(&format!("{prefix}{n}{suffix}")))
}

/// Scan for `label`'s score using the three literal templates in order:
/// `"{label}: {n}"`, `"{label} - {n}"`, `"{label}: {n}/10"`.
///
/// Matching is case-insensitive. Within a template `n` ascends from 1 and the
/// first hit wins, so `"novelty: 10"` reads as 1.
pub fn scan_score(text: &str, label: &str) -> Option<u8> {
    let lower = text.to_lowercase();
    let label = label.to_lowercase();
    first_hit(&lower, &format!("{label}: "), "")
        .or_else(|| first_hit(&lower, &format!("{label} - "), ""))
        .or_else(|| first_hit(&lower, &format!("{label}: "), "/10"))
}

/// Per-criterion scores found in a scoring evaluation. Absent criteria are omitted.
pub fn criteria_scores(text: &str) -> BTreeMap<Criterion, u8> {
    Criterion::ALL
        .iter()
        .filter_map(|c| scan_score(text, c.label()).map(|score| (*c, score)))
        .collect()
}

/// Proximity score and relevance verdict from an evaluation.
///
/// Every phrase in `PROXIMITY_PHRASES` is tried in order and a later phrase
/// that matches overrides an earlier one. Relevance is
/// `score >= RELEVANCE_CUTOFF` unless [`relevance_override`] finds an
/// explicit verdict.
pub fn assess_proximity(text: &str) -> (f64, bool) {
    let lower = text.to_lowercase();

    let score = PROXIMITY_PHRASES
        .iter()
        .filter_map(|phrase| first_hit(&lower, phrase, ""))
        .last()
        .map_or(DEFAULT_PROXIMITY_SCORE, f64::from);

    let is_relevant = relevance_override(text).unwrap_or(score >= RELEVANCE_CUTOFF);
    (score, is_relevant)
}

/// Explicit relevance verdict in an evaluation, if any.
///
/// "highly relevant"/"very relevant" gives true and wins over
/// "not relevant"/"irrelevant", which gives false.
pub fn relevance_override(text: &str) -> Option<bool> {
    let lower = text.to_lowercase();
    if lower.contains("highly relevant") || lower.contains("very relevant") {
        Some(true)
    } else if lower.contains("not relevant") || lower.contains("irrelevant") {
        Some(false)
    } else {
        None
    }
}

//! Response extraction contract.
//!
//! Turns free text from the Reasoning Service into structured fields. Every
//! function here is total: text that does not match yields defaults, never
//! an error.
//!
//! # Functions
//!
//! | Function | Role | Default when nothing matches |
//! |----------|------|------------------------------|
//! | [`parse_drafts`] | Generation | no drafts |
//! | [`parse_draft`] | Evolution | all fields empty |
//! | [`assess_review`] | Reflection | valid, quality 0.5 |
//! | [`assess_proximity`] | Proximity | score 5.0, not relevant |
//! | [`criteria_scores`] | Ranking (scoring) | empty map |
//! | [`determine_winner`] | Ranking (pairwise) | tie |
//!
//! Numeric scans try the literal templates `"{label}: {n}"`, `"{label} - {n}"`
//! and `"{label}: {n}/10"` for `n` ascending from 1 and stop at the first
//! substring hit. A response reading `"novelty: 10"` therefore yields 1,
//! because `"novelty: 1"` is found first. This is kept on purpose so scores
//! stay reproducible across implementations.

pub mod fields;
pub mod review;
pub mod scores;
pub mod verdict;

pub use fields::{Field, parse_draft, parse_drafts, split_blocks};
pub use review::{assess_review, quality_estimate};
pub use scores::{
    DEFAULT_PROXIMITY_SCORE, RELEVANCE_CUTOFF, assess_proximity, criteria_scores,
    relevance_override, scan_score,
};
pub use verdict::determine_winner;

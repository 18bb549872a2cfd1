//! Tournament ranking: strategy selection, pairings, and converting
//! pairwise or scored judgments into a total order.

pub mod criterion;
pub mod tournament;

pub use criterion::Criterion;
pub use tournament::{
    Comparison, DEFAULT_PAIRWISE_THRESHOLD, RankingMethod, Winner, apply_pairwise, apply_scores,
    overall_score, pairings, pairwise_order, scored_order,
};

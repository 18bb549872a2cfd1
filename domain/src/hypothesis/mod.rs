//! Hypothesis lifecycle: the entity, its identifiers and the store that
//! keeps every version for provenance.

pub mod entities;
pub mod id;
pub mod store;

pub use entities::{Hypothesis, HypothesisDraft, Origin, Proximity, Review, Standing};
pub use id::{HypothesisId, HypothesisIdGenerator};
pub use store::{FilterOutcome, HypothesisStore};

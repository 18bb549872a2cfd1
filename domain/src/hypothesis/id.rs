//! Hypothesis identifiers

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identifier of a hypothesis record (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HypothesisId(String);

impl HypothesisId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HypothesisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HypothesisId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Hands out ids that are never reused within a run.
///
/// Clones share the same counter, so Generation and Evolution can each hold
/// one and still never collide.
#[derive(Debug, Clone, Default)]
pub struct HypothesisIdGenerator {
    next: Arc<AtomicU64>,
}

impl HypothesisIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> HypothesisId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        HypothesisId(format!("H-{n:04}"))
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

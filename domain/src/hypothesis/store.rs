//! In-memory hypothesis store.
//!
//! The store keeps two views over the same records:
//!
//! - **history**: every record ever inserted, in insertion order. Nothing is
//!   ever removed, so lineage can always be resolved.
//! - **active set**: the ordered ids that subsequent stages operate on.
//!   Relevance filtering and refinement only change this view.

use super::entities::{Hypothesis, Origin};
use super::id::HypothesisId;
use crate::core::error::DomainError;
use crate::extraction::relevance_override;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a relevance filter did to the active set.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// The active set now holds `kept` ids; `excluded` were marked irrelevant.
    Applied {
        kept: usize,
        excluded: Vec<HypothesisId>,
    },
    /// Every active hypothesis fell below the threshold; the set was left unchanged.
    WouldEmpty { evaluated: usize },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HypothesisStore {
    records: Vec<Hypothesis>,
    #[serde(skip)]
    index: HashMap<HypothesisId, usize>,
    active: Vec<HypothesisId>,
}

impl HypothesisStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &HypothesisId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &HypothesisId) -> Option<&Hypothesis> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Every record, in insertion order.
    pub fn history(&self) -> &[Hypothesis] {
        &self.records
    }

    pub fn active_ids(&self) -> &[HypothesisId] {
        &self.active
    }

    /// Records of the active set, in active order.
    pub fn active(&self) -> Vec<&Hypothesis> {
        self.active.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Owned copies of the active set, for handing to a role executor.
    pub fn active_snapshot(&self) -> Vec<Hypothesis> {
        self.active().into_iter().cloned().collect()
    }

    /// Active records ordered by rank; unranked records keep their relative
    /// order after the ranked ones.
    pub fn ranked(&self) -> Vec<&Hypothesis> {
        let mut active = self.active();
        active.sort_by_key(|h| h.rank().unwrap_or(usize::MAX));
        active
    }

    /// Insert a new record.
    ///
    /// Fails if the id is taken, the parent count does not match the origin,
    /// or a parent is not in history.
    pub fn insert(&mut self, hypothesis: Hypothesis) -> Result<(), DomainError> {
        if self.contains(hypothesis.id()) {
            return Err(DomainError::DuplicateHypothesis(hypothesis.id().to_string()));
        }
        self.check_lineage(&hypothesis)?;
        self.index
            .insert(hypothesis.id().clone(), self.records.len());
        self.records.push(hypothesis);
        Ok(())
    }

    /// Insert a new record and append it to the active set.
    pub fn insert_active(&mut self, hypothesis: Hypothesis) -> Result<(), DomainError> {
        let id = hypothesis.id().clone();
        self.insert(hypothesis)?;
        self.active.push(id);
        Ok(())
    }

    /// Replace an existing record with an updated copy of the same hypothesis.
    ///
    /// Provenance (origin and parents) must be unchanged.
    pub fn update(&mut self, hypothesis: Hypothesis) -> Result<(), DomainError> {
        let Some(&i) = self.index.get(hypothesis.id()) else {
            return Err(DomainError::UnknownHypothesis(hypothesis.id().to_string()));
        };
        let current = &self.records[i];
        if current.origin() != hypothesis.origin() || current.parent_ids() != hypothesis.parent_ids()
        {
            return Err(DomainError::InvalidLineage {
                id: hypothesis.id().to_string(),
                reason: "origin and parents are immutable".to_string(),
            });
        }
        self.records[i] = hypothesis;
        Ok(())
    }

    /// Update every record in `hypotheses`, stopping at the first failure.
    pub fn update_all(
        &mut self,
        hypotheses: impl IntoIterator<Item = Hypothesis>,
    ) -> Result<(), DomainError> {
        hypotheses.into_iter().try_for_each(|h| self.update(h))
    }

    /// Replace the active set. Every id must be in history.
    pub fn set_active(&mut self, ids: Vec<HypothesisId>) -> Result<(), DomainError> {
        if let Some(missing) = ids.iter().find(|id| !self.contains(id)) {
            return Err(DomainError::UnknownHypothesis(missing.to_string()));
        }
        self.active = ids;
        Ok(())
    }

    /// Swap `old` for `new` in the active set, keeping its position.
    pub fn replace_active(
        &mut self,
        old: &HypothesisId,
        new: HypothesisId,
    ) -> Result<(), DomainError> {
        if !self.contains(&new) {
            return Err(DomainError::UnknownHypothesis(new.to_string()));
        }
        match self.active.iter().position(|id| id == old) {
            Some(pos) => {
                self.active[pos] = new;
                Ok(())
            }
            None => Err(DomainError::UnknownHypothesis(old.to_string())),
        }
    }

    /// Drop ids from the active set for which `keep` returns false.
    pub fn retain_active(&mut self, mut keep: impl FnMut(&Hypothesis) -> bool) {
        let records = &self.records;
        let index = &self.index;
        self.active
            .retain(|id| index.get(id).is_some_and(|&i| keep(&records[i])));
    }

    /// Keep only the active hypotheses judged relevant at `threshold`.
    ///
    /// An explicit verdict in the evaluation text ("not relevant", "highly
    /// relevant") decides; otherwise the score must reach `threshold`. Every
    /// evaluated record's `is_relevant` is set to the decision, so the flag
    /// always matches active membership. Excluded records stay in history.
    /// A record that was never evaluated stays active. If nothing would
    /// survive, the active set is left as is and [`FilterOutcome::WouldEmpty`]
    /// is returned.
    pub fn filter_relevant(&mut self, threshold: f64) -> FilterOutcome {
        let decisions: Vec<(HypothesisId, bool)> = self
            .active
            .iter()
            .map(|id| {
                let keep = self
                    .get(id)
                    .and_then(|h| h.proximity.as_ref())
                    .is_none_or(|p| {
                        relevance_override(&p.evaluation).unwrap_or(p.score >= threshold)
                    });
                (id.clone(), keep)
            })
            .collect();

        if decisions.iter().all(|(_, keep)| !keep) {
            return FilterOutcome::WouldEmpty {
                evaluated: decisions.len(),
            };
        }

        let mut kept = Vec::new();
        let mut excluded = Vec::new();
        for (id, keep) in decisions {
            if let Some(&i) = self.index.get(&id)
                && let Some(proximity) = self.records[i].proximity.as_mut()
            {
                proximity.is_relevant = keep;
            }
            if keep {
                kept.push(id);
            } else {
                excluded.push(id);
            }
        }
        let kept_count = kept.len();
        self.active = kept;
        FilterOutcome::Applied {
            kept: kept_count,
            excluded,
        }
    }

    /// Check that every record's parents exist in history.
    pub fn verify_lineage(&self) -> Result<(), DomainError> {
        self.records.iter().try_for_each(|h| self.check_lineage(h))
    }

    /// Records derived from `id`, directly or transitively.
    pub fn descendants(&self, id: &HypothesisId) -> Vec<&Hypothesis> {
        let mut found: Vec<&Hypothesis> = Vec::new();
        let mut frontier = vec![id.clone()];
        while let Some(current) = frontier.pop() {
            for h in &self.records {
                if h.parent_ids().contains(&current) && !found.iter().any(|f| f.id() == h.id()) {
                    frontier.push(h.id().clone());
                    found.push(h);
                }
            }
        }
        found
    }

    pub fn count_by_origin(&self, origin: Origin) -> usize {
        self.records.iter().filter(|h| h.origin() == origin).count()
    }

    /// Rebuild the id index, e.g. after deserializing.
    pub fn reindex(&mut self) {
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, h)| (h.id().clone(), i))
            .collect();
    }

    fn check_lineage(&self, hypothesis: &Hypothesis) -> Result<(), DomainError> {
        if !hypothesis.has_consistent_lineage() {
            return Err(DomainError::InvalidLineage {
                id: hypothesis.id().to_string(),
                reason: format!(
                    "{} requires {} parent(s), found {}",
                    hypothesis.origin(),
                    hypothesis.origin().parent_count(),
                    hypothesis.parent_ids().len()
                ),
            });
        }
        match hypothesis.parent_ids().iter().find(|p| !self.contains(p)) {
            Some(missing) => Err(DomainError::InvalidLineage {
                id: hypothesis.id().to_string(),
                reason: format!("parent {missing} is not in history"),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypothesis::entities::fixtures::hypothesis;
    use crate::hypothesis::entities::{HypothesisDraft, Proximity};

    fn with_score(mut h: Hypothesis, score: f64) -> Hypothesis {
        h.proximity = Some(Proximity {
            score,
            is_relevant: score >= 6.0,
            evaluation: String::new(),
        });
        h
    }

    fn store_of(hs: Vec<Hypothesis>) -> HypothesisStore {
        let mut store = HypothesisStore::new();
        for h in hs {
            store.insert_active(h).unwrap();
        }
        store
    }

    // ==================== Insert Tests ====================

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = store_of(vec![hypothesis("H-0001", "A")]);
        let err = store.insert(hypothesis("H-0001", "B")).unwrap_err();
        assert_eq!(err, DomainError::DuplicateHypothesis("H-0001".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_parent_must_exist() {
        let mut store = HypothesisStore::new();
        let orphan_parent = hypothesis("H-0001", "A");
        let child = Hypothesis::refined(
            HypothesisId::new("H-0002"),
            &orphan_parent,
            HypothesisDraft::default(),
            1,
        );
        assert!(matches!(
            store.insert(child),
            Err(DomainError::InvalidLineage { .. })
        ));
    }

    #[test]
    fn test_update_cannot_change_provenance() {
        let mut store = store_of(vec![hypothesis("H-0001", "A"), hypothesis("H-0002", "B")]);
        let parent = store.get(&"H-0001".into()).unwrap().clone();
        let child = Hypothesis::refined(
            HypothesisId::new("H-0002"),
            &parent,
            HypothesisDraft::default(),
            1,
        );
        assert!(matches!(
            store.update(child),
            Err(DomainError::InvalidLineage { .. })
        ));
    }

    #[test]
    fn test_update_replaces_fields() {
        let mut store = store_of(vec![hypothesis("H-0001", "A")]);
        let mut h = store.get(&"H-0001".into()).unwrap().clone();
        h.error = Some("timeout".to_string());
        store.update(h).unwrap();
        assert!(store.get(&"H-0001".into()).unwrap().has_error());
    }

    // ==================== Filter Tests ====================

    #[test]
    fn test_filter_soft_deletes() {
        let mut store = store_of(vec![
            with_score(hypothesis("H-0001", "A"), 8.0),
            with_score(hypothesis("H-0002", "B"), 4.0),
            with_score(hypothesis("H-0003", "C"), 6.0),
        ]);

        let outcome = store.filter_relevant(6.0);

        assert_eq!(
            outcome,
            FilterOutcome::Applied {
                kept: 2,
                excluded: vec!["H-0002".into()],
            }
        );
        assert_eq!(store.active_ids(), &["H-0001".into(), "H-0003".into()]);
        assert_eq!(store.history().len(), 3);
        assert!(!store.get(&"H-0002".into()).unwrap().is_relevant());
    }

    #[test]
    fn test_filter_that_would_empty_is_a_no_op() {
        let mut store = store_of(vec![
            with_score(hypothesis("H-0001", "A"), 2.0),
            with_score(hypothesis("H-0002", "B"), 5.0),
        ]);
        assert_eq!(
            store.filter_relevant(6.0),
            FilterOutcome::WouldEmpty { evaluated: 2 }
        );
        assert_eq!(store.active_ids().len(), 2);
    }

    #[test]
    fn test_filter_follows_explicit_verdict() {
        let mut overruled = with_score(hypothesis("H-0001", "A"), 8.0);
        if let Some(p) = overruled.proximity.as_mut() {
            p.evaluation = "Proximity score: 8, but not relevant to the goal.".to_string();
            p.is_relevant = false;
        }
        let mut rescued = with_score(hypothesis("H-0002", "B"), 3.0);
        if let Some(p) = rescued.proximity.as_mut() {
            p.evaluation = "Proximity score: 3, yet highly relevant.".to_string();
            p.is_relevant = true;
        }
        let mut store = store_of(vec![overruled, rescued]);

        let outcome = store.filter_relevant(6.0);

        assert_eq!(
            outcome,
            FilterOutcome::Applied {
                kept: 1,
                excluded: vec!["H-0001".into()],
            }
        );
        assert!(!store.get(&"H-0001".into()).unwrap().is_relevant());
        assert!(store.get(&"H-0002".into()).unwrap().is_relevant());
    }

    #[test]
    fn test_filter_flag_follows_threshold() {
        // Flags were set against the default cutoff of 6
        let mut store = store_of(vec![
            with_score(hypothesis("H-0001", "A"), 6.0),
            with_score(hypothesis("H-0002", "B"), 4.0),
            hypothesis("H-0003", "unscored"),
        ]);

        store.filter_relevant(3.5);
        assert_eq!(store.active_ids().len(), 3);
        assert!(store.get(&"H-0002".into()).unwrap().is_relevant());

        store.filter_relevant(7.0);
        assert_eq!(store.active_ids(), &["H-0003".into()]);
        for id in ["H-0001", "H-0002"] {
            assert!(!store.get(&id.into()).unwrap().is_relevant());
        }
    }

    // ==================== Active Set Tests ====================

    #[test]
    fn test_replace_active_keeps_position_and_history() {
        let mut store = store_of(vec![hypothesis("H-0001", "A"), hypothesis("H-0002", "B")]);
        let parent = store.get(&"H-0001".into()).unwrap().clone();
        let child = Hypothesis::refined(
            HypothesisId::new("H-0003"),
            &parent,
            HypothesisDraft::default(),
            1,
        );
        store.insert(child).unwrap();
        store.replace_active(&"H-0001".into(), "H-0003".into()).unwrap();

        assert_eq!(store.active_ids(), &["H-0003".into(), "H-0002".into()]);
        assert!(store.contains(&"H-0001".into()));
        store.verify_lineage().unwrap();
        assert_eq!(store.descendants(&"H-0001".into()).len(), 1);
    }

    #[test]
    fn test_set_active_rejects_unknown_ids() {
        let mut store = store_of(vec![hypothesis("H-0001", "A")]);
        assert!(store.set_active(vec!["H-0009".into()]).is_err());
        assert_eq!(store.active_ids(), &["H-0001".into()]);
    }

    #[test]
    fn test_reindex_after_deserialize() {
        let store = store_of(vec![hypothesis("H-0001", "A")]);
        let json = serde_json::to_string(&store).unwrap();
        let mut restored: HypothesisStore = serde_json::from_str(&json).unwrap();
        assert!(restored.get(&"H-0001".into()).is_none());
        restored.reindex();
        assert!(restored.get(&"H-0001".into()).is_some());
    }
}

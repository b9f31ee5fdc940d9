//! `ActiveSet`: the arbitration candidates, in registration order.

use bb_core::BehaviorId;

/// The subset of registered behaviors currently eligible for arbitration.
///
/// Kept sorted by `BehaviorId`, which is registration order, so both
/// arbitration policies see a stable, deterministic ordering.  Mutation is
/// crate-private: only a slot's own state-machine step inserts or removes its
/// own ID.
#[derive(Clone, Debug, Default)]
pub struct ActiveSet {
    ids: Vec<BehaviorId>,
}

impl ActiveSet {
    pub fn contains(&self, id: BehaviorId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = BehaviorId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[BehaviorId] {
        &self.ids
    }

    /// Idempotent: inserting a member again changes nothing.
    pub(crate) fn insert(&mut self, id: BehaviorId) {
        if let Err(pos) = self.ids.binary_search(&id) {
            self.ids.insert(pos, id);
        }
    }

    pub(crate) fn remove(&mut self, id: BehaviorId) {
        if let Ok(pos) = self.ids.binary_search(&id) {
            self.ids.remove(pos);
        }
    }
}

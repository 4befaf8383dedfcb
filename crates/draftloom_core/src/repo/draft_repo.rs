//! Draft storage contract and the in-memory implementation.
//!
//! # Responsibility
//! - Provide exclusive-access storage for every draft aggregate.
//! - Preserve creation order for listings.
//!
//! # Invariants
//! - All mutation of a stored draft happens inside `modify`, under the
//!   store lock, so concurrent updates to the same draft serialize.
//! - `clear` is the only path that removes drafts.

use crate::model::draft::{Draft, DraftId};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Storage contract for draft aggregates.
pub trait DraftRepository {
    /// Stores one new draft.
    fn insert(&self, draft: Draft);

    /// Returns a copy of one draft.
    fn snapshot(&self, id: DraftId) -> Option<Draft>;

    /// Runs `mutate` on one draft under the store lock.
    ///
    /// Returns `None` when the draft does not exist; the closure's result
    /// otherwise.
    fn modify<T>(&self, id: DraftId, mutate: impl FnOnce(&mut Draft) -> T) -> Option<T>;

    /// Returns copies of all drafts in creation order.
    fn list(&self) -> Vec<Draft>;

    /// Number of stored drafts.
    fn len(&self) -> usize;

    /// True when no draft is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every draft. Test-isolation path; never called in normal
    /// operation.
    fn clear(&self);
}

/// Process-lifetime in-memory draft storage.
///
/// One store-level mutex is the serialization point for all draft
/// mutation; creation order is the vector order.
#[derive(Default)]
pub struct MemoryDraftRepository {
    drafts: Mutex<Vec<Draft>>,
}

impl MemoryDraftRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, Vec<Draft>> {
        self.drafts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DraftRepository for MemoryDraftRepository {
    fn insert(&self, draft: Draft) {
        self.locked().push(draft);
    }

    fn snapshot(&self, id: DraftId) -> Option<Draft> {
        self.locked().iter().find(|draft| draft.id == id).cloned()
    }

    fn modify<T>(&self, id: DraftId, mutate: impl FnOnce(&mut Draft) -> T) -> Option<T> {
        let mut drafts = self.locked();
        drafts.iter_mut().find(|draft| draft.id == id).map(mutate)
    }

    fn list(&self) -> Vec<Draft> {
        self.locked().clone()
    }

    fn len(&self) -> usize {
        self.locked().len()
    }

    fn clear(&self) {
        self.locked().clear();
    }
}

//! In-memory change tracker for tests/dev.

use std::sync::{Mutex, MutexGuard, PoisonError};

use bizdoc_core::{BizId, Change, ChangeTracker};

/// Records every reported change, in arrival order.
///
/// - No IO
/// - Dirty state is derived from the recorded changes
/// - A poisoned lock is recovered rather than dropping changes
#[derive(Debug, Default)]
pub struct InMemoryChangeTracker {
    changes: Mutex<Vec<Change>>,
}

impl InMemoryChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Change>> {
        self.changes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all recorded changes.
    pub fn changes(&self) -> Vec<Change> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Changes recorded against one document instance.
    pub fn changes_for(&self, biz_id: &BizId) -> Vec<Change> {
        self.lock()
            .iter()
            .filter(|c| &c.biz_id == biz_id)
            .cloned()
            .collect()
    }

    pub fn is_dirty(&self, biz_id: &BizId) -> bool {
        self.lock().iter().any(|c| &c.biz_id == biz_id)
    }

    /// Names of changed fields for one instance, first change first, without
    /// repeats.
    pub fn dirty_fields(&self, biz_id: &BizId) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = Vec::new();
        for change in self.lock().iter().filter(|c| &c.biz_id == biz_id) {
            if !fields.contains(&change.field) {
                fields.push(change.field);
            }
        }
        fields
    }

    /// Forget everything (e.g. after the owning transaction commits).
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Forget the changes of one instance.
    pub fn clear_for(&self, biz_id: &BizId) {
        self.lock().retain(|c| &c.biz_id != biz_id);
    }
}

impl ChangeTracker for InMemoryChangeTracker {
    fn record(&self, change: &Change) {
        self.lock().push(change.clone());
    }
}

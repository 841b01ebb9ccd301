//! Insertion-ordered handle registry.

use std::collections::BTreeMap;

/// Handles keyed by a monotonically increasing id.
///
/// Ids are never reused, so iteration order is connection order even after
/// handles in the middle are removed.
#[derive(Debug)]
pub(super) struct Registry<T> {
    next_id: u64,
    entries: BTreeMap<u64, T>,
}

impl<T: Clone> Registry<T> {
    pub(super) fn new() -> Self {
        Self {
            next_id: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Allocate an id and store the handle built for it.
    pub(super) fn insert(&mut self, make: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let handle = make(id);
        self.entries.insert(id, handle.clone());
        handle
    }

    pub(super) fn remove(&mut self, id: u64) -> Option<T> {
        self.entries.remove(&id)
    }

    /// The handle at `position` in connection order.
    pub(super) fn nth(&self, position: usize) -> Option<T> {
        self.entries.values().nth(position).cloned()
    }

    pub(super) fn values(&self) -> Vec<T> {
        self.entries.values().cloned().collect()
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}

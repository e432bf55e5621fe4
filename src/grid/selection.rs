//! Row selection keyed by stable record identity.

use std::collections::{BTreeSet, HashSet};

use super::record::RowKey;

/// Tracks which records are chosen for bulk actions.
///
/// The tracker only ever holds [`RowKey`]s, so it is unaffected by how the
/// pipeline reorders or slices rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: BTreeSet<RowKey>,
}

impl SelectionTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selected.contains(key)
    }

    /// Flip membership of a single key.
    pub fn toggle(&mut self, key: RowKey) {
        if !self.selected.remove(&key) {
            self.selected.insert(key);
        }
    }

    /// Whether every key in `visible` is selected. False for an empty slice.
    pub fn all_selected<'a>(&self, visible: impl IntoIterator<Item = &'a RowKey>) -> bool {
        let mut any = false;
        for key in visible {
            if !self.selected.contains(key) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Select every visible key, or deselect exactly those keys when they are
    /// all selected already. Keys outside `visible` are left untouched.
    pub fn toggle_all(&mut self, visible: &[RowKey]) {
        if visible.is_empty() {
            return;
        }
        if self.all_selected(visible) {
            for key in visible {
                self.selected.remove(key);
            }
        } else {
            self.selected.extend(visible.iter().cloned());
        }
    }

    /// Drop keys that are not in `existing`, returning how many were removed.
    pub fn retain_existing(&mut self, existing: &HashSet<&RowKey>) -> usize {
        let before = self.selected.len();
        self.selected.retain(|key| existing.contains(key));
        before - self.selected.len()
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected keys in key order.
    pub fn iter(&self) -> impl Iterator<Item = &RowKey> {
        self.selected.iter()
    }
}

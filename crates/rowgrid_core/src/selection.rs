use crate::RowKey;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// How clicking a row changes the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    #[default]
    None,
    Single,
    Multi,
}

/// Tri-state of a "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    All,
    None,
    Partial,
}

/// Whether non-selected rows are hidden from the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    All,
    OnlySelected,
}

/// Selected row keys in selection order.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    keys: IndexSet<RowKey>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &RowKey) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &RowKey> {
        self.keys.iter()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn replace(&mut self, keys: impl IntoIterator<Item = RowKey>) {
        self.keys = keys.into_iter().collect();
    }

    pub fn insert(&mut self, key: RowKey) -> bool {
        self.keys.insert(key)
    }

    pub fn remove(&mut self, key: &RowKey) -> bool {
        self.keys.shift_remove(key)
    }

    /// Apply a row click. Single mode keeps at most one key and a deselect
    /// empties it. `None` ignores clicks.
    pub fn apply(&mut self, key: RowKey, selected: bool, mode: SelectMode) {
        match (mode, selected) {
            (SelectMode::None, _) => {}
            (SelectMode::Single, true) => {
                self.keys.clear();
                self.keys.insert(key);
            }
            (SelectMode::Single, false) => {
                self.keys.clear();
            }
            (SelectMode::Multi, true) => {
                self.keys.insert(key);
            }
            (SelectMode::Multi, false) => {
                self.keys.shift_remove(&key);
            }
        }
    }

    /// Drop keys rejected by `keep`, returning the removed ones.
    pub fn retain(&mut self, mut keep: impl FnMut(&RowKey) -> bool) -> Vec<RowKey> {
        let mut removed = Vec::new();
        self.keys.retain(|key| {
            if keep(key) {
                true
            } else {
                removed.push(key.clone());
                false
            }
        });
        removed
    }

    /// Tri-state against the total number of rows.
    pub fn select_all_state(&self, total_rows: usize) -> SelectAllState {
        if self.keys.is_empty() {
            SelectAllState::None
        } else if self.keys.len() == total_rows {
            SelectAllState::All
        } else {
            SelectAllState::Partial
        }
    }
}

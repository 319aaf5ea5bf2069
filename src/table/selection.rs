//! Row selection tracking.
//!
//! The tracker answers "which rows of the visible sequence are selected". Two
//! policies are supported:
//!
//! - [`SelectionPolicy::Positional`] stores positions into the visible
//!   sequence. Positions are meaningless once the sequence is recomputed, so
//!   the selection is cleared on every recomputation.
//! - [`SelectionPolicy::Identity`] stores stable row keys produced by a
//!   caller-supplied function. The selection follows rows through sorting;
//!   keys whose rows leave the visible sequence are dropped.
//!
//! Every operation takes the current visible sequence so the tracker never
//! caches rows.

use crate::domain::Record;
use std::collections::BTreeSet;
use std::fmt;

/// Extracts a stable identity from a row.
pub type RowKeyFn<R> = dyn Fn(&R) -> String;

/// How selected rows are identified.
pub enum SelectionPolicy<R> {
    /// By position in the visible sequence; cleared on recomputation.
    Positional,
    /// By a stable key; survives reordering.
    Identity(Box<RowKeyFn<R>>),
}

impl<R> Default for SelectionPolicy<R> {
    fn default() -> Self {
        Self::Positional
    }
}

impl<R> fmt::Debug for SelectionPolicy<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional => f.write_str("Positional"),
            Self::Identity(_) => f.write_str("Identity(..)"),
        }
    }
}

impl<R: Record + 'static> SelectionPolicy<R> {
    /// Identity selection keyed by the string form of field `key`.
    ///
    /// Rows missing the field share the empty key.
    #[must_use]
    pub fn by_field(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::Identity(Box::new(move |row: &R| {
            row.field(&key).map(|v| v.to_string()).unwrap_or_default()
        }))
    }
}

/// Selection state of one table.
#[derive(Debug)]
pub struct SelectionTracker<R> {
    policy: SelectionPolicy<R>,
    positions: BTreeSet<usize>,
    keys: BTreeSet<String>,
}

impl<R> Default for SelectionTracker<R> {
    fn default() -> Self {
        Self::new(SelectionPolicy::Positional)
    }
}

impl<R> SelectionTracker<R> {
    #[must_use]
    pub const fn new(policy: SelectionPolicy<R>) -> Self {
        Self {
            policy,
            positions: BTreeSet::new(),
            keys: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &SelectionPolicy<R> {
        &self.policy
    }

    /// Selects every visible row (`checked`) or clears the selection.
    ///
    /// Returns `true` if the selection changed.
    pub fn select_all(&mut self, checked: bool, visible: &[&R]) -> bool {
        match &self.policy {
            SelectionPolicy::Positional => {
                let next: BTreeSet<usize> = if checked {
                    (0..visible.len()).collect()
                } else {
                    BTreeSet::new()
                };
                replace(&mut self.positions, next)
            }
            SelectionPolicy::Identity(key_of) => {
                let next: BTreeSet<String> = if checked {
                    visible.iter().map(|row| key_of(row)).collect()
                } else {
                    BTreeSet::new()
                };
                replace(&mut self.keys, next)
            }
        }
    }

    /// Adds or removes the row at visible `position`.
    ///
    /// Positions outside the visible sequence are ignored. Returns `true` if
    /// the selection changed.
    pub fn select_row(&mut self, position: usize, checked: bool, visible: &[&R]) -> bool {
        let Some(row) = visible.get(position) else {
            tracing::debug!(position, visible = visible.len(), "ignoring out of range selection");
            return false;
        };
        match &self.policy {
            SelectionPolicy::Positional => {
                if checked {
                    self.positions.insert(position)
                } else {
                    self.positions.remove(&position)
                }
            }
            SelectionPolicy::Identity(key_of) => {
                let key = key_of(row);
                if checked {
                    self.keys.insert(key)
                } else {
                    self.keys.remove(&key)
                }
            }
        }
    }

    /// Returns `true` if the row at visible `position` is selected.
    #[must_use]
    pub fn is_selected(&self, position: usize, visible: &[&R]) -> bool {
        match &self.policy {
            SelectionPolicy::Positional => {
                position < visible.len() && self.positions.contains(&position)
            }
            SelectionPolicy::Identity(key_of) => visible
                .get(position)
                .is_some_and(|row| self.keys.contains(&key_of(row))),
        }
    }

    /// Visible positions of the selected rows, in visible order.
    #[must_use]
    pub fn selected_positions(&self, visible: &[&R]) -> Vec<usize> {
        (0..visible.len())
            .filter(|&position| self.is_selected(position, visible))
            .collect()
    }

    /// Number of selected entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self.policy {
            SelectionPolicy::Positional => self.positions.len(),
            SelectionPolicy::Identity(_) => self.keys.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` iff every visible row is selected and at least one row is visible.
    #[must_use]
    pub fn is_all_selected(&self, visible: &[&R]) -> bool {
        !visible.is_empty() && self.selected_positions(visible).len() == visible.len()
    }

    /// Reconciles the selection with a freshly recomputed visible sequence.
    ///
    /// Positional selections are cleared; identity selections drop keys whose
    /// rows are no longer visible. Returns `true` if the selection changed.
    pub fn reconcile(&mut self, visible: &[&R]) -> bool {
        match &self.policy {
            SelectionPolicy::Positional => {
                let changed = !self.positions.is_empty();
                self.positions.clear();
                changed
            }
            SelectionPolicy::Identity(key_of) => {
                let present: BTreeSet<String> = visible.iter().map(|row| key_of(row)).collect();
                let before = self.keys.len();
                self.keys.retain(|key| present.contains(key));
                self.keys.len() != before
            }
        }
    }
}

fn replace<T: Ord>(current: &mut BTreeSet<T>, next: BTreeSet<T>) -> bool {
    if *current == next {
        false
    } else {
        *current = next;
        true
    }
}

//! Local versus delegated computation.
//!
//! Sorting and filtering are each configured once, when the table is built,
//! as either computed locally over the in-memory rows or delegated to the
//! caller. A delegated concern is reported to the callback and never computed
//! by the table; the caller is trusted to supply already sorted or filtered
//! rows on the next update.

use super::filter::FilterMap;
use super::sort::SortDirection;
use std::fmt;

/// Receives every sort transition as `(column key, direction)`.
pub type SortDelegate = Box<dyn FnMut(&str, SortDirection)>;

/// Receives the complete filter map after every filter change.
pub type FilterDelegate = Box<dyn FnMut(&FilterMap)>;

/// Where one concern is computed.
pub enum Computation<F> {
    /// Computed by the table over its rows.
    Local,
    /// Handed to the caller through the callback.
    Delegated(F),
}

impl<F> Default for Computation<F> {
    fn default() -> Self {
        Self::Local
    }
}

impl<F> Computation<F> {
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }
}

impl<F> fmt::Debug for Computation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("Local"),
            Self::Delegated(_) => f.write_str("Delegated(..)"),
        }
    }
}

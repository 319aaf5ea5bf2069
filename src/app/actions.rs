//! Actions representing side effects for the host to carry out.
//!
//! The table reports every delegated concern and notification through
//! callbacks. The app layer routes those callbacks into an [`Outbox`], and the
//! event handler drains it into a `Vec<Action>` after each event. The host
//! (the `datatable` binary, or any embedding program) executes the actions in
//! order: reload a page, run a server-side sort, open a detail view, and so on.
//!
//! # Example
//!
//! ```rust
//! use datatable::app::{Action, Outbox};
//!
//! let outbox = Outbox::default();
//! outbox.push(Action::PageRequested(2));
//! assert_eq!(outbox.drain(), vec![Action::PageRequested(2)]);
//! assert!(outbox.drain().is_empty());
//! ```

use crate::table::{FilterMap, SortDirection};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Commands emitted by the event handler for the host to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Sorting is delegated: the host should re-query rows in this order.
    SortRequested {
        key: String,
        direction: SortDirection,
    },

    /// Filtering is delegated: the host should re-query rows matching the
    /// complete filter map.
    FilterRequested(FilterMap),

    /// The selection changed. Carries the selected rows in visible order.
    SelectionChanged(Vec<Value>),

    /// A row body was clicked.
    RowClicked { position: usize, row: Value },

    /// A row action was invoked.
    ActionInvoked { label: String, row: Value },

    /// The user asked for another page.
    PageRequested(usize),

    /// The user asked for another page size.
    LimitRequested(usize),
}

/// Shared queue the table callbacks push into.
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queue: Rc<RefCell<Vec<Action>>>,
}

impl Outbox {
    pub fn push(&self, action: Action) {
        tracing::trace!(?action, "action queued");
        self.queue.borrow_mut().push(action);
    }

    /// Takes every queued action, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Action> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_queue() {
        let outbox = Outbox::default();
        let handle = outbox.clone();
        handle.push(Action::LimitRequested(25));
        handle.push(Action::PageRequested(3));
        assert!(!outbox.is_empty());
        assert_eq!(
            outbox.drain(),
            vec![Action::LimitRequested(25), Action::PageRequested(3)]
        );
        assert!(handle.is_empty());
    }
}

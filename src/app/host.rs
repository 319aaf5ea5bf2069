//! An in-memory host answering delegated requests.
//!
//! When sorting, filtering or paging is handed to the caller, something has to
//! do the work and supply fresh rows. [`MemoryHost`] plays that role over a
//! row collection held in memory, the way a server would over a database:
//! it applies [`Action::SortRequested`], [`Action::FilterRequested`],
//! [`Action::PageRequested`] and [`Action::LimitRequested`] to its own query
//! state and pushes the resulting page back into the table.

use super::{handle_event, Action, AppState, Event};
use crate::config::Config;
use crate::domain::Result;
use crate::table::{sort, FilterKind, FilterState, RowFilter, SortDirection};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Paging {
    page: usize,
    limit: usize,
}

/// Query state of the host plus the full row collection.
#[derive(Debug)]
pub struct MemoryHost {
    rows: Vec<Value>,
    kinds: BTreeMap<String, FilterKind>,
    sort: Option<(String, SortDirection)>,
    filters: FilterState,
    paging: Option<Paging>,
}

impl MemoryHost {
    /// Serves `rows`; pages them when `config.page_size` is set.
    #[must_use]
    pub fn new(rows: Vec<Value>, config: &Config) -> Self {
        let kinds = config
            .columns
            .iter()
            .filter_map(|c| c.filter.clone().map(|kind| (c.key.clone(), kind)))
            .collect();
        Self {
            rows,
            kinds,
            sort: None,
            filters: FilterState::default(),
            paging: config.page_size.map(|limit| Paging { page: 1, limit }),
        }
    }

    /// Runs the current query. Returns the rows of the current page (all
    /// matching rows when not paging) and the number of matching rows.
    #[must_use]
    pub fn query(&self) -> (Vec<Value>, usize) {
        let _span = tracing::debug_span!("host_query", sort = ?self.sort, paging = ?self.paging).entered();

        let row_filter = RowFilter::new(&self.filters, |key| self.kinds.get(key));
        let mut indices: Vec<usize> = (0..self.rows.len())
            .filter(|&i| row_filter.matches(&self.rows[i]))
            .collect();
        if let Some((key, direction)) = &self.sort {
            sort::sort_indices(&self.rows, &mut indices, key, *direction);
        }

        let total = indices.len();
        let window = match self.paging {
            Some(Paging { page, limit }) => {
                let start = page.saturating_sub(1).saturating_mul(limit).min(total);
                let end = start.saturating_add(limit).min(total);
                &indices[start..end]
            }
            None => &indices[..],
        };
        (window.iter().map(|&i| self.rows[i].clone()).collect(), total)
    }

    /// Applies a delegated request to the query state.
    ///
    /// Returns `true` if the table needs fresh rows.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::SortRequested { key, direction } => {
                self.sort = Some((key.clone(), *direction));
                true
            }
            Action::FilterRequested(filters) => {
                self.filters = FilterState::default();
                for (key, value) in filters {
                    self.filters.merge(key, value);
                }
                if let Some(paging) = &mut self.paging {
                    paging.page = 1;
                }
                true
            }
            Action::PageRequested(page) => match &mut self.paging {
                Some(paging) => {
                    paging.page = *page;
                    true
                }
                None => false,
            },
            Action::LimitRequested(limit) => match &mut self.paging {
                Some(paging) => {
                    paging.limit = *limit;
                    paging.page = 1;
                    true
                }
                None => false,
            },
            Action::SelectionChanged(_) | Action::RowClicked { .. } | Action::ActionInvoked { .. } => false,
        }
    }

    /// Pushes the current query result into `state`.
    ///
    /// Returns what handling the new rows produced, like any other event.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn sync(&self, state: &mut AppState) -> Result<(bool, Vec<Action>)> {
        let (rows, total) = self.query();
        tracing::debug!(rows = rows.len(), total, "host supplying rows");
        if let Some(Paging { page, limit }) = self.paging {
            state.set_pagination(page, limit, total);
        }
        handle_event(state, &Event::SetRows(rows))
    }
}

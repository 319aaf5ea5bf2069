//! The data table engine.
//!
//! [`DataTable`] takes an in-memory row collection and a list of [`Column`]s
//! and maintains the *visible sequence*: the rows after local filtering and
//! local sorting, in display order. Around that pipeline it tracks selection,
//! per-row action menus, the responsive layout and pagination.
//!
//! # Pipeline
//!
//! ```text
//! rows ──► filter (local or delegated) ──► sort (local or delegated) ──► visible
//!                                                                          │
//!              selection ◄── positions / keys ─────────────────────────────┤
//!              render mode ◄── viewport width                              │
//!              actions ◄── per visible row ◄───────────────────────────────┘
//! ```
//!
//! The pipeline re-runs in full, synchronously, whenever rows, filters or the
//! sort change. Rows are never mutated; the visible sequence is a list of
//! indices into them.
//!
//! # Example
//!
//! ```rust
//! use datatable::table::{Column, DataTable};
//! use serde_json::{json, Value};
//!
//! let mut table: DataTable<Value> = DataTable::builder(vec![
//!     Column::new("id", "ID"),
//!     Column::new("name", "Name").sortable().filterable(),
//! ])
//! .rows(vec![
//!     json!({"id": 1, "name": "Bea"}),
//!     json!({"id": 2, "name": "Al"}),
//! ])
//! .build()?;
//!
//! table.apply_sort("name");
//! assert_eq!(table.visible_rows()[0]["name"], "Al");
//! # Ok::<(), datatable::TableError>(())
//! ```

pub mod actions;
pub mod column;
pub mod delegate;
pub mod filter;
pub mod pagination;
pub mod render_mode;
pub mod selection;
pub mod sort;

pub use actions::{resolve, ActionMenu, Resolved, RowAction, Variant};
pub use column::{Align, CellRenderer, Column, FilterKind, SelectOption};
pub use delegate::{Computation, FilterDelegate, SortDelegate};
pub use filter::{FilterMap, FilterState, RowFilter};
pub use pagination::Pagination;
pub use render_mode::{RenderMode, Viewport};
pub use selection::{SelectionPolicy, SelectionTracker};
pub use sort::{SortDirection, SortState};

use crate::domain::{Record, Result, TableError};
use std::collections::HashSet;
use std::fmt;

/// Message shown when the visible sequence is empty.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// Message shown while rows are loading.
pub const DEFAULT_LOADING_MESSAGE: &str = "Loading...";

type SelectionNotifier<R> = Box<dyn FnMut(&[&R])>;
type RowClickHandler<R> = Box<dyn FnMut(&R, usize)>;

/// A table instance: columns, rows and all presentation state.
pub struct DataTable<R> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    visible: Vec<usize>,
    sort: SortState,
    filters: FilterState,
    selection: SelectionTracker<R>,
    sorting: Computation<SortDelegate>,
    filtering: Computation<FilterDelegate>,
    on_selection_change: Option<SelectionNotifier<R>>,
    on_row_click: Option<RowClickHandler<R>>,
    actions: Vec<RowAction<R>>,
    menu: ActionMenu,
    pagination: Option<Pagination>,
    viewport: Viewport,
    selectable: bool,
    loading: bool,
    empty_message: String,
    loading_message: String,
}

impl<R> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("visible", &self.visible.len())
            .field("sort", &self.sort)
            .field("filters", &self.filters)
            .field("selected", &self.selection.len())
            .field("sorting", &self.sorting)
            .field("filtering", &self.filtering)
            .field("menu", &self.menu)
            .field("pagination", &self.pagination)
            .field("viewport", &self.viewport)
            .field("selectable", &self.selectable)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

/// Builder for [`DataTable`]; obtained from [`DataTable::builder`].
pub struct DataTableBuilder<R> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    sorting: Computation<SortDelegate>,
    filtering: Computation<FilterDelegate>,
    selection: SelectionPolicy<R>,
    on_selection_change: Option<SelectionNotifier<R>>,
    on_row_click: Option<RowClickHandler<R>>,
    actions: Vec<RowAction<R>>,
    pagination: Option<Pagination>,
    viewport: Viewport,
    selectable: bool,
    loading: bool,
    empty_message: String,
    loading_message: String,
}

impl<R: Record> DataTableBuilder<R> {
    #[must_use]
    pub fn rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    /// Delegates sorting to `on_sort`; the table stops reordering rows itself.
    #[must_use]
    pub fn on_sort<F>(mut self, on_sort: F) -> Self
    where
        F: FnMut(&str, SortDirection) + 'static,
    {
        self.sorting = Computation::Delegated(Box::new(on_sort));
        self
    }

    /// Delegates filtering to `on_filter`; the table stops filtering rows itself.
    #[must_use]
    pub fn on_filter<F>(mut self, on_filter: F) -> Self
    where
        F: FnMut(&FilterMap) + 'static,
    {
        self.filtering = Computation::Delegated(Box::new(on_filter));
        self
    }

    #[must_use]
    pub fn on_selection_change<F>(mut self, notify: F) -> Self
    where
        F: FnMut(&[&R]) + 'static,
    {
        self.on_selection_change = Some(Box::new(notify));
        self
    }

    #[must_use]
    pub fn on_row_click<F>(mut self, on_click: F) -> Self
    where
        F: FnMut(&R, usize) + 'static,
    {
        self.on_row_click = Some(Box::new(on_click));
        self
    }

    /// Enables selection checkboxes with the given policy.
    #[must_use]
    pub fn selectable(mut self, policy: SelectionPolicy<R>) -> Self {
        self.selectable = true;
        self.selection = policy;
        self
    }

    #[must_use]
    pub fn actions(mut self, actions: Vec<RowAction<R>>) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    #[must_use]
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    #[must_use]
    pub fn loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    /// Validates the columns and computes the initial visible sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if two columns share a key.
    pub fn build(self) -> Result<DataTable<R>> {
        let mut seen = HashSet::new();
        if let Some(column) = self.columns.iter().find(|c| !seen.insert(c.key.as_str())) {
            return Err(TableError::DuplicateColumn(column.key.clone()));
        }

        let mut table = DataTable {
            columns: self.columns,
            rows: self.rows,
            visible: Vec::new(),
            sort: SortState::neutral(),
            filters: FilterState::default(),
            selection: SelectionTracker::new(self.selection),
            sorting: self.sorting,
            filtering: self.filtering,
            on_selection_change: self.on_selection_change,
            on_row_click: self.on_row_click,
            actions: self.actions,
            menu: ActionMenu::default(),
            pagination: self.pagination,
            viewport: self.viewport,
            selectable: self.selectable,
            loading: self.loading,
            empty_message: self.empty_message,
            loading_message: self.loading_message,
        };
        table.visible = table.compute_visible();

        tracing::debug!(
            columns = table.columns.len(),
            rows = table.rows.len(),
            local_sort = table.sorting.is_local(),
            local_filter = table.filtering.is_local(),
            "table built"
        );
        Ok(table)
    }
}

impl<R: Record> DataTable<R> {
    /// Starts building a table over `columns`.
    #[must_use]
    pub fn builder(columns: Vec<Column<R>>) -> DataTableBuilder<R> {
        DataTableBuilder {
            columns,
            rows: Vec::new(),
            sorting: Computation::Local,
            filtering: Computation::Local,
            selection: SelectionPolicy::Positional,
            on_selection_change: None,
            on_row_click: None,
            actions: Vec::new(),
            pagination: None,
            viewport: Viewport::default(),
            selectable: false,
            loading: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
        }
    }

    // ----- data -----------------------------------------------------------

    /// Replaces the row collection and recomputes the visible sequence.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.recompute();
    }

    /// All rows, in the order supplied.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    #[must_use]
    pub fn loading_message(&self) -> &str {
        &self.loading_message
    }

    #[must_use]
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Columns that get an input in the filter bar.
    pub fn filterable_columns(&self) -> impl Iterator<Item = &Column<R>> {
        self.columns.iter().filter(|c| c.filterable)
    }

    fn column(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    // ----- visible sequence -----------------------------------------------

    /// The visible sequence, in display order.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&R> {
        self.visible.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Number of rows in the visible sequence.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    fn compute_visible(&self) -> Vec<usize> {
        let _span = tracing::debug_span!(
            "compute_visible",
            rows = self.rows.len(),
            filters = self.filters.values().len(),
            sort_key = ?self.sort.key
        )
        .entered();

        let mut indices: Vec<usize> = (0..self.rows.len()).collect();

        if self.filtering.is_local() {
            let row_filter = RowFilter::new(&self.filters, |key| {
                self.columns
                    .iter()
                    .find(|c| c.key == key)
                    .map(|c| &c.filter_kind)
            });
            if !row_filter.is_empty() {
                indices.retain(|&i| row_filter.matches(&self.rows[i]));
            }
        }

        if self.sorting.is_local() {
            if let (Some(key), Some(direction)) = (&self.sort.key, self.sort.direction) {
                sort::sort_indices(&self.rows, &mut indices, key, direction);
            }
        }

        tracing::debug!(visible = indices.len(), "visible sequence computed");
        indices
    }

    /// Re-runs the pipeline and reconciles state that depends on positions.
    fn recompute(&mut self) {
        self.visible = self.compute_visible();
        self.menu.close();

        let visible: Vec<&R> = self.visible.iter().map(|&i| &self.rows[i]).collect();
        if self.selection.reconcile(&visible) {
            tracing::debug!("selection reconciled with new visible sequence");
            self.notify_selection();
        }
    }

    // ----- sorting and filtering ------------------------------------------

    #[must_use]
    pub const fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Advances the sort cycle of column `key`.
    ///
    /// Unknown and non-sortable columns are ignored. Returns `true` if the
    /// sort state changed.
    pub fn apply_sort(&mut self, key: &str) -> bool {
        if !self.column(key).is_some_and(|c| c.sortable) {
            tracing::debug!(key, "ignoring sort on non-sortable column");
            return false;
        }

        let reported = self.sort.cycle(key);
        tracing::debug!(key, state = ?self.sort, "sort cycled");

        match &mut self.sorting {
            Computation::Delegated(on_sort) => {
                on_sort(key, reported);
            }
            Computation::Local => self.recompute(),
        }
        true
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Sets the filter of column `key`; an empty `value` clears it.
    ///
    /// On select columns an option label is stored as the option's value. A
    /// filter delegate receives the full merged map on every call.
    pub fn apply_filter(&mut self, key: &str, value: &str) {
        let resolved = self
            .columns
            .iter()
            .find(|c| c.key == key)
            .map_or(value, |c| c.filter_kind.option_value(value))
            .to_string();
        let value = resolved.as_str();
        let changed = self.filters.merge(key, value);
        tracing::debug!(key, value, changed, "filter applied");

        match &mut self.filtering {
            Computation::Delegated(on_filter) => on_filter(self.filters.values()),
            Computation::Local if changed => self.recompute(),
            Computation::Local => {}
        }
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) {
        let changed = self.filters.clear();
        tracing::debug!(changed, "filters cleared");

        match &mut self.filtering {
            Computation::Delegated(on_filter) => on_filter(self.filters.values()),
            Computation::Local if changed => self.recompute(),
            Computation::Local => {}
        }
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.filters.has_active()
    }

    // ----- selection -------------------------------------------------------

    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Selects every visible row, or clears the selection.
    pub fn select_all(&mut self, checked: bool) {
        let visible: Vec<&R> = self.visible.iter().map(|&i| &self.rows[i]).collect();
        if self.selection.select_all(checked, &visible) {
            self.notify_selection();
        }
    }

    /// Selects or deselects the row at visible `position`.
    pub fn select_row(&mut self, position: usize, checked: bool) {
        let visible: Vec<&R> = self.visible.iter().map(|&i| &self.rows[i]).collect();
        if self.selection.select_row(position, checked, &visible) {
            self.notify_selection();
        }
    }

    #[must_use]
    pub fn is_selected(&self, position: usize) -> bool {
        self.selection.is_selected(position, &self.visible_rows())
    }

    /// `true` iff every visible row is selected and at least one is visible.
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(&self.visible_rows())
    }

    /// The selected rows, looked up in the current visible sequence.
    #[must_use]
    pub fn selected_rows(&self) -> Vec<&R> {
        let visible = self.visible_rows();
        self.selection
            .selected_positions(&visible)
            .into_iter()
            .map(|position| visible[position])
            .collect()
    }

    fn notify_selection(&mut self) {
        let Some(notify) = self.on_selection_change.as_mut() else {
            return;
        };
        let visible: Vec<&R> = self.visible.iter().map(|&i| &self.rows[i]).collect();
        let selected: Vec<&R> = self
            .selection
            .selected_positions(&visible)
            .into_iter()
            .map(|position| visible[position])
            .collect();
        tracing::debug!(selected = selected.len(), "selection changed");
        notify(&selected);
    }

    // ----- row clicks and actions -----------------------------------------

    /// Handles a click on the row at visible `position`.
    ///
    /// While an action menu is open the click only closes it. Returns `true`
    /// if the row click handler ran.
    pub fn click_row(&mut self, position: usize) -> bool {
        if self.menu.close() {
            tracing::debug!(position, "row click closed the open action menu");
            return false;
        }
        let Some(&index) = self.visible.get(position) else {
            return false;
        };
        match self.on_row_click.as_mut() {
            Some(on_click) => {
                on_click(&self.rows[index], position);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn actions(&self) -> &[RowAction<R>] {
        &self.actions
    }

    /// Resolves the actions shown for the row at visible `position`.
    #[must_use]
    pub fn resolve_actions(&self, position: usize) -> Resolved<'_, R> {
        self.visible
            .get(position)
            .map_or(Resolved::None, |&index| resolve(&self.actions, &self.rows[index]))
    }

    #[must_use]
    pub const fn action_menu(&self) -> &ActionMenu {
        &self.menu
    }

    /// Opens or closes the overflow menu of the row at `position`.
    ///
    /// Rows whose actions render inline have no menu. Returns `true` if the
    /// menu state changed.
    pub fn toggle_action_menu(&mut self, position: usize) -> bool {
        if !matches!(self.resolve_actions(position), Resolved::Overflow(_)) {
            return false;
        }
        self.menu.toggle(position);
        true
    }

    /// Closes the open action menu without invoking anything.
    pub fn dismiss_action_menu(&mut self) -> bool {
        self.menu.close()
    }

    /// Invokes the `action`-th visible action of the row at `position` and
    /// closes the action menu. The row click handler is not called.
    ///
    /// Returns `true` if an action ran.
    pub fn invoke_action(&mut self, position: usize, action: usize) -> bool {
        let invoked = match self.resolve_actions(position).actions().get(action) {
            Some(row_action) => {
                if let Some(&index) = self.visible.get(position) {
                    row_action.invoke(&self.rows[index]);
                }
                true
            }
            None => false,
        };
        self.menu.close();
        invoked
    }

    // ----- layout and pagination ------------------------------------------

    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Updates the viewport width. Returns `true` if the render mode flipped.
    pub fn set_viewport_width(&mut self, width: u32) -> bool {
        self.viewport.resize(width)
    }

    #[must_use]
    pub const fn render_mode(&self) -> RenderMode {
        self.viewport.mode()
    }

    #[must_use]
    pub const fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Replaces the pagination descriptor with fresh caller state.
    pub fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = Some(pagination);
    }

    /// Forwards a page change to the pagination collaborator, if any.
    pub fn change_page(&mut self, page: usize) -> bool {
        self.pagination.as_mut().map_or(false, |p| {
            p.change_page(page);
            true
        })
    }

    /// Forwards a page-size change to the pagination collaborator, if any.
    pub fn change_limit(&mut self, limit: usize) -> bool {
        self.pagination.as_mut().map_or(false, |p| {
            p.change_limit(limit);
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn columns() -> Vec<Column<Value>> {
        vec![
            Column::new("id", "ID"),
            Column::new("name", "Name").sortable().filterable(),
            Column::new("city", "City").filterable(),
        ]
    }

    fn rows() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "Bea", "city": "Lyon"}),
            json!({"id": 2, "name": "Al", "city": "Paris"}),
            json!({"id": 3, "name": "Al", "city": "Lille"}),
        ]
    }

    fn ids(table: &DataTable<Value>) -> Vec<i64> {
        table
            .visible_rows()
            .iter()
            .map(|row| row["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_duplicate_column_keys_are_rejected() {
        let result = DataTable::<Value>::builder(vec![
            Column::new("id", "ID"),
            Column::new("id", "Identifier"),
        ])
        .build();
        assert!(matches!(result, Err(TableError::DuplicateColumn(key)) if key == "id"));
    }

    #[test]
    fn test_sort_cycle_restores_input_order() {
        let mut table = DataTable::builder(columns()).rows(rows()).build().unwrap();
        assert!(table.apply_sort("name"));
        assert_eq!(ids(&table), vec![2, 3, 1]);
        table.apply_sort("name");
        assert_eq!(ids(&table), vec![1, 2, 3]);
        assert_eq!(table.sort_state().direction, Some(SortDirection::Descending));
        table.apply_sort("name");
        assert!(table.sort_state().is_neutral());
        assert_eq!(ids(&table), vec![1, 2, 3]);
        table.apply_sort("name");
        assert_eq!(ids(&table), vec![2, 3, 1]);
    }

    #[test]
    fn test_non_sortable_column_is_ignored() {
        let mut table = DataTable::builder(columns()).rows(rows()).build().unwrap();
        assert!(!table.apply_sort("city"));
        assert!(!table.apply_sort("nope"));
        assert!(table.sort_state().is_neutral());
    }

    #[test]
    fn test_delegated_sort_reports_and_does_not_reorder() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut table = DataTable::builder(columns())
            .rows(rows())
            .on_sort(move |key, direction| sink.borrow_mut().push((key.to_string(), direction)))
            .build()
            .unwrap();

        table.apply_sort("name");
        assert_eq!(ids(&table), vec![1, 2, 3]);
        table.apply_sort("name");
        table.apply_sort("name");

        assert_eq!(
            *calls.borrow(),
            vec![
                ("name".to_string(), SortDirection::Ascending),
                ("name".to_string(), SortDirection::Descending),
                ("name".to_string(), SortDirection::Ascending),
            ]
        );
        assert!(table.sort_state().is_neutral());
    }

    #[test]
    fn test_filter_then_sort() {
        let mut table = DataTable::builder(columns()).rows(rows()).build().unwrap();
        table.apply_sort("name");
        table.apply_filter("city", "L");
        assert_eq!(ids(&table), vec![3, 1]);
        table.apply_filter("name", "al");
        assert_eq!(ids(&table), vec![3]);
        table.apply_filter("city", "");
        assert_eq!(ids(&table), vec![2, 3]);
        assert!(table.has_active_filters());
        table.clear_filters();
        assert!(!table.has_active_filters());
        assert_eq!(ids(&table), vec![2, 3, 1]);
    }

    #[test]
    fn test_select_filter_accepts_option_labels() {
        let mut columns = columns();
        columns.push(Column::new("status", "Status").filter_kind(FilterKind::Select {
            options: vec![SelectOption::new("Paid invoices", "paid"), SelectOption::new("Due", "due")],
        }));
        let rows = vec![
            json!({"id": 1, "status": "paid"}),
            json!({"id": 2, "status": "due"}),
            json!({"id": 3, "status": "paid"}),
        ];
        let mut table = DataTable::builder(columns).rows(rows).build().unwrap();

        table.apply_filter("status", "Paid invoices");
        assert_eq!(table.filters().get("status"), Some("paid"));
        assert_eq!(ids(&table), vec![1, 3]);
        table.apply_filter("status", "due");
        assert_eq!(ids(&table), vec![2]);
    }

    #[test]
    fn test_delegated_filter_forwards_merged_map() {
        let maps = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&maps);
        let mut table = DataTable::builder(columns())
            .rows(rows())
            .on_filter(move |filters| sink.borrow_mut().push(filters.clone()))
            .build()
            .unwrap();

        table.apply_filter("name", "al");
        table.apply_filter("city", "p");
        table.apply_filter("name", "");
        table.clear_filters();

        assert_eq!(ids(&table), vec![1, 2, 3]);
        let maps = maps.borrow();
        assert_eq!(maps.len(), 4);
        assert_eq!(maps[1].len(), 2);
        assert_eq!(maps[2].get("city").map(String::as_str), Some("p"));
        assert!(!maps[2].contains_key("name"));
        assert!(maps[3].is_empty());
    }

    #[test]
    fn test_selection_notifies_materialized_rows() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut table = DataTable::builder(columns())
            .rows(rows())
            .selectable(SelectionPolicy::Positional)
            .on_selection_change(move |rows: &[&Value]| {
                sink.borrow_mut()
                    .push(rows.iter().map(|r| r["id"].as_i64().unwrap()).collect::<Vec<_>>());
            })
            .build()
            .unwrap();

        table.select_row(2, true);
        table.select_row(0, true);
        table.select_row(0, true);
        table.select_all(true);
        table.select_all(false);

        assert_eq!(
            *seen.borrow(),
            vec![vec![3], vec![1, 3], vec![1, 2, 3], vec![]]
        );
    }

    #[test]
    fn test_positional_selection_cleared_on_sort() {
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let mut table = DataTable::builder(columns())
            .rows(rows())
            .selectable(SelectionPolicy::Positional)
            .on_selection_change(move |_: &[&Value]| *sink.borrow_mut() += 1)
            .build()
            .unwrap();

        table.select_row(0, true);
        table.apply_sort("name");
        assert!(table.selected_rows().is_empty());
        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn test_identity_selection_survives_sort() {
        let mut table = DataTable::builder(columns())
            .rows(rows())
            .selectable(SelectionPolicy::by_field("id"))
            .build()
            .unwrap();

        table.select_row(0, true);
        table.apply_sort("name");
        let selected: Vec<i64> = table
            .selected_rows()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(selected, vec![1]);
        assert!(table.is_selected(2));
    }

    #[test]
    fn test_is_all_selected_requires_rows() {
        let mut table = DataTable::builder(columns()).build().unwrap();
        table.select_all(true);
        assert!(!table.is_all_selected());

        table.set_rows(rows());
        table.select_all(true);
        assert!(table.is_all_selected());
        table.apply_filter("city", "zzz");
        assert!(!table.is_all_selected());
    }

    #[test]
    fn test_row_click_and_action_click_are_exclusive() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let invoked = Rc::new(RefCell::new(Vec::new()));
        let (click_sink, action_sink) = (Rc::clone(&clicks), Rc::clone(&invoked));

        let mut table = DataTable::builder(columns())
            .rows(rows())
            .on_row_click(move |row: &Value, position| {
                click_sink.borrow_mut().push((row["id"].as_i64().unwrap(), position));
            })
            .actions(vec![
                RowAction::new("View", move |row: &Value| {
                    action_sink.borrow_mut().push(row["id"].as_i64().unwrap());
                }),
                RowAction::new("Edit", |_| {}),
                RowAction::new("Delete", |_| {}).variant(Variant::Danger),
            ])
            .build()
            .unwrap();

        assert!(table.click_row(1));
        assert!(table.toggle_action_menu(2));
        assert!(table.action_menu().is_open(2));
        assert!(table.invoke_action(2, 0));
        assert!(table.action_menu().open_row().is_none());

        table.toggle_action_menu(0);
        assert!(!table.click_row(0));
        assert!(table.action_menu().open_row().is_none());

        assert_eq!(*clicks.borrow(), vec![(2, 1)]);
        assert_eq!(*invoked.borrow(), vec![3]);
    }

    #[test]
    fn test_inline_rows_have_no_menu() {
        let mut table = DataTable::builder(columns())
            .rows(rows())
            .actions(vec![RowAction::new("View", |_| {})])
            .build()
            .unwrap();
        assert!(matches!(table.resolve_actions(0), Resolved::Inline(_)));
        assert!(!table.toggle_action_menu(0));
        assert!(matches!(table.resolve_actions(9), Resolved::None));
    }

    #[test]
    fn test_resize_keeps_pipeline_state() {
        let mut table = DataTable::builder(columns())
            .rows(rows())
            .selectable(SelectionPolicy::Positional)
            .build()
            .unwrap();
        table.apply_sort("name");
        table.select_row(0, true);

        assert!(table.set_viewport_width(500));
        assert_eq!(table.render_mode(), RenderMode::Compact);
        assert_eq!(ids(&table), vec![2, 3, 1]);
        assert!(table.is_selected(0));
    }

    #[test]
    fn test_pagination_is_forwarded() {
        let pages = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pages);
        let mut table = DataTable::builder(columns()).rows(rows()).build().unwrap();
        assert!(!table.change_page(2));

        table.set_pagination(Pagination::new(1, 10, 30, move |p| sink.borrow_mut().push(p), |_| {}));
        assert!(table.change_page(2));
        assert!(table.change_limit(25));
        assert_eq!(*pages.borrow(), vec![2]);
        assert_eq!(table.pagination().map(|p| p.page), Some(1));
    }
}

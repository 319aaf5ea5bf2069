//! View model types representing renderable table state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry display-ready strings and flags only; every
//! decision (sort indicator, action presentation, loading or empty body) has
//! already been made.
//!
//! # Example
//!
//! ```rust
//! use datatable::table::{Align, RenderMode};
//! use datatable::ui::viewmodel::{Body, HeaderCell, SortIndicator, TableViewModel};
//!
//! let vm = TableViewModel {
//!     mode: RenderMode::Tabular,
//!     headers: vec![HeaderCell {
//!         key: "name".to_string(),
//!         label: "Name".to_string(),
//!         indicator: Some(SortIndicator::Unsorted),
//!         align: Align::Left,
//!         width: None,
//!     }],
//!     filters: vec![],
//!     has_active_filters: false,
//!     selection: None,
//!     body: Body::Empty("No data available".to_string()),
//!     pagination: None,
//! };
//! assert!(vm.rows().is_empty());
//! ```

use crate::table::{Align, RenderMode, SortDirection, Variant};

/// Complete view model for one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableViewModel {
    /// Layout to render.
    pub mode: RenderMode,
    /// One entry per column, in column order.
    pub headers: Vec<HeaderCell>,
    /// One entry per filterable column.
    pub filters: Vec<FilterField>,
    pub has_active_filters: bool,
    /// Present when the table shows selection checkboxes.
    pub selection: Option<SelectionSummary>,
    pub body: Body,
    pub pagination: Option<PaginationInfo>,
}

impl TableViewModel {
    /// Rows to render; empty for the loading and empty states.
    #[must_use]
    pub fn rows(&self) -> &[RowView] {
        match &self.body {
            Body::Rows(rows) => rows,
            Body::Loading(_) | Body::Empty(_) => &[],
        }
    }
}

/// Sort glyph shown next to a sortable column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Unsorted => "⇅",
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

impl From<Option<SortDirection>> for SortIndicator {
    fn from(direction: Option<SortDirection>) -> Self {
        match direction {
            None => Self::Unsorted,
            Some(SortDirection::Ascending) => Self::Ascending,
            Some(SortDirection::Descending) => Self::Descending,
        }
    }
}

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    /// `None` for non-sortable columns.
    pub indicator: Option<SortIndicator>,
    pub align: Align,
    /// Fixed width in character cells, if configured.
    pub width: Option<usize>,
}

/// One input of the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    pub key: String,
    pub label: String,
    /// Current filter value; empty when inactive.
    pub value: String,
    /// Choice labels for select filters; empty for free-text inputs.
    pub options: Vec<String>,
}

/// Header checkbox state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    pub all_selected: bool,
    pub selected: usize,
}

/// What the table body shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Rows are loading; carries the loading message.
    Loading(String),
    /// Nothing is visible; carries the empty message.
    Empty(String),
    /// The visible sequence, in display order.
    Rows(Vec<RowView>),
}

/// One visible row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Position in the visible sequence.
    pub position: usize,
    /// Formatted cells, in column order.
    pub cells: Vec<String>,
    pub selected: bool,
    pub actions: ActionsView,
}

/// One action button or menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub label: String,
    pub icon: Option<String>,
    pub variant: Variant,
}

/// Action presentation for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionsView {
    None,
    Inline(Vec<ActionButton>),
    /// A single trigger; `items` are listed only while `open`.
    Menu { open: bool, items: Vec<ActionButton> },
}

/// Pagination bar contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: usize,
    pub total_pages: usize,
    pub limit: usize,
    pub total: usize,
    /// 1-based first and last item on this page.
    pub range: Option<(usize, usize)>,
    pub has_previous: bool,
    pub has_next: bool,
    pub page_sizes: Vec<usize>,
}

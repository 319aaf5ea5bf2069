//! Application state and view model computation.
//!
//! [`AppState`] wires a [`DataTable`] over JSON rows to the app layer: every
//! delegate and notification callback pushes an [`Action`] into the shared
//! [`Outbox`], which the event handler drains after each event. View models
//! are computed on demand from the table's current state.
//!
//! # Example
//!
//! ```rust
//! use datatable::app::AppState;
//! use datatable::{Config, Theme};
//! use serde_json::json;
//!
//! let rows = vec![json!({"id": 1, "name": "Bea"}), json!({"id": 2, "name": "Al"})];
//! let state = AppState::new(&Config::default(), Theme::default(), rows)?;
//! let viewmodel = state.compute_viewmodel();
//! assert_eq!(viewmodel.rows().len(), 2);
//! # Ok::<(), datatable::TableError>(())
//! ```

use super::actions::{Action, Outbox};
use crate::config::Config;
use crate::domain::Result;
use crate::table::{
    Column, DataTable, FilterKind, Pagination, Resolved, RowAction, SelectionPolicy, Viewport,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ActionButton, ActionsView, Body, FilterField, HeaderCell, PaginationInfo, RowView,
    SelectionSummary, SortIndicator, TableViewModel,
};
use serde_json::Value;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// The table engine over JSON rows.
    pub table: DataTable<Value>,

    /// Color scheme for rendering.
    pub theme: Theme,

    /// Choices offered by the page-size selector.
    pub page_sizes: Vec<usize>,

    outbox: Outbox,
}

impl AppState {
    /// Builds the table described by `config` over `rows`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TableError::DuplicateColumn`] if two configured
    /// columns share a key.
    pub fn new(config: &Config, theme: Theme, rows: Vec<Value>) -> Result<Self> {
        let outbox = Outbox::default();
        let columns: Vec<Column<Value>> = config.columns_for(&rows);

        let actions = config
            .actions
            .iter()
            .map(|action_config| {
                let sink = outbox.clone();
                let label = action_config.label.clone();
                let visibility = action_config.clone();
                let mut action = RowAction::new(action_config.label.clone(), move |row: &Value| {
                    sink.push(Action::ActionInvoked {
                        label: label.clone(),
                        row: row.clone(),
                    });
                })
                .variant(action_config.variant);
                if let Some(icon) = &action_config.icon {
                    action = action.icon(icon.clone());
                }
                if visibility.show_if.is_some() || visibility.hide_if.is_some() {
                    action = action.show_when(move |row: &Value| visibility.is_visible_for(row));
                }
                action
            })
            .collect();

        let mut builder = DataTable::builder(columns)
            .rows(rows)
            .actions(actions)
            .viewport(Viewport::new(config.width, config.breakpoint))
            .empty_message(config.empty_message.clone())
            .loading_message(config.loading_message.clone());

        let sink = outbox.clone();
        builder = builder.on_row_click(move |row: &Value, position| {
            sink.push(Action::RowClicked {
                position,
                row: row.clone(),
            });
        });

        if config.is_selectable() {
            let policy = config
                .select_by
                .as_ref()
                .map_or(SelectionPolicy::Positional, |key| SelectionPolicy::by_field(key.clone()));
            let sink = outbox.clone();
            builder = builder
                .selectable(policy)
                .on_selection_change(move |rows: &[&Value]| {
                    sink.push(Action::SelectionChanged(
                        rows.iter().map(|&row| row.clone()).collect(),
                    ));
                });
        }

        if config.delegate_sort {
            let sink = outbox.clone();
            builder = builder.on_sort(move |key, direction| {
                sink.push(Action::SortRequested {
                    key: key.to_string(),
                    direction,
                });
            });
        }

        if config.delegate_filter {
            let sink = outbox.clone();
            builder = builder.on_filter(move |filters| {
                sink.push(Action::FilterRequested(filters.clone()));
            });
        }

        let table = builder.build()?;
        tracing::debug!(
            theme = %theme.name,
            actions = config.actions.len(),
            selectable = config.is_selectable(),
            "app state initialized"
        );

        Ok(Self {
            table,
            theme,
            page_sizes: config.page_sizes.clone(),
            outbox,
        })
    }

    /// Installs fresh pagination state supplied by the host.
    ///
    /// Page and page-size changes are reported as
    /// [`Action::PageRequested`] and [`Action::LimitRequested`].
    pub fn set_pagination(&mut self, page: usize, limit: usize, total: usize) {
        let (pages, limits) = (self.outbox.clone(), self.outbox.clone());
        self.table.set_pagination(Pagination::new(
            page,
            limit,
            total,
            move |page| pages.push(Action::PageRequested(page)),
            move |limit| limits.push(Action::LimitRequested(limit)),
        ));
    }

    /// Takes the actions queued by table callbacks since the last call.
    #[must_use]
    pub fn drain_actions(&self) -> Vec<Action> {
        self.outbox.drain()
    }

    /// Computes the view model for the current table state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> TableViewModel {
        let _span = tracing::debug_span!("compute_viewmodel", visible = self.table.visible_len()).entered();
        let table = &self.table;

        TableViewModel {
            mode: table.render_mode(),
            headers: self.compute_headers(),
            filters: self.compute_filters(),
            has_active_filters: table.has_active_filters(),
            selection: table.is_selectable().then(|| SelectionSummary {
                all_selected: table.is_all_selected(),
                selected: table.selected_rows().len(),
            }),
            body: self.compute_body(),
            pagination: self.compute_pagination(),
        }
    }

    fn compute_headers(&self) -> Vec<HeaderCell> {
        let sort = self.table.sort_state();
        self.table
            .columns()
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                label: column.label.clone(),
                indicator: column
                    .sortable
                    .then(|| SortIndicator::from(sort.direction_for(&column.key))),
                align: column.align,
                width: column.width,
            })
            .collect()
    }

    fn compute_filters(&self) -> Vec<FilterField> {
        let filters = self.table.filters();
        self.table
            .filterable_columns()
            .map(|column| FilterField {
                key: column.key.clone(),
                label: column.label.clone(),
                value: filters
                    .get(&column.key)
                    .map(|value| column.filter_kind.option_label(value).to_string())
                    .unwrap_or_default(),
                options: match &column.filter_kind {
                    FilterKind::Select { options } => {
                        options.iter().map(|o| o.label.clone()).collect()
                    }
                    _ => Vec::new(),
                },
            })
            .collect()
    }

    fn compute_body(&self) -> Body {
        let table = &self.table;
        if table.is_loading() {
            return Body::Loading(table.loading_message().to_string());
        }

        let visible = table.visible_rows();
        if visible.is_empty() {
            return Body::Empty(table.empty_message().to_string());
        }

        let rows = visible
            .iter()
            .enumerate()
            .map(|(position, row)| RowView {
                position,
                cells: table
                    .columns()
                    .iter()
                    .map(|column| column.render_cell(*row, position))
                    .collect(),
                selected: table.is_selectable() && table.is_selected(position),
                actions: self.compute_actions(position),
            })
            .collect();
        Body::Rows(rows)
    }

    fn compute_actions(&self, position: usize) -> ActionsView {
        let buttons = |resolved: &Resolved<'_, Value>| -> Vec<ActionButton> {
            resolved
                .actions()
                .iter()
                .map(|action| ActionButton {
                    label: action.label.clone(),
                    icon: action.icon.clone(),
                    variant: action.variant,
                })
                .collect()
        };

        let resolved = self.table.resolve_actions(position);
        match &resolved {
            Resolved::None => ActionsView::None,
            Resolved::Inline(_) => ActionsView::Inline(buttons(&resolved)),
            Resolved::Overflow(_) => ActionsView::Menu {
                open: self.table.action_menu().is_open(position),
                items: buttons(&resolved),
            },
        }
    }

    fn compute_pagination(&self) -> Option<PaginationInfo> {
        self.table.pagination().map(|p| PaginationInfo {
            page: p.page,
            total_pages: p.total_pages(),
            limit: p.limit,
            total: p.total,
            range: p.range(),
            has_previous: p.has_previous(),
            has_next: p.has_next(),
            page_sizes: self.page_sizes.clone(),
        })
    }
}

//! Composable UI component renderers.
//!
//! Each component appends its lines to an output buffer.
//!
//! # Components
//!
//! - [`filters`]: Filter bar
//! - [`table`]: Header line and row lines of the tabular layout
//! - [`cards`]: Sort bar and stacked cards of the compact layout
//! - [`actions`]: Action buttons and overflow menus
//! - [`pagination`]: Pagination bar
//! - [`empty`]: Empty and loading messages
//!
//! # Layout Modes
//!
//! - [`render_tabular_mode`]: Filters + Border + Headers + Rows + Border + Pagination
//! - [`render_compact_mode`]: Filters + Sort bar + Cards + Border + Pagination

pub mod actions;
pub mod cards;
pub mod empty;
pub mod filters;
pub mod pagination;
pub mod table;

use crate::ui::helpers::rule;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, TableViewModel};

/// Narrowest width used for rules and centered messages.
const MIN_WIDTH: usize = 40;

fn render_body_state(out: &mut String, body: &Body, theme: &Theme, width: usize) -> bool {
    match body {
        Body::Loading(message) => {
            empty::render_loading_state(out, message, theme, width);
            true
        }
        Body::Empty(message) => {
            empty::render_empty_state(out, message, theme, width);
            true
        }
        Body::Rows(_) => false,
    }
}

fn render_footer(out: &mut String, vm: &TableViewModel, theme: &Theme, width: usize) {
    out.push_str(&rule(width, theme));
    out.push('\n');
    if let Some(info) = &vm.pagination {
        pagination::render_pagination(out, info, theme);
    }
}

/// Renders the tabular layout.
///
/// ```text
/// [Filter bar]
/// [Border]
/// [Headers]
/// [Rows | loading | empty message]
/// [Border]
/// [Pagination]
/// ```
pub fn render_tabular_mode(out: &mut String, vm: &TableViewModel, theme: &Theme) {
    let layout = table::compute_layout(vm);
    let width = layout.total_width().max(MIN_WIDTH);

    filters::render_filter_bar(out, &vm.filters, vm.has_active_filters, theme);
    out.push_str(&rule(width, theme));
    out.push('\n');
    table::render_table_headers(out, vm, &layout, theme);

    if !render_body_state(out, &vm.body, theme, width) {
        table::render_table_rows(out, vm, &layout, theme);
    }

    render_footer(out, vm, theme, width);
}

/// Renders the compact layout.
///
/// ```text
/// [Filter bar]
/// [Sort bar]
/// [Border + Card]*  | loading | empty message
/// [Border]
/// [Pagination]
/// ```
pub fn render_compact_mode(out: &mut String, vm: &TableViewModel, theme: &Theme) {
    let width = MIN_WIDTH;

    filters::render_filter_bar(out, &vm.filters, vm.has_active_filters, theme);
    cards::render_sort_bar(out, &vm.headers, theme);

    if !render_body_state(out, &vm.body, theme, width) {
        cards::render_cards(out, vm, width, theme);
    }

    render_footer(out, vm, theme, width);
}

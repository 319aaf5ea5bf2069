//! Compact layout renderer.
//!
//! Each visible row becomes a stacked card of `label  value` lines. Sortable
//! columns are offered on a separate sort bar since there is no header row.

use super::actions::{paint_action_cell, render_menu_items};
use crate::ui::helpers::{align, display_width, paint};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ActionsView, HeaderCell, RowView, TableViewModel};
use crate::table::Align;

/// Appends the sort bar; nothing when no column is sortable.
pub fn render_sort_bar(out: &mut String, headers: &[HeaderCell], theme: &Theme) {
    let entries: Vec<String> = headers
        .iter()
        .filter_map(|header| {
            header.indicator.map(|indicator| {
                format!(
                    "{} {}",
                    paint(&header.label, &theme.colors.header_fg),
                    paint(indicator.glyph(), &theme.colors.sort_indicator_fg)
                )
            })
        })
        .collect();
    if entries.is_empty() {
        return;
    }
    out.push_str(&paint("Sort", &theme.colors.text_dim));
    out.push(' ');
    out.push_str(&entries.join("  "));
    out.push('\n');
}

/// Appends one card per row, separated by rules of `width` cells.
pub fn render_cards(out: &mut String, vm: &TableViewModel, width: usize, theme: &Theme) {
    let label_width = vm
        .headers
        .iter()
        .map(|h| display_width(&h.label))
        .max()
        .unwrap_or(0);

    for row in vm.rows() {
        out.push_str(&paint(&"─".repeat(width), &theme.colors.border));
        out.push('\n');
        render_card(out, row, vm, label_width, theme);
    }
}

fn render_card(out: &mut String, row: &RowView, vm: &TableViewModel, label_width: usize, theme: &Theme) {
    let (value_fg, value_bg) = if row.selected {
        (theme.colors.selection_fg.as_str(), Some(theme.colors.selection_bg.as_str()))
    } else {
        (theme.colors.text_normal.as_str(), None)
    };

    if vm.selection.is_some() {
        let checkbox = if row.selected { "[x]" } else { "[ ]" };
        out.push_str(&paint(&format!("{checkbox} #{}", row.position + 1), value_fg));
        out.push('\n');
    }

    for (header, cell) in vm.headers.iter().zip(&row.cells) {
        out.push_str(&paint(&align(&header.label, label_width, Align::Left), &theme.colors.text_dim));
        out.push_str("  ");
        if let Some(bg) = value_bg {
            out.push_str(&Theme::bg(bg));
        }
        out.push_str(&paint(cell, value_fg));
        out.push('\n');
    }

    if row.actions != ActionsView::None {
        out.push_str(paint_action_cell(&row.actions, 0, theme).trim_end());
        out.push('\n');
        if let ActionsView::Menu { open: true, items } = &row.actions {
            render_menu_items(out, items, 1, theme);
        }
    }
}

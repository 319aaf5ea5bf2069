//! Tabular layout renderer.
//!
//! Renders one header line and one line per visible row. Column widths come
//! from the column's fixed width or, failing that, from the widest of its
//! header and cells (capped at [`MAX_AUTO_WIDTH`]).

use super::actions::{action_cell, paint_action_cell, render_menu_items};
use crate::table::Align;
use crate::ui::helpers::{align, display_width, paint, truncate, MAX_AUTO_WIDTH};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ActionsView, HeaderCell, RowView, SelectionSummary, TableViewModel};

const GAP: &str = "  ";
const ACTIONS_LABEL: &str = "Actions";

/// Column widths for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// Width of each data column, in column order.
    pub widths: Vec<usize>,
    /// Width of the actions column; 0 when no row has actions.
    pub actions_width: usize,
    pub selectable: bool,
}

impl TableLayout {
    /// Total cells taken by one line.
    #[must_use]
    pub fn total_width(&self) -> usize {
        let mut parts: Vec<usize> = self.widths.clone();
        if self.selectable {
            parts.insert(0, 3);
        }
        if self.actions_width > 0 {
            parts.push(self.actions_width);
        }
        let gaps = parts.len().saturating_sub(1) * GAP.len();
        parts.iter().sum::<usize>() + gaps
    }

    /// Offset of the actions column from the start of the line.
    fn actions_offset(&self) -> usize {
        self.total_width().saturating_sub(self.actions_width)
    }
}

fn header_text(header: &HeaderCell) -> String {
    match header.indicator {
        Some(indicator) => format!("{} {}", header.label, indicator.glyph()),
        None => header.label.clone(),
    }
}

/// Measures the view model.
#[must_use]
pub fn compute_layout(vm: &TableViewModel) -> TableLayout {
    let rows = vm.rows();
    let widths = vm
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            header.width.unwrap_or_else(|| {
                rows.iter()
                    .map(|row| row.cells.get(i).map_or(0, |cell| display_width(cell)))
                    .chain(std::iter::once(display_width(&header_text(header))))
                    .max()
                    .unwrap_or(0)
                    .min(MAX_AUTO_WIDTH)
            })
        })
        .collect();

    let actions_width = rows
        .iter()
        .filter(|row| row.actions != ActionsView::None)
        .map(|row| display_width(&action_cell(&row.actions)))
        .max()
        .map_or(0, |widest| widest.max(ACTIONS_LABEL.len()));

    TableLayout {
        widths,
        actions_width,
        selectable: vm.selection.is_some(),
    }
}

fn header_checkbox(selection: SelectionSummary) -> &'static str {
    if selection.all_selected {
        "[x]"
    } else if selection.selected > 0 {
        "[-]"
    } else {
        "[ ]"
    }
}

/// One header cell of exactly `width` cells. Truncation cuts the label, never
/// the sort indicator.
fn header_cell(header: &HeaderCell, width: usize, theme: &Theme) -> String {
    let Some(indicator) = header.indicator else {
        return align(&header.label, width, header.align);
    };
    let glyph = indicator.glyph();
    let reserved = display_width(glyph) + 1;
    let plain = if width > reserved {
        format!("{} {glyph}", truncate(&header.label, width - reserved))
    } else {
        glyph.to_string()
    };
    let text = align(&plain, width, header.align);
    match text.rfind(glyph) {
        Some(at) => format!(
            "{}{}{}{}",
            &text[..at],
            paint(glyph, &theme.colors.sort_indicator_fg),
            Theme::fg(&theme.colors.header_fg),
            &text[at + glyph.len()..]
        ),
        None => text,
    }
}

/// Appends the header line.
pub fn render_table_headers(out: &mut String, vm: &TableViewModel, layout: &TableLayout, theme: &Theme) {
    let mut cells = Vec::new();
    if let Some(selection) = vm.selection {
        cells.push(header_checkbox(selection).to_string());
    }
    for (header, &width) in vm.headers.iter().zip(&layout.widths) {
        cells.push(header_cell(header, width, theme));
    }
    if layout.actions_width > 0 {
        cells.push(align(ACTIONS_LABEL, layout.actions_width, Align::Left));
    }

    out.push_str(Theme::bold());
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(cells.join(GAP).trim_end());
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends every row line, followed by the items of an open action menu.
pub fn render_table_rows(out: &mut String, vm: &TableViewModel, layout: &TableLayout, theme: &Theme) {
    for row in vm.rows() {
        render_table_row(out, row, &vm.headers, layout, theme);
        if let ActionsView::Menu { open: true, items } = &row.actions {
            render_menu_items(out, items, layout.actions_offset(), theme);
        }
    }
}

/// Selected rows are drawn in selection colors across the full line, with
/// action buttons left unstyled so the background stays intact.
fn render_table_row(out: &mut String, row: &RowView, headers: &[HeaderCell], layout: &TableLayout, theme: &Theme) {
    let mut cells = Vec::new();
    if layout.selectable {
        cells.push(if row.selected { "[x]" } else { "[ ]" }.to_string());
    }
    for (cell, (header, &width)) in row.cells.iter().zip(headers.iter().zip(&layout.widths)) {
        cells.push(align(cell, width, header.align));
    }

    if row.selected {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    }

    if layout.actions_width > 0 {
        let actions = if row.selected {
            align(&action_cell(&row.actions), layout.actions_width, Align::Left)
        } else {
            paint_action_cell(&row.actions, layout.actions_width, theme)
        };
        cells.push(actions);
    }

    let line = cells.join(GAP);
    out.push_str(if row.selected { line.as_str() } else { line.trim_end() });
    out.push_str(Theme::reset());
    out.push('\n');
}

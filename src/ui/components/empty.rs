//! Empty and loading state renderer.
//!
//! Shown in place of the table body when nothing is visible or while rows are
//! loading. Both layouts use it.

use crate::ui::helpers::{center, paint};
use crate::ui::theme::Theme;

/// Appends `message`, centered in `width` cells, framed by blank lines.
pub fn render_message(out: &mut String, message: &str, color: &str, width: usize) {
    out.push('\n');
    out.push_str(&paint(center(message, width).trim_end(), color));
    out.push('\n');
    out.push('\n');
}

/// Appends the empty state.
pub fn render_empty_state(out: &mut String, message: &str, theme: &Theme, width: usize) {
    render_message(out, message, &theme.colors.empty_state_fg, width);
}

/// Appends the loading indicator.
pub fn render_loading_state(out: &mut String, message: &str, theme: &Theme, width: usize) {
    let text = format!("◌ {message}");
    render_message(out, &text, &theme.colors.loading_fg, width);
}

//! Row action buttons and overflow menus.

use crate::ui::helpers::{display_width, paint};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ActionButton, ActionsView};

/// Glyph of the overflow-menu trigger.
pub const MENU_TRIGGER: &str = "[⋯]";

fn button_text(button: &ActionButton) -> String {
    match &button.icon {
        Some(icon) => format!("[{icon} {}]", button.label),
        None => format!("[{}]", button.label),
    }
}

/// Plain text of a row's action cell.
#[must_use]
pub fn action_cell(actions: &ActionsView) -> String {
    match actions {
        ActionsView::None => String::new(),
        ActionsView::Inline(buttons) => buttons.iter().map(button_text).collect::<Vec<_>>().join(" "),
        ActionsView::Menu { .. } => MENU_TRIGGER.to_string(),
    }
}

/// Styled action cell padded to `width` cells.
#[must_use]
pub fn paint_action_cell(actions: &ActionsView, width: usize, theme: &Theme) -> String {
    let plain = action_cell(actions);
    let padding = " ".repeat(width.saturating_sub(display_width(&plain)));
    let styled = match actions {
        ActionsView::None => String::new(),
        ActionsView::Inline(buttons) => buttons
            .iter()
            .map(|b| paint(&button_text(b), theme.colors.action_fg(b.variant)))
            .collect::<Vec<_>>()
            .join(" "),
        ActionsView::Menu { open, .. } => {
            let color = if *open { &theme.colors.header_fg } else { &theme.colors.text_dim };
            paint(MENU_TRIGGER, color)
        }
    };
    format!("{styled}{padding}")
}

/// Appends the items of an open menu, one per line, indented by `indent`.
pub fn render_menu_items(out: &mut String, items: &[ActionButton], indent: usize, theme: &Theme) {
    let last = items.len().saturating_sub(1);
    for (i, item) in items.iter().enumerate() {
        let branch = if i == last { "└" } else { "├" };
        let label = match &item.icon {
            Some(icon) => format!("{icon} {}", item.label),
            None => item.label.clone(),
        };
        out.push_str(&" ".repeat(indent));
        out.push_str(&paint(branch, &theme.colors.border));
        out.push(' ');
        out.push_str(&format!("{i}:"));
        out.push(' ');
        out.push_str(&paint(&label, theme.colors.action_fg(item.variant)));
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Variant;
    use crate::ui::helpers::strip_ansi;

    fn button(label: &str) -> ActionButton {
        ActionButton {
            label: label.to_string(),
            icon: None,
            variant: Variant::Primary,
        }
    }

    #[test]
    fn test_action_cells() {
        assert_eq!(action_cell(&ActionsView::None), "");
        let inline = ActionsView::Inline(vec![
            button("View"),
            ActionButton {
                icon: Some("✎".to_string()),
                ..button("Edit")
            },
        ]);
        assert_eq!(action_cell(&inline), "[View] [✎ Edit]");
        let menu = ActionsView::Menu {
            open: false,
            items: vec![button("View")],
        };
        assert_eq!(action_cell(&menu), "[⋯]");
        assert_eq!(strip_ansi(&paint_action_cell(&menu, 5, &Theme::default())), "[⋯]  ");
    }

    #[test]
    fn test_menu_items_are_numbered() {
        let mut out = String::new();
        render_menu_items(&mut out, &[button("View"), button("Delete")], 2, &Theme::default());
        assert_eq!(strip_ansi(&out), "  ├ 0: View\n  └ 1: Delete\n");
    }
}

//! Per-row action buttons and the overflow menu.
//!
//! A table is configured with a static list of [`RowAction`]s. For each row the
//! resolver keeps the actions whose visibility predicate accepts the row and
//! picks a presentation: nothing, up to [`INLINE_LIMIT`] inline buttons, or a
//! single trigger opening an overflow menu.
//!
//! [`ActionMenu`] tracks which row's overflow menu is open. At most one menu is
//! open per table; invoking an item or clicking outside closes it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number of visible actions rendered as inline buttons.
pub const INLINE_LIMIT: usize = 2;

/// Visual style of an action button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Success,
}

type ClickFn<R> = dyn Fn(&R);
type ShowFn<R> = dyn Fn(&R) -> bool;

/// One configured row action.
pub struct RowAction<R> {
    pub label: String,
    pub icon: Option<String>,
    pub variant: Variant,
    on_click: Box<ClickFn<R>>,
    show: Option<Box<ShowFn<R>>>,
}

impl<R> fmt::Debug for RowAction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("variant", &self.variant)
            .field("conditional", &self.show.is_some())
            .finish_non_exhaustive()
    }
}

impl<R> RowAction<R> {
    /// Creates an always-visible primary action.
    pub fn new<F>(label: impl Into<String>, on_click: F) -> Self
    where
        F: Fn(&R) + 'static,
    {
        Self {
            label: label.into(),
            icon: None,
            variant: Variant::Primary,
            on_click: Box::new(on_click),
            show: None,
        }
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Restricts the action to rows accepted by `show`.
    #[must_use]
    pub fn show_when<F>(mut self, show: F) -> Self
    where
        F: Fn(&R) -> bool + 'static,
    {
        self.show = Some(Box::new(show));
        self
    }

    /// Returns `true` if the action applies to `row`.
    pub fn is_visible(&self, row: &R) -> bool {
        self.show.as_ref().map_or(true, |show| show(row))
    }

    /// Runs the action for `row`.
    pub fn invoke(&self, row: &R) {
        tracing::debug!(action = %self.label, "invoking row action");
        (self.on_click)(row);
    }
}

/// Presentation chosen for one row's actions.
#[derive(Debug)]
pub enum Resolved<'a, R> {
    /// No visible action: render nothing.
    None,
    /// Render each action as an inline button.
    Inline(Vec<&'a RowAction<R>>),
    /// Render a single trigger opening a menu of these actions.
    Overflow(Vec<&'a RowAction<R>>),
}

impl<'a, R> Resolved<'a, R> {
    /// The visible actions, whatever the presentation.
    #[must_use]
    pub fn actions(&self) -> &[&'a RowAction<R>] {
        match self {
            Self::None => &[],
            Self::Inline(actions) | Self::Overflow(actions) => actions,
        }
    }
}

/// Filters `actions` by their visibility predicate for `row` and chooses the
/// presentation from the number that remain.
pub fn resolve<'a, R>(actions: &'a [RowAction<R>], row: &R) -> Resolved<'a, R> {
    let visible: Vec<&RowAction<R>> = actions.iter().filter(|action| action.is_visible(row)).collect();
    match visible.len() {
        0 => Resolved::None,
        n if n <= INLINE_LIMIT => Resolved::Inline(visible),
        _ => Resolved::Overflow(visible),
    }
}

/// Open/closed state of the overflow menus of one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionMenu {
    open: Option<usize>,
}

impl ActionMenu {
    /// Visible position of the row whose menu is open.
    #[must_use]
    pub const fn open_row(&self) -> Option<usize> {
        self.open
    }

    #[must_use]
    pub fn is_open(&self, position: usize) -> bool {
        self.open == Some(position)
    }

    /// Toggles the menu of the row at `position`; opening one closes any other.
    pub fn toggle(&mut self, position: usize) {
        self.open = if self.is_open(position) { None } else { Some(position) };
    }

    /// Closes the open menu, if any. Returns `true` if one was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn labels<R>(resolved: &Resolved<'_, R>) -> Vec<String> {
        resolved.actions().iter().map(|a| a.label.clone()).collect()
    }

    #[test]
    fn test_hidden_action_brings_count_to_inline() {
        let actions: Vec<RowAction<Value>> = vec![
            RowAction::new("View", |_| {}),
            RowAction::new("Edit", |_| {}).variant(Variant::Secondary),
            RowAction::new("Delete", |_| {})
                .variant(Variant::Danger)
                .show_when(|row: &Value| row["locked"] != json!(true)),
        ];

        let locked = json!({"locked": true});
        let resolved = resolve(&actions, &locked);
        assert!(matches!(resolved, Resolved::Inline(_)));
        assert_eq!(labels(&resolved), vec!["View", "Edit"]);

        let unlocked = json!({"locked": false});
        let resolved = resolve(&actions, &unlocked);
        assert!(matches!(resolved, Resolved::Overflow(_)));
        assert_eq!(resolved.actions().len(), 3);
    }

    #[test]
    fn test_no_visible_action_resolves_to_none() {
        let actions: Vec<RowAction<Value>> =
            vec![RowAction::new("Approve", |_| {}).show_when(|_: &Value| false)];
        assert!(matches!(resolve(&actions, &json!({})), Resolved::None));
        assert!(matches!(resolve::<Value>(&[], &json!({})), Resolved::None));
    }

    #[test]
    fn test_invoke_passes_row() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let action: RowAction<Value> =
            RowAction::new("Open", move |row: &Value| sink.borrow_mut().push(row["id"].clone()));
        action.invoke(&json!({"id": 4}));
        assert_eq!(*seen.borrow(), vec![json!(4)]);
    }

    #[test]
    fn test_menu_toggle_and_close() {
        let mut menu = ActionMenu::default();
        menu.toggle(2);
        assert!(menu.is_open(2));
        menu.toggle(3);
        assert_eq!(menu.open_row(), Some(3));
        menu.toggle(3);
        assert_eq!(menu.open_row(), None);
        menu.toggle(1);
        assert!(menu.close());
        assert!(!menu.close());
    }
}

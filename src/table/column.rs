//! Column model: the static description of what a table displays.
//!
//! A [`Column`] names the row field it shows, how it is labelled, whether it can
//! be sorted or filtered, and how its cells are formatted. Columns are supplied
//! once when a table is built and never change afterwards.
//!
//! # Example
//!
//! ```rust
//! use datatable::table::{Align, Column, FilterKind};
//! use serde_json::Value;
//!
//! let columns: Vec<Column<Value>> = vec![
//!     Column::new("name", "Name").sortable().filterable(),
//!     Column::new("amount", "Amount")
//!         .sortable()
//!         .align(Align::Right)
//!         .filter_kind(FilterKind::Number)
//!         .render(|value, _row, _index| {
//!             value.and_then(|v| v.as_f64()).map_or_else(String::new, |n| format!("{n:.2} €"))
//!         }),
//! ];
//! assert!(columns[0].sortable);
//! ```

use crate::domain::{CellValue, Record};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Custom cell formatter: `(value, row, visible position) -> display text`.
///
/// The value is `None` when the row has no field for the column key.
pub type RenderFn<R> = dyn Fn(Option<&CellValue>, &R, usize) -> String;

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Cell formatting strategy attached to a column.
pub enum CellRenderer<R> {
    /// The value's default string form; missing fields render empty.
    Default,
    /// A caller-supplied pure formatter.
    Custom(Box<RenderFn<R>>),
}

impl<R> fmt::Debug for CellRenderer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One selectable choice of a [`FilterKind::Select`] filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Text shown to the user.
    pub label: String,
    /// Value written into the filter state when chosen.
    pub value: String,
}

impl SelectOption {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// How a filter value is matched against a column's cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterKind {
    /// Case-insensitive substring match.
    #[default]
    Text,
    /// Case-insensitive exact match against one of a fixed set of options.
    Select {
        /// Choices offered by the filter bar.
        options: Vec<SelectOption>,
    },
    /// Numeric equality; the filter value is parsed as a number.
    Number,
    /// Same calendar day; the filter value is a `YYYY-MM-DD` date.
    Date,
    /// Skim-style fuzzy match.
    Fuzzy,
}

impl FilterKind {
    /// Resolves user input to the value stored in the filter state.
    ///
    /// For select filters, input naming an option's label (ignoring case)
    /// becomes that option's value; any other input is kept as typed.
    #[must_use]
    pub fn option_value<'a>(&'a self, input: &'a str) -> &'a str {
        match self {
            Self::Select { options } => options
                .iter()
                .find(|o| o.label.eq_ignore_ascii_case(input.trim()))
                .map_or(input, |o| o.value.as_str()),
            _ => input,
        }
    }

    /// Label of the select option holding `value`, for display.
    #[must_use]
    pub fn option_label<'a>(&'a self, value: &'a str) -> &'a str {
        match self {
            Self::Select { options } => options
                .iter()
                .find(|o| o.value == value)
                .map_or(value, |o| o.label.as_str()),
            _ => value,
        }
    }
}

/// Static description of one displayed field.
pub struct Column<R> {
    /// Field key; unique within a table.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether the header toggles sorting.
    pub sortable: bool,
    /// Whether the filter bar offers an input for this column.
    pub filterable: bool,
    /// How filter values are matched for this column.
    pub filter_kind: FilterKind,
    /// Cell formatting strategy.
    pub renderer: CellRenderer<R>,
    /// Fixed width in character cells.
    pub width: Option<usize>,
    /// Horizontal alignment.
    pub align: Align,
    /// Free-form style tag passed through to the presentation layer.
    pub class: Option<String>,
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("filter_kind", &self.filter_kind)
            .field("renderer", &self.renderer)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("class", &self.class)
            .finish()
    }
}

impl<R> Column<R> {
    /// Creates a plain column: not sortable, not filterable, default rendering.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            filterable: false,
            filter_kind: FilterKind::Text,
            renderer: CellRenderer::Default,
            width: None,
            align: Align::Left,
            class: None,
        }
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Sets the filter kind and marks the column filterable.
    #[must_use]
    pub fn filter_kind(mut self, kind: FilterKind) -> Self {
        self.filter_kind = kind;
        self.filterable = true;
        self
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Installs a custom cell formatter.
    #[must_use]
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&CellValue>, &R, usize) -> String + 'static,
    {
        self.renderer = CellRenderer::Custom(Box::new(render));
        self
    }
}

impl<R: Record> Column<R> {
    /// Formats this column's cell for `row` at visible position `index`.
    #[must_use]
    pub fn render_cell(&self, row: &R, index: usize) -> String {
        let value = row.field(&self.key);
        match &self.renderer {
            CellRenderer::Default => value.map(|v| v.to_string()).unwrap_or_default(),
            CellRenderer::Custom(render) => render(value.as_ref(), row, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_builder_defaults() {
        let column: Column<Value> = Column::new("name", "Name");
        assert!(!column.sortable);
        assert!(!column.filterable);
        assert_eq!(column.align, Align::Left);
        assert_eq!(column.filter_kind, FilterKind::Text);
    }

    #[test]
    fn test_filter_kind_marks_filterable() {
        let column: Column<Value> = Column::new("age", "Age").filter_kind(FilterKind::Number);
        assert!(column.filterable);
    }

    #[test]
    fn test_default_render() {
        let column: Column<Value> = Column::new("name", "Name");
        assert_eq!(column.render_cell(&json!({"name": "Bea"}), 0), "Bea");
        assert_eq!(column.render_cell(&json!({"name": null}), 0), "");
        assert_eq!(column.render_cell(&json!({}), 0), "");
    }

    #[test]
    fn test_custom_render_sees_row_and_index() {
        let column: Column<Value> = Column::new("name", "Name").render(|value, row: &Value, index| {
            let id = row.field("id").map(|v| v.to_string()).unwrap_or_default();
            format!("{index}:{id}:{}", value.map(ToString::to_string).unwrap_or_default())
        });
        assert_eq!(column.render_cell(&json!({"id": 7, "name": "Al"}), 2), "2:7:Al");
        assert_eq!(column.render_cell(&json!({"id": 8}), 0), "0:8:");
    }

    #[test]
    fn test_select_labels_resolve_to_values() {
        let kind = FilterKind::Select {
            options: vec![SelectOption::new("Paid invoices", "paid"), SelectOption::new("Due", "due")],
        };
        assert_eq!(kind.option_value("paid invoices"), "paid");
        assert_eq!(kind.option_value("due"), "due");
        assert_eq!(kind.option_value("overdue"), "overdue");
        assert_eq!(kind.option_label("paid"), "Paid invoices");
        assert_eq!(FilterKind::Text.option_value("Due"), "Due");
    }

    #[test]
    fn test_filter_kind_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            filter: FilterKind,
        }
        let parsed: Wrapper = toml::from_str(
            r#"
            [filter]
            type = "select"
            options = [{ label = "Active", value = "active" }]
            "#,
        )
        .unwrap();
        assert_eq!(
            parsed.filter,
            FilterKind::Select {
                options: vec![SelectOption::new("Active", "active")]
            }
        );
    }
}

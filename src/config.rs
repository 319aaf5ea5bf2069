//! Table configuration.
//!
//! Configuration arrives either as a TOML file ([`Config::from_file`]) or as a
//! flat string map ([`Config::from_map`]), the form hosts typically receive
//! from their own configuration systems. Every field has a default, so an
//! empty file or map yields a usable table.
//!
//! # TOML Format
//!
//! ```toml
//! breakpoint = 768
//! empty_message = "No invoices"
//! page_sizes = [10, 25, 50]
//! page_size = 10
//! theme = "catppuccin-latte"
//! select_by = "id"
//!
//! [[columns]]
//! key = "name"
//! label = "Name"
//! sortable = true
//! filterable = true
//!
//! [[columns]]
//! key = "status"
//! filterable = true
//! filter = { type = "select", options = [{ label = "Paid", value = "paid" }] }
//!
//! [[actions]]
//! label = "Delete"
//! variant = "danger"
//! hide_if = "locked"
//! ```

use crate::domain::{Record, Result, TableError};
use crate::table::{pagination::DEFAULT_PAGE_SIZES, render_mode::DEFAULT_BREAKPOINT};
use crate::table::{Align, Column, FilterKind, Variant, DEFAULT_EMPTY_MESSAGE, DEFAULT_LOADING_MESSAGE};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Column descriptor as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub key: String,
    /// Header text; the key when absent.
    pub label: Option<String>,
    pub sortable: bool,
    pub filterable: bool,
    /// Filter matching; setting it makes the column filterable.
    pub filter: Option<FilterKind>,
    pub width: Option<usize>,
    pub align: Align,
    pub class: Option<String>,
}

impl ColumnConfig {
    /// Builds the column this entry describes.
    #[must_use]
    pub fn to_column<R>(&self) -> Column<R> {
        let mut column = Column::new(self.key.clone(), self.label.clone().unwrap_or_else(|| self.key.clone()))
            .align(self.align);
        if self.sortable {
            column = column.sortable();
        }
        if self.filterable {
            column = column.filterable();
        }
        if let Some(kind) = &self.filter {
            column = column.filter_kind(kind.clone());
        }
        if let Some(width) = self.width {
            column = column.width(width);
        }
        if let Some(class) = &self.class {
            column = column.class(class.clone());
        }
        column
    }
}

/// Row action as written in configuration.
///
/// `show_if` and `hide_if` name a row field whose truthiness decides
/// visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    pub label: String,
    pub icon: Option<String>,
    pub variant: Variant,
    pub show_if: Option<String>,
    pub hide_if: Option<String>,
}

impl ActionConfig {
    /// Whether the action applies to `row`.
    pub fn is_visible_for<R: Record>(&self, row: &R) -> bool {
        let truthy = |key: &str| row.field(key).is_some_and(|v| v.is_truthy());
        self.show_if.as_deref().map_or(true, truthy) && !self.hide_if.as_deref().is_some_and(truthy)
    }
}

/// Table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compact-layout breakpoint in logical pixels. Default: 768
    pub breakpoint: u32,

    /// Initial viewport width. Default: 1024
    pub width: u32,

    /// Message shown when no row is visible.
    pub empty_message: String,

    /// Message shown while rows are loading.
    pub loading_message: String,

    /// Choices offered by the page-size selector. Default: `[10, 25, 50, 100]`
    pub page_sizes: Vec<usize>,

    /// Enables host-side paging with this many rows per page.
    pub page_size: Option<usize>,

    /// Built-in theme name. Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// Tracing level. Options: `trace`, `debug`, `info`, `warn`, `error`.
    pub trace_level: Option<String>,

    /// Show selection checkboxes.
    pub selectable: bool,

    /// Select rows by this field instead of by position. Implies `selectable`.
    pub select_by: Option<String>,

    /// Hand sorting to the host instead of sorting locally.
    pub delegate_sort: bool,

    /// Hand filtering to the host instead of filtering locally.
    pub delegate_filter: bool,

    /// Column descriptors. When empty, columns are inferred from the rows.
    pub columns: Vec<ColumnConfig>,

    /// Row actions, in display order.
    pub actions: Vec<ActionConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
            width: 1024,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            page_size: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            selectable: false,
            select_by: None,
            delegate_sort: false,
            delegate_filter: false,
            columns: Vec::new(),
            actions: Vec::new(),
        }
    }
}

impl Config {
    /// Loads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML for this
    /// shape, or fails [`Config::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), columns = config.columns.len(), "configuration loaded");
        Ok(config)
    }

    /// Parses configuration from a flat string map.
    ///
    /// Unparseable values fall back to their defaults. `page_sizes` and
    /// `columns` are comma-separated; each listed column is sortable and
    /// filterable.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use datatable::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("breakpoint".to_string(), "600".to_string());
    /// map.insert("columns".to_string(), "id, name".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.breakpoint, 600);
    /// assert_eq!(config.columns.len(), 2);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let flag = |key: &str| {
            map.get(key)
                .map_or(false, |v| matches!(v.trim(), "true" | "yes" | "1"))
        };
        let list = |key: &str| -> Vec<String> {
            map.get(key)
                .map(|s| {
                    s.split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default()
        };

        let page_sizes: Vec<usize> = list("page_sizes")
            .iter()
            .filter_map(|s| s.parse().ok())
            .filter(|&n| n > 0)
            .collect();

        let columns = list("columns")
            .into_iter()
            .map(|key| ColumnConfig {
                key,
                sortable: true,
                filterable: true,
                ..ColumnConfig::default()
            })
            .collect();

        Self {
            breakpoint: map
                .get("breakpoint")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.breakpoint),
            width: map
                .get("width")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.width),
            empty_message: map.get("empty_message").cloned().unwrap_or(defaults.empty_message),
            loading_message: map
                .get("loading_message")
                .cloned()
                .unwrap_or(defaults.loading_message),
            page_sizes: if page_sizes.is_empty() { defaults.page_sizes } else { page_sizes },
            page_size: map
                .get("page_size")
                .and_then(|s| s.trim().parse().ok())
                .filter(|&n: &usize| n > 0),
            theme_name: map.get("theme").cloned(),
            theme_file: map.get("theme_file").cloned(),
            trace_level: map.get("trace_level").cloned(),
            selectable: flag("selectable"),
            select_by: map.get("select_by").cloned().filter(|s| !s.is_empty()),
            delegate_sort: flag("delegate_sort"),
            delegate_filter: flag("delegate_filter"),
            columns,
            actions: Vec::new(),
        }
    }

    /// Checks values that deserialize fine but cannot drive a table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.page_sizes.is_empty() || self.page_sizes.contains(&0) {
            return Err(TableError::Config(
                "page_sizes must list at least one positive size".to_string(),
            ));
        }
        if self.page_size == Some(0) {
            return Err(TableError::Config("page_size must be positive".to_string()));
        }
        if let Some(column) = self.columns.iter().find(|c| c.key.is_empty()) {
            return Err(TableError::Config(format!(
                "column {:?} has an empty key",
                column.label.as_deref().unwrap_or_default()
            )));
        }
        if let Some(action) = self.actions.iter().find(|a| a.label.is_empty()) {
            return Err(TableError::Config(format!(
                "action with icon {:?} has an empty label",
                action.icon.as_deref().unwrap_or_default()
            )));
        }
        Ok(())
    }

    /// Whether selection checkboxes are shown.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.selectable || self.select_by.is_some()
    }

    /// Column descriptors for a table over `rows`.
    ///
    /// Without configured columns, one sortable and filterable column is
    /// inferred per key of the first object row.
    #[must_use]
    pub fn columns_for<R>(&self, rows: &[serde_json::Value]) -> Vec<Column<R>> {
        if !self.columns.is_empty() {
            return self.columns.iter().map(ColumnConfig::to_column).collect();
        }

        let keys: Vec<&String> = rows
            .iter()
            .find_map(serde_json::Value::as_object)
            .map(|object| object.keys().collect())
            .unwrap_or_default();
        tracing::debug!(columns = keys.len(), "inferring columns from the first row");

        keys.into_iter()
            .map(|key| Column::new(key.clone(), key.clone()).sortable().filterable())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{json, Value};
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.breakpoint, 768);
        assert_eq!(config.page_sizes, vec![10, 25, 50, 100]);
        assert_eq!(config.empty_message, "No data available");
        assert!(!config.is_selectable());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
breakpoint = 600
page_sizes = [5, 10]
select_by = "id"

[[columns]]
key = "status"
filter = {{ type = "select", options = [{{ label = "Paid", value = "paid" }}] }}

[[actions]]
label = "Delete"
variant = "danger"
hide_if = "locked"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.breakpoint, 600);
        assert_eq!(config.page_sizes, vec![5, 10]);
        assert!(config.is_selectable());
        assert_eq!(config.actions[0].variant, Variant::Danger);

        let columns: Vec<Column<Value>> = config.columns_for(&[]);
        assert_eq!(columns[0].label, "status");
        assert!(columns[0].filterable);
        assert!(matches!(columns[0].filter_kind, FilterKind::Select { .. }));
    }

    #[rstest]
    #[case("page_sizes = []")]
    #[case("page_sizes = [10, 0]")]
    #[case("page_size = 0")]
    #[case("[[columns]]\nlabel = \"Name\"")]
    fn test_invalid_files_are_rejected(#[case] contents: &str) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(TableError::Config(_))));
    }

    #[test]
    fn test_unknown_type_is_a_toml_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"breakpoint = \"wide\"").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(TableError::Toml(_))));
    }

    #[test]
    fn test_from_map_is_lenient() {
        let map: BTreeMap<String, String> = [
            ("breakpoint", "not a number"),
            ("page_sizes", "5, x, 20"),
            ("delegate_sort", "true"),
            ("select_by", "id"),
            ("theme", "catppuccin-latte"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert_eq!(config.breakpoint, 768);
        assert_eq!(config.page_sizes, vec![5, 20]);
        assert!(config.delegate_sort);
        assert!(!config.delegate_filter);
        assert!(config.is_selectable());
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    }

    #[test]
    fn test_columns_inferred_from_first_object() {
        let rows = vec![json!(null), json!({"name": "Al", "id": 1})];
        let columns: Vec<Column<Value>> = Config::default().columns_for(&rows);
        let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["id", "name"]);
        assert!(columns.iter().all(|c| c.sortable && c.filterable));
    }

    #[rstest]
    #[case(json!({"locked": true}), false)]
    #[case(json!({"locked": false, "owner": "me"}), true)]
    #[case(json!({"owner": ""}), false)]
    fn test_action_visibility(#[case] row: Value, #[case] visible: bool) {
        let action = ActionConfig {
            label: "Delete".to_string(),
            show_if: Some("owner".to_string()),
            hide_if: Some("locked".to_string()),
            ..ActionConfig::default()
        };
        assert_eq!(action.is_visible_for(&row), visible);
    }
}

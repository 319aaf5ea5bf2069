//! Datatable: a generic engine for presenting collections of records as a
//! table.
//!
//! Datatable takes an in-memory row collection and a list of column
//! descriptors and provides:
//! - Tri-state column sorting (ascending, descending, unsorted), stable
//! - Per-column filters composed with AND (text, select, number, date, fuzzy)
//! - Local computation or delegation of sorting and filtering to the caller
//! - Row selection by position or by a stable row key
//! - Per-row actions, inline or collapsed into an overflow menu
//! - Pagination pass-through for server-paged data
//! - A tabular layout above a width breakpoint and stacked cards at or below it

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Events in,
//! │  - Event handling                                   │    actions out
//! │  - Action outbox                                    │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ Table Engine (table/)     │   │ UI Layer (ui/)            │
//! │ - Sort / filter pipeline  │   │ - Tabular and card layout │
//! │ - Selection, actions      │   │ - Theming                 │
//! │ - Pagination, viewport    │   │ - Components              │
//! └───────────────────────────┘   └───────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Configuration (config)        │
//! │  - Cell values, the Record trait, errors            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`table`]: The engine: [`DataTable`] and its collaborators
//! - [`app`]: Application state machine with event/action model
//! - [`ui`]: Terminal rendering with theme support
//! - [`domain`]: Cell values, the [`Record`] trait, errors
//! - [`config`]: TOML and string-map configuration
//! - [`observability`]: Tracing subscriber setup
//!
//! # Examples
//!
//! ## Engine only
//!
//! ```rust
//! use datatable::table::{Column, DataTable, SortDirection};
//! use serde_json::{json, Value};
//!
//! let mut table: DataTable<Value> = DataTable::builder(vec![
//!     Column::new("id", "ID"),
//!     Column::new("name", "Name").sortable().filterable(),
//! ])
//! .rows(vec![
//!     json!({"id": 1, "name": "Bea"}),
//!     json!({"id": 2, "name": "Al"}),
//!     json!({"id": 3, "name": "Al"}),
//! ])
//! .build()?;
//!
//! table.apply_sort("name");
//! table.apply_filter("name", "al");
//! let ids: Vec<&Value> = table.visible_rows().iter().map(|row| &row["id"]).collect();
//! assert_eq!(ids, [&json!(2), &json!(3)]);
//! # Ok::<(), datatable::TableError>(())
//! ```
//!
//! ## Events and actions
//!
//! ```rust
//! use datatable::{handle_event, initialize, Action, Config, Event};
//! use serde_json::json;
//!
//! let config = Config { delegate_sort: true, ..Config::default() };
//! let mut state = initialize(&config, vec![json!({"name": "Al"})])?;
//!
//! let (_rerender, actions) = handle_event(&mut state, &Event::Sort("name".to_string()))?;
//! assert!(matches!(&actions[..], [Action::SortRequested { .. }]));
//! # Ok::<(), datatable::TableError>(())
//! ```

pub mod app;
pub mod config;
pub mod domain;
pub mod observability;
pub mod table;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event};
pub use config::Config;
pub use domain::{CellValue, Record, Result, TableError};
pub use table::DataTable;
pub use ui::Theme;

/// Resolves the theme named by `config`.
///
/// A theme file takes precedence over a theme name. Unknown names and
/// unreadable files fall back to the default theme with a warning.
#[must_use]
pub fn load_theme(config: &Config) -> Theme {
    config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    )
}

/// Creates the application state for `rows` as described by `config`.
///
/// # Errors
///
/// Returns [`TableError::DuplicateColumn`] if configured columns repeat a key.
pub fn initialize(config: &Config, rows: Vec<serde_json::Value>) -> Result<AppState> {
    tracing::debug!(rows = rows.len(), "initializing datatable");
    AppState::new(config, load_theme(config), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_theme_precedence() {
        let mut config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&config).name, "catppuccin-latte");

        config.theme_name = Some("nope".to_string());
        assert_eq!(load_theme(&config).name, "catppuccin-mocha");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = toml::to_string(&Theme::default())
            .unwrap()
            .replace("catppuccin-mocha", "mine");
        file.write_all(custom.as_bytes()).unwrap();
        config.theme_file = Some(file.path().display().to_string());
        assert_eq!(load_theme(&config).name, "mine");

        config.theme_file = Some("/nonexistent.toml".to_string());
        assert_eq!(load_theme(&config).name, "catppuccin-mocha");
    }
}

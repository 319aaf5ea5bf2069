//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the view model from `AppState`, then hand
//! it to the components of the active layout.
//!
//! # Example
//!
//! ```rust
//! use datatable::app::AppState;
//! use datatable::ui::render_to_string;
//! use datatable::{Config, Theme};
//! use serde_json::json;
//!
//! let state = AppState::new(&Config::default(), Theme::default(), vec![json!({"name": "Al"})])?;
//! let output = render_to_string(&state.compute_viewmodel(), &state.theme);
//! assert!(output.contains("Al"));
//! # Ok::<(), datatable::TableError>(())
//! ```

use crate::app::AppState;
use crate::table::RenderMode;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TableViewModel;

/// Renders the table to stdout.
pub fn render(state: &AppState) {
    let viewmodel = state.compute_viewmodel();
    print!("{}", render_to_string(&viewmodel, &state.theme));
}

/// Renders a view model into an ANSI-styled string.
#[must_use]
pub fn render_to_string(vm: &TableViewModel, theme: &Theme) -> String {
    let _span = tracing::trace_span!("render", mode = ?vm.mode, rows = vm.rows().len()).entered();
    let mut out = String::new();
    match vm.mode {
        RenderMode::Tabular => components::render_tabular_mode(&mut out, vm, theme),
        RenderMode::Compact => components::render_compact_mode(&mut out, vm, theme),
    }
    out
}

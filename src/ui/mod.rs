//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled text through composable
//! components, in either the tabular or the compact layout.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → TableViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable table state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (alignment, truncation, ANSI)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    ActionButton, ActionsView, Body, FilterField, HeaderCell, PaginationInfo, RowView,
    SelectionSummary, SortIndicator, TableViewModel,
};

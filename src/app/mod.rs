//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between a host (the `datatable` binary, or any program
//! embedding the table) and the [`crate::table`] engine.
//!
//! # Architecture
//!
//! ```text
//! Host input → Event → handle_event → DataTable → callbacks → Outbox
//!                            │                                  │
//!                            ▼                                  ▼
//!                  rerender? → compute_viewmodel → render   Vec<Action> → host
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands reported back to the host
//! - [`handler`]: Event processing
//! - [`host`]: In-memory host answering delegated sort, filter and paging
//! - [`script`]: Line-oriented command scripts replayed by the binary
//! - [`state`]: Application state and view model computation

pub mod actions;
pub mod handler;
pub mod host;
pub mod script;
pub mod state;

pub use actions::{Action, Outbox};
pub use handler::{handle_event, Event};
pub use host::MemoryHost;
pub use script::{parse_script, ScriptLine};
pub use state::AppState;

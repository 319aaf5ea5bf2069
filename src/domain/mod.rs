//! Domain layer: errors, cell values and row access.
//!
//! These types are independent of any rendering concern and are shared by the
//! table engine, the application layer and the renderer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`value`]: Cell values extracted from rows
//! - [`record`]: The [`Record`] trait and JSON row loading
//!
//! # Examples
//!
//! ```
//! use datatable::domain::{CellValue, Record};
//! use serde_json::json;
//!
//! let row = json!({"id": 1, "name": "Bea"});
//! assert_eq!(row.field("name"), Some(CellValue::from("Bea")));
//! ```

pub mod error;
pub mod record;
pub mod value;

pub use error::{Result, TableError};
pub use record::{rows_from_json, Record};
pub use value::{CellValue, ValueClass};

//! Error types for the data table engine.
//!
//! This module defines the centralized error type [`TableError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. The engine's
//! in-memory pipeline (sorting, filtering, selection) is infallible; errors only
//! arise at the edges: building a table, loading configuration, themes and row
//! files, and parsing command scripts.

use thiserror::Error;

/// The main error type for data table operations.
///
/// Most variants carry a description of what went wrong. I/O, JSON and TOML
/// failures wrap the underlying error using `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use datatable::TableError;
///
/// fn check_breakpoint(width: u32) -> Result<(), TableError> {
///     if width == 0 {
///         return Err(TableError::Config("breakpoint must be positive".to_string()));
///     }
///     Ok(())
/// }
/// assert!(check_breakpoint(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum TableError {
    /// Two column descriptors share the same key.
    ///
    /// Column keys join sort, filter and selection state to row fields, so
    /// they must be unique within one table.
    #[error("Duplicate column key: {0}")]
    DuplicateColumn(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The row source did not have the expected shape.
    ///
    /// Rows are expected as a JSON array of objects.
    #[error("Row source error: {0}")]
    Rows(String),

    /// A command script line could not be parsed.
    #[error("Script error on line {line}: {message}")]
    Script {
        /// 1-based line number in the script.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized `Result` type for data table operations.
pub type Result<T> = std::result::Result<T, TableError>;

//! Tracing subscriber setup.
//!
//! The library only emits `tracing` spans and events; installing a subscriber
//! is left to the binary or the embedding host. [`init_tracing`] installs the
//! one the `datatable` binary uses: human-readable events on stderr, so
//! stdout carries only rendered tables.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use datatable::observability::init_tracing;
//! use datatable::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("table initialized");
//! ```

mod init;

pub use init::init_tracing;

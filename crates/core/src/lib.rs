//! Shared types for the concurrency-control benchmark engine.
//!
//! This crate defines the protocol-independent vocabulary used by the rest
//! of the workspace: the key type, the typed error taxonomy, and the
//! validated benchmark configuration parsed from CLI arguments.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;

pub use config::{BenchmarkConfig, Protocol};
pub use error::{Error, Result};

/// The dense integer key type indexing into the record table.
pub type Key = u64;

//! Error taxonomy for the benchmark engine.
//!
//! Per the error handling design: configuration and allocation errors are
//! fatal and terminate the process. Transaction aborts are a recoverable,
//! purely local outcome of the executor protocol and are represented by
//! `TransactionStatus` in `cc-concurrency`, not by this error type.

use thiserror::Error;

/// All fatal errors surfaced by the benchmark engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A CLI argument was out of range or not parseable as the expected type.
    #[error("configuration error: {0}")]
    Config(String),

    /// Failed to reserve memory for the table or a per-worker set.
    #[error("allocation error: {0}")]
    Allocation(String),
}

/// Result type for fatal benchmark-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

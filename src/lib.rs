//! # ccbench
//!
//! An in-memory optimistic concurrency-control benchmark engine, supporting
//! two interchangeable protocols over the same record table:
//!
//! - **Silo**: epoch-based group commit with per-record TID words.
//! - **TicToc**: timestamp-ordering validation with per-record timestamp
//!   words and read-timestamp extension.
//!
//! ## Quick start
//!
//! ```ignore
//! use ccbench::prelude::*;
//!
//! let config = BenchmarkConfig::validate(
//!     Protocol::Silo, 1_000_000, 10, 24, 50, 0.0, false, 2400.0, 40, 3,
//! )?;
//! let summary = run_silo(&config);
//! println!("{} txn/s", summary.throughput());
//! ```
//!
//! ## Crate layout
//!
//! - [`cc_core`] — configuration, error taxonomy, the shared key type.
//! - [`cc_storage`] — the control-word state machine, records, the table.
//! - [`cc_concurrency`] — the per-protocol executors and back-off policy.
//! - [`cc_workload`] — procedure generators (uniform, Zipfian).
//! - [`cc_engine`] — worker and epoch-advancer orchestration.

#![warn(missing_docs)]

pub mod prelude;

pub use cc_concurrency::{Executor, Operation, TransactionStatus};
pub use cc_core::{BenchmarkConfig, Error, Key, Protocol, Result};
pub use cc_engine::{run_silo, run_tictoc, BenchmarkResult};
pub use cc_storage::{ControlWord, SiloTidWord, TicTocTsWord};
pub use cc_workload::{ProcedureGenerator, UniformGenerator, ZipfGenerator};

//! Benchmark orchestration: owns the run's shared state, spawns workers
//! and (for Silo) the epoch advancer, and folds their results.
//!
//! `cc-cli` is the only expected caller; this crate has no knowledge of
//! argument parsing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod affinity;
pub mod context;
pub mod epoch_worker;
pub mod result;
pub mod run;
pub mod worker;

pub use context::{SiloContext, TicTocContext};
pub use result::{BenchmarkResult, WorkerResult};
pub use run::{run_silo, run_tictoc};

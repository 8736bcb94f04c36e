//! Per-worker transaction executors for both concurrency-control protocols.
//!
//! This crate owns everything that runs on a worker's hot path: the shared
//! [`Executor`] contract, the concrete [`silo::SiloExecutor`] and
//! [`tictoc::TicTocExecutor`] implementations, and the back-off policy both
//! protocols use after an abort. Thread spawning, workload generation, and
//! process bootstrap live in `cc-engine` and `cc-cli`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backoff;
pub mod executor;
pub mod silo;
pub mod tictoc;

pub use backoff::Backoff;
pub use executor::{Executor, Operation, TransactionStatus};
pub use silo::{EpochCoordinator, SiloExecutor};
pub use tictoc::TicTocExecutor;

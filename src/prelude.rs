//! Convenient imports for running a benchmark.
//!
//! ```ignore
//! use ccbench::prelude::*;
//! ```

pub use crate::{
    BenchmarkConfig, BenchmarkResult, Error, Executor, Key, Operation, ProcedureGenerator,
    Protocol, Result, TransactionStatus, UniformGenerator, ZipfGenerator, run_silo, run_tictoc,
};

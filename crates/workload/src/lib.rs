//! Procedure generators: the workload side of the benchmark.
//!
//! A worker consumes these only through [`ProcedureGenerator`]; the core
//! crates never depend on this one.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod generator;
pub mod uniform;
pub mod zipf;

pub use generator::ProcedureGenerator;
pub use uniform::UniformGenerator;
pub use zipf::ZipfGenerator;

//! Silo: epoch-based optimistic concurrency control.

mod epoch;
mod executor;

pub use epoch::EpochCoordinator;
pub use executor::SiloExecutor;

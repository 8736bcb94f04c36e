//! TicToc: timestamp-ordering optimistic concurrency control.

mod executor;

pub use executor::TicTocExecutor;

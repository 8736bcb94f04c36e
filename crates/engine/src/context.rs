//! The shared mutable state a benchmark run is built around.
//!
//! Per the design notes: the record table, the stop flag, and (for Silo)
//! the epoch state are owned here, once, and every worker and the epoch
//! advancer borrow from it for the scope of the run rather than each
//! holding an independent handle to process-wide state.

use std::sync::atomic::{AtomicBool, AtomicU32};

use cc_storage::{SiloTidWord, Table, TicTocTsWord, TimestampHistory, VAL_SIZE};

/// Shared state for a Silo run: the table, the global epoch, one
/// last-observed-epoch slot per worker, and the stop flag.
pub struct SiloContext {
    /// The record table.
    pub table: Table<SiloTidWord>,
    /// The global epoch, advanced by the epoch-advancer thread.
    pub global_epoch: AtomicU32,
    /// One slot per worker, written only by that worker.
    pub worker_epochs: Vec<AtomicU32>,
    /// Set once the run's wall-clock duration elapses.
    pub stop: AtomicBool,
}

impl SiloContext {
    /// Build a fresh context: a zero-initialized table of `tuple_num`
    /// records and `worker_count` epoch slots.
    pub fn new(tuple_num: u64, worker_count: usize) -> Self {
        Self {
            table: Table::build(
                tuple_num,
                |_| SiloTidWord::default(),
                |_| [0; VAL_SIZE],
            ),
            global_epoch: AtomicU32::new(0),
            worker_epochs: (0..worker_count).map(|_| AtomicU32::new(0)).collect(),
            stop: AtomicBool::new(false),
        }
    }
}

/// Shared state for a TicToc run: the table, its timestamp history, and the
/// stop flag. TicToc has no epoch advancer.
pub struct TicTocContext {
    /// The record table.
    pub table: Table<TicTocTsWord>,
    /// The per-record prior-timestamp-word history.
    pub history: TimestampHistory,
    /// Set once the run's wall-clock duration elapses.
    pub stop: AtomicBool,
}

impl TicTocContext {
    /// Build a fresh context: a zero-initialized table and history, both
    /// sized for `tuple_num` records.
    pub fn new(tuple_num: u64) -> Self {
        Self {
            table: Table::build(
                tuple_num,
                |_| TicTocTsWord::default(),
                |_| [0; VAL_SIZE],
            ),
            history: TimestampHistory::build(tuple_num),
            stop: AtomicBool::new(false),
        }
    }
}

//! Epoch coordination primitives for Silo.
//!
//! The thread-spawning and wall-clock-runtime side of the epoch advancer
//! lives in `cc-engine`, which owns process bootstrap; this module holds
//! the pure decision logic — "has every worker caught up, and if so, may
//! the epoch advance" — so it can be unit tested without spawning threads.

use std::sync::atomic::{AtomicU32, Ordering};

/// Coordinates the global epoch against each worker's last-observed epoch.
pub struct EpochCoordinator<'t> {
    global_epoch: &'t AtomicU32,
    worker_epochs: &'t [AtomicU32],
}

impl<'t> EpochCoordinator<'t> {
    /// Build a coordinator over a shared global epoch and one atomic per
    /// worker recording the last epoch that worker observed at `begin()`.
    pub fn new(global_epoch: &'t AtomicU32, worker_epochs: &'t [AtomicU32]) -> Self {
        Self {
            global_epoch,
            worker_epochs,
        }
    }

    /// The current global epoch.
    pub fn current(&self) -> u32 {
        self.global_epoch.load(Ordering::Acquire)
    }

    /// Whether every worker has observed at least the current epoch.
    ///
    /// Relaxed ordering suffices: the epoch advancer only needs to observe
    /// monotone growth of each worker's local epoch, not a snapshot
    /// synchronized with anything else a worker does.
    pub fn all_workers_caught_up(&self) -> bool {
        let current = self.current();
        self.worker_epochs
            .iter()
            .all(|e| e.load(Ordering::Relaxed) >= current)
    }

    /// Attempt to advance the epoch by one, succeeding only if every worker
    /// has observed the current epoch and no concurrent advancer beat us to
    /// it. Returns the new epoch on success.
    pub fn try_advance(&self) -> Option<u32> {
        if !self.all_workers_caught_up() {
            return None;
        }
        let current = self.current();
        self.global_epoch
            .compare_exchange(current, current + 1, Ordering::AcqRel, Ordering::Relaxed)
            .ok()
            .map(|_| current + 1)
    }
}

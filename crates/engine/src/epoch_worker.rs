//! The Silo epoch-advancer thread body.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use cc_concurrency::EpochCoordinator;

/// Advance the global epoch roughly every `epoch_time_ms`, but only once
/// every worker has observed the current one. Polls at a fine grain so the
/// stop flag is noticed promptly even when a worker is lagging.
pub fn run_epoch_advancer(coordinator: &EpochCoordinator<'_>, epoch_time_ms: u64, stop: &AtomicBool) {
    let period = Duration::from_millis(epoch_time_ms);
    let mut window_start = Instant::now();

    while !stop.load(Ordering::Relaxed) {
        if window_start.elapsed() >= period {
            if coordinator.try_advance().is_some() {
                tracing::trace!(epoch = coordinator.current(), "advanced epoch");
                window_start = Instant::now();
            }
        }
        std::thread::sleep(Duration::from_micros(100));
    }
}

//! Aggregated benchmark outcomes.

use std::time::Duration;

/// One worker's tally over the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerResult {
    /// Transactions that committed.
    pub committed: u64,
    /// Transaction attempts that aborted and were retried.
    pub aborted: u64,
}

/// The run's summed outcome, as printed by the CLI.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Committed transactions across all workers.
    pub committed: u64,
    /// Aborted attempts across all workers.
    pub aborted: u64,
    /// Wall-clock duration the workers actually ran for.
    pub elapsed: Duration,
}

impl BenchmarkResult {
    /// Fold a set of per-worker tallies into a summed result.
    pub fn from_workers(results: &[WorkerResult], elapsed: Duration) -> Self {
        let committed = results.iter().map(|r| r.committed).sum();
        let aborted = results.iter().map(|r| r.aborted).sum();
        Self {
            committed,
            aborted,
            elapsed,
        }
    }

    /// Committed transactions per second.
    pub fn throughput(&self) -> f64 {
        self.committed as f64 / self.elapsed.as_secs_f64()
    }

    /// Fraction of attempts that aborted, in `[0, 1]`.
    pub fn abort_rate(&self) -> f64 {
        let attempts = self.committed + self.aborted;
        if attempts == 0 {
            0.0
        } else {
            self.aborted as f64 / attempts as f64
        }
    }
}

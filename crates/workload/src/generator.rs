//! The workload driver's contract with the core.

use cc_concurrency::Operation;

/// Fills a transaction's operation buffer for one procedure.
///
/// Implementations own their own key-distribution and RNG state; a worker
/// calls [`Self::fill`] once per transaction attempt, reusing the same
/// buffer across retries of the same procedure (the original workload
/// generates once per transaction slot, not once per attempt, but this
/// distinction is invisible to the executor and this trait leaves it to the
/// caller).
pub trait ProcedureGenerator {
    /// Fill `buffer` with `buffer.len()` operations for one transaction.
    fn fill(&mut self, buffer: &mut [Operation]);
}

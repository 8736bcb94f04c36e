//! Shared vocabulary for the per-worker transaction executors.

use cc_core::Key;
use cc_storage::VAL_SIZE;

/// A single operation in a transaction's procedure.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Read the value at `key`.
    Read(Key),
    /// Write `value` to `key`.
    Write(Key, [u8; VAL_SIZE]),
}

/// A transaction's lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Between `begin()` and a terminal outcome.
    InFlight,
    /// Validation succeeded and writes were published.
    Committed,
    /// Validation failed, a lock could not be acquired, or a read was
    /// preemptively aborted; no writes were published.
    Aborted,
}

/// The common per-transaction executor contract shared by Silo and TicToc.
///
/// Read-own-writes and repeat-read are a caller-invisible optimization:
/// implementations consult the local write set, then the local read set,
/// before touching the table.
pub trait Executor {
    /// Reset transient per-transaction state for a new attempt.
    fn begin(&mut self);

    /// Read the current value of `key`, staging it in the read set.
    ///
    /// On TicToc, a preemptive abort may set [`Self::status`] to
    /// [`TransactionStatus::Aborted`] without a valid value to return; the
    /// returned bytes are then meaningless and the caller must check
    /// [`Self::status`] before trusting them.
    fn read(&mut self, key: Key) -> [u8; VAL_SIZE];

    /// Stage a value to be written to `key` at commit.
    fn write(&mut self, key: Key, value: [u8; VAL_SIZE]);

    /// Validate the transaction's read and write sets. Returns `true` iff
    /// [`Self::commit`] may now be called.
    fn validate(&mut self) -> bool;

    /// Publish staged writes. Precondition: the prior [`Self::validate`]
    /// call returned `true`.
    fn commit(&mut self);

    /// Release any held locks, clear transient state, and back off before
    /// the caller retries.
    fn abort(&mut self);

    /// The transaction's current lifecycle state.
    fn status(&self) -> TransactionStatus;
}

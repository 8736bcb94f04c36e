//! The TicToc per-worker transaction executor.

use cc_core::Key;
use cc_storage::{ControlWord, TicTocTsWord, Table, TimestampHistory, VAL_SIZE};

use crate::backoff::Backoff;
use crate::executor::{Executor, TransactionStatus};

struct ReadEntry {
    key: Key,
    word: TicTocTsWord,
    value: [u8; VAL_SIZE],
}

struct WriteEntry {
    key: Key,
    value: [u8; VAL_SIZE],
    /// Captured when the write set is locked during validation; zero until
    /// then.
    pre_word: TicTocTsWord,
}

/// TicToc's optimistic executor: per-record timestamp ordering, commit
/// timestamps computed from the union of read and write sets, and a
/// preemptive abort when a locked record's rts already falls below what
/// this transaction would need to commit (§4.4).
pub struct TicTocExecutor<'t> {
    table: &'t Table<TicTocTsWord>,
    history: &'t TimestampHistory,

    status: TransactionStatus,
    read_set: Vec<ReadEntry>,
    write_set: Vec<WriteEntry>,
    cll: Vec<Key>,

    /// Running lower bound on the eventual commit timestamp, grown by every
    /// successful read and write-set lock; used only for the preemptive
    /// abort check, not as the final commit_ts.
    commit_ts_lower_bound: u64,
    commit_ts: u64,
    backoff: Backoff,
}

impl<'t> TicTocExecutor<'t> {
    /// Build an executor bound to `table` and its timestamp history.
    pub fn new(table: &'t Table<TicTocTsWord>, history: &'t TimestampHistory) -> Self {
        Self {
            table,
            history,
            status: TransactionStatus::InFlight,
            read_set: Vec::new(),
            write_set: Vec::new(),
            cll: Vec::new(),
            commit_ts_lower_bound: 0,
            commit_ts: 0,
            backoff: Backoff::new(),
        }
    }

    fn unlock_cll(&mut self) {
        for key in self.cll.drain(..) {
            let rec = self.table.get(key);
            let current = rec.load_acquire();
            rec.store_release(current.unlocked());
        }
    }

    fn preemptive_abort(&mut self) {
        self.unlock_cll();
        self.status = TransactionStatus::Aborted;
    }
}

impl<'t> Executor for TicTocExecutor<'t> {
    fn begin(&mut self) {
        self.status = TransactionStatus::InFlight;
        self.read_set.clear();
        self.write_set.clear();
        self.cll.clear();
        self.commit_ts_lower_bound = 0;
        self.commit_ts = 0;
    }

    fn read(&mut self, key: Key) -> [u8; VAL_SIZE] {
        if let Some(e) = self.write_set.iter().find(|e| e.key == key) {
            return e.value;
        }
        if let Some(e) = self.read_set.iter().find(|e| e.key == key) {
            return e.value;
        }

        let rec = self.table.get(key);
        loop {
            if self.status == TransactionStatus::Aborted {
                return [0; VAL_SIZE];
            }

            let v1 = rec.load_acquire();
            if v1.is_locked() {
                if v1.rts() < self.commit_ts_lower_bound {
                    // This transaction can no longer be serialized against
                    // whatever the lock holder commits; waiting can only
                    // waste cycles.
                    self.preemptive_abort();
                    return [0; VAL_SIZE];
                }
                std::hint::spin_loop();
                continue;
            }

            let value = unsafe { rec.read_value_unchecked() };
            let v2 = rec.load_acquire();
            if v1 == v2 && !v2.is_locked() {
                self.commit_ts_lower_bound = self.commit_ts_lower_bound.max(v1.wts());
                self.read_set.push(ReadEntry { key, word: v1, value });
                return value;
            }
        }
    }

    fn write(&mut self, key: Key, value: [u8; VAL_SIZE]) {
        if let Some(e) = self.write_set.iter_mut().find(|e| e.key == key) {
            e.value = value;
            return;
        }
        self.write_set.push(WriteEntry {
            key,
            value,
            pre_word: TicTocTsWord::default(),
        });
    }

    fn validate(&mut self) -> bool {
        if self.status == TransactionStatus::Aborted {
            return false;
        }

        self.write_set.sort_by_key(|e| e.key);

        // A transaction with no reads has nothing a concurrent holder could
        // invalidate by outliving it, so it may wait out contention; a
        // transaction with reads must abort immediately on contention
        // instead (no-wait locking), since spinning here while holding part
        // of its write set locked is how TicToc deadlocks against a reader
        // elsewhere validating against the same records.
        let write_only = self.read_set.is_empty();

        // Step A: lock the write set in key order, capturing each record's
        // pre-lock word for the commit-timestamp computation and history.
        for w in &mut self.write_set {
            let rec = self.table.get(w.key);
            loop {
                let observed = rec.load_acquire();
                if observed.is_locked() {
                    if !write_only {
                        self.unlock_cll();
                        self.status = TransactionStatus::Aborted;
                        return false;
                    }
                    std::hint::spin_loop();
                    continue;
                }
                if rec.try_lock(observed).is_ok() {
                    w.pre_word = observed;
                    self.cll.push(w.key);
                    break;
                }
            }
        }

        // Compute the commit timestamp: past every write set record's rts
        // (so it comes after every reader of the pre-write version), and at
        // least the rts of everything read.
        let mut commit_ts = self.commit_ts_lower_bound;
        for w in &self.write_set {
            commit_ts = commit_ts.max(w.pre_word.rts() + 1);
        }
        for r in &self.read_set {
            commit_ts = commit_ts.max(r.word.rts());
        }

        // Validate the read set: version must be unchanged, and if the
        // commit timestamp exceeds what the record's rts already covers,
        // extend it (only possible while the record is unlocked by anyone
        // else).
        for r in &self.read_set {
            let in_write_set = self.write_set.iter().any(|w| w.key == r.key);
            if in_write_set {
                // We hold this record's lock via the write set; its wts at
                // lock time already stands in for the read-set check.
                continue;
            }

            let rec = self.table.get(r.key);
            loop {
                let current = rec.load_acquire();
                if current.wts() != r.word.wts() {
                    // The record was overwritten exactly once since this
                    // read. The overwriter's pre-image is in the history
                    // slot; if our commit_ts falls inside the gap between
                    // that pre-image's wts and the current wts, the value
                    // we read was still the visible one at commit_ts.
                    let pre = TicTocTsWord::from_raw(self.history.load_relaxed(r.key));
                    if pre.wts() <= commit_ts && commit_ts < current.wts() {
                        break;
                    }
                    self.unlock_cll();
                    self.status = TransactionStatus::Aborted;
                    return false;
                }
                if commit_ts <= current.rts() {
                    break;
                }
                if current.is_locked() {
                    self.unlock_cll();
                    self.status = TransactionStatus::Aborted;
                    return false;
                }
                let extended = current.extend(commit_ts);
                if rec.compare_exchange(current, extended).is_ok() {
                    break;
                }
                // Lost the race to a concurrent extension or lock; retry
                // against the fresh word.
            }
        }

        self.commit_ts = commit_ts;
        true
    }

    fn commit(&mut self) {
        for w in &self.write_set {
            let rec = self.table.get(w.key);
            self.history.store_relaxed(w.key, w.pre_word.to_raw());
            // SAFETY: this record is in `cll` — we hold its lock.
            unsafe { rec.write_value_unchecked(w.value) };
            rec.store_release(TicTocTsWord::committed(self.commit_ts));
        }
        self.status = TransactionStatus::Committed;
        self.read_set.clear();
        self.write_set.clear();
        self.cll.clear();
        self.backoff.reset();
    }

    fn abort(&mut self) {
        self.unlock_cll();
        self.read_set.clear();
        self.write_set.clear();
        self.status = TransactionStatus::Aborted;
        self.backoff.wait();
    }

    fn status(&self) -> TransactionStatus {
        self.status
    }
}

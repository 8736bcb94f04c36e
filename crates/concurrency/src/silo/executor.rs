//! The Silo per-worker transaction executor.

use std::sync::atomic::{AtomicU32, Ordering};

use cc_core::Key;
use cc_storage::{ControlWord, SiloTidWord, Table, VAL_SIZE};

use crate::backoff::Backoff;
use crate::executor::{Executor, TransactionStatus};

struct ReadEntry {
    key: Key,
    word: SiloTidWord,
    value: [u8; VAL_SIZE],
}

struct WriteEntry {
    key: Key,
    value: [u8; VAL_SIZE],
}

/// Silo's optimistic executor: epoch-stamped TIDs, spin-wait locking, and
/// no early abort during validation (§4.3).
pub struct SiloExecutor<'t> {
    table: &'t Table<SiloTidWord>,
    global_epoch: &'t AtomicU32,
    local_epoch: &'t AtomicU32,

    status: TransactionStatus,
    read_set: Vec<ReadEntry>,
    write_set: Vec<WriteEntry>,
    cll: Vec<Key>,

    last_commit_tid: u64,
    commit_word: SiloTidWord,
    backoff: Backoff,
}

impl<'t> SiloExecutor<'t> {
    /// Build an executor bound to `table` and this worker's slot in the
    /// shared epoch arrays.
    pub fn new(
        table: &'t Table<SiloTidWord>,
        global_epoch: &'t AtomicU32,
        local_epoch: &'t AtomicU32,
    ) -> Self {
        Self {
            table,
            global_epoch,
            local_epoch,
            status: TransactionStatus::InFlight,
            read_set: Vec::new(),
            write_set: Vec::new(),
            cll: Vec::new(),
            last_commit_tid: 0,
            commit_word: SiloTidWord::default(),
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
}

impl<'t> Executor for SiloExecutor<'t> {
    fn begin(&mut self) {
        self.status = TransactionStatus::InFlight;
        self.read_set.clear();
        self.write_set.clear();
        self.cll.clear();
        let epoch = self.global_epoch.load(Ordering::Acquire);
        self.local_epoch.store(epoch, Ordering::Release);
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
            let mut v1 = rec.load_acquire();
            while v1.is_locked() {
                std::hint::spin_loop();
                v1 = rec.load_acquire();
            }
            // SAFETY: v1 observed unlocked; validated against v2 below
            // before this copy is trusted.
            let value = unsafe { rec.read_value_unchecked() };
            let v2 = rec.load_acquire();
            if v1 == v2 && !v2.is_locked() {
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
        self.write_set.push(WriteEntry { key, value });
    }

    fn validate(&mut self) -> bool {
        self.write_set.sort_by_key(|e| e.key);

        // Step A: lock the write set in key order. Silo spin-waits on
        // contention rather than aborting early.
        let mut max_tid = 0u64;
        for w in &self.write_set {
            let rec = self.table.get(w.key);
            loop {
                let observed = rec.load_acquire();
                if observed.is_locked() {
                    std::hint::spin_loop();
                    continue;
                }
                if rec.try_lock(observed).is_ok() {
                    max_tid = max_tid.max(observed.tid());
                    self.cll.push(w.key);
                    break;
                }
            }
        }

        // Step B: the locking CAS above is the fence on x86-TSO.

        // Step C: observe the epoch once for this validation.
        let epoch = self.global_epoch.load(Ordering::Acquire);

        // Step D: validate the read set.
        for entry in &self.read_set {
            let rec = self.table.get(entry.key);
            let current = rec.load_acquire();
            let in_write_set = self.write_set.iter().any(|w| w.key == entry.key);
            let consistent = if in_write_set {
                current.unlocked() == entry.word.unlocked()
            } else {
                current == entry.word
            };
            if !consistent {
                self.unlock_cll();
                self.status = TransactionStatus::Aborted;
                return false;
            }
            max_tid = max_tid.max(entry.word.tid());
        }

        // Step E: commit tid.
        let tid = max_tid.max(self.last_commit_tid + 1);
        self.commit_word = SiloTidWord::new(false, tid, epoch);
        true
    }

    fn commit(&mut self) {
        for w in &self.write_set {
            let rec = self.table.get(w.key);
            // SAFETY: this record is in `cll` — we hold its lock.
            unsafe { rec.write_value_unchecked(w.value) };
            rec.store_release(self.commit_word);
        }
        self.last_commit_tid = self.commit_word.tid();
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

//! TicToc's per-record timestamp history.
//!
//! TicToc's validation sometimes needs to check a read against the
//! timestamp word a record held *before* its most recent commit — e.g. when
//! the record's `wts` has moved on since the transaction's read but the
//! write that moved it is itself not yet visible as final. The original
//! design keeps exactly one such prior word per record, populated only in
//! the commit write phase (never by an rts extension).

use std::sync::atomic::{AtomicU64, Ordering};

use cc_core::Key;

/// One prior timestamp-word slot per record.
pub struct TimestampHistory {
    slots: Vec<AtomicU64>,
}

impl TimestampHistory {
    /// Build a history table sized for `tuple_num` records, all slots
    /// initialized to zero (no prior word recorded).
    pub fn build(tuple_num: u64) -> Self {
        let mut slots = Vec::with_capacity(tuple_num as usize);
        slots.resize_with(tuple_num as usize, || AtomicU64::new(0));
        Self { slots }
    }

    /// Load the raw prior word for `key`.
    ///
    /// Relaxed ordering: the happens-before relationship a reader needs is
    /// established by the *new* committed word's release-store, which the
    /// reader must observe first via an acquire load before consulting
    /// history at all.
    pub fn load_relaxed(&self, key: Key) -> u64 {
        self.slots[key as usize].load(Ordering::Relaxed)
    }

    /// Overwrite the prior word for `key`.
    ///
    /// Must be called with the record locked, before the new word's
    /// release-store is published, so that store is ordered before any
    /// acquire-load that might consult this slot.
    pub fn store_relaxed(&self, key: Key, raw: u64) {
        self.slots[key as usize].store(raw, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let h = TimestampHistory::build(4);
        assert_eq!(h.load_relaxed(2), 0);
    }

    #[test]
    fn store_then_load_roundtrips() {
        let h = TimestampHistory::build(4);
        h.store_relaxed(1, 0xdead_beef);
        assert_eq!(h.load_relaxed(1), 0xdead_beef);
    }
}

//! The fixed-cardinality record table.
//!
//! Per scope: the key→record index itself (a direct array or a tree-based
//! secondary index) is an external collaborator. This table *is* the direct
//! array case — a dense integer key space `[0, tuple_num)` mapped straight
//! into a `Vec<Record<W>>` by index — which is the only index shape the
//! core needs to own.

use cc_core::Key;

use crate::control_word::ControlWord;
use crate::record::{Record, VAL_SIZE};

/// A fixed-cardinality table of records, indexed directly by key.
pub struct Table<W: ControlWord> {
    records: Vec<Record<W>>,
}

impl<W: ControlWord> Table<W> {
    /// Build a table of `tuple_num` records, each initialized via the given
    /// control-word and value constructors.
    pub fn build(
        tuple_num: u64,
        mut init_word: impl FnMut(Key) -> W,
        mut init_value: impl FnMut(Key) -> [u8; VAL_SIZE],
    ) -> Self {
        let mut records = Vec::with_capacity(tuple_num as usize);
        for key in 0..tuple_num {
            records.push(Record::new(key, init_word(key), init_value(key)));
        }
        Self { records }
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by key.
    ///
    /// Keys are always in `[0, len())` for a well-formed workload; this
    /// panics on out-of-range keys rather than returning `Option`, since a
    /// well-formed procedure generator never produces one and a bug here
    /// is a programming error, not a runtime condition to recover from.
    pub fn get(&self, key: Key) -> &Record<W> {
        &self.records[key as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_word::SiloTidWord;

    #[test]
    fn build_creates_requested_record_count() {
        let table = Table::build(10, |_| SiloTidWord::new(false, 0, 0), |_| [0; VAL_SIZE]);
        assert_eq!(table.len(), 10);
        assert!(!table.is_empty());
    }

    #[test]
    fn get_returns_record_with_matching_key() {
        let table = Table::build(10, |_| SiloTidWord::new(false, 0, 0), |_| [0; VAL_SIZE]);
        assert_eq!(table.get(3).key(), 3);
    }

    #[test]
    #[should_panic]
    fn get_panics_on_out_of_range_key() {
        let table = Table::build(4, |_| SiloTidWord::new(false, 0, 0), |_| [0; VAL_SIZE]);
        let _ = table.get(10);
    }
}

//! Uniform key-distribution workload generator.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cc_concurrency::Operation;
use cc_core::Key;
use cc_storage::VAL_SIZE;

use crate::generator::ProcedureGenerator;

/// Generates operations with keys drawn uniformly from `[0, tuple_num)` and
/// a read/write mix governed by `rratio` (percentage of reads, 0..=100).
pub struct UniformGenerator {
    rng: SmallRng,
    tuple_num: Key,
    rratio: u8,
}

impl UniformGenerator {
    /// Build a generator over `tuple_num` keys with the given read ratio.
    pub fn new(tuple_num: Key, rratio: u8) -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            tuple_num,
            rratio,
        }
    }
}

impl ProcedureGenerator for UniformGenerator {
    fn fill(&mut self, buffer: &mut [Operation]) {
        for slot in buffer.iter_mut() {
            let key = self.rng.gen_range(0..self.tuple_num);
            *slot = if self.rng.gen_range(0..100) < self.rratio {
                Operation::Read(key)
            } else {
                let mut value = [0u8; VAL_SIZE];
                self.rng.fill(&mut value);
                Operation::Write(key, value)
            };
        }
    }
}

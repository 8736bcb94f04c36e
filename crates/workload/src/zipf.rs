//! Zipfian key-distribution workload generator.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cc_concurrency::Operation;
use cc_core::Key;
use cc_storage::VAL_SIZE;

use crate::generator::ProcedureGenerator;

/// Generates operations with keys drawn from a Zipfian distribution over
/// `[0, tuple_num)`, via rejection sampling (Devroye's algorithm for
/// Zipf-distributed integers), and a read/write mix governed by `rratio`.
///
/// `skew` is in `[0, 1)`; it is mapped onto the Zipf exponent as
/// `1 + skew`, so `skew -> 0` approaches uniform and `skew -> 1` approaches
/// maximal hot-key skew.
pub struct ZipfGenerator {
    rng: SmallRng,
    tuple_num: Key,
    rratio: u8,
    exponent: f64,
}

impl ZipfGenerator {
    /// Build a generator over `tuple_num` keys with the given read ratio
    /// and Zipf skew.
    pub fn new(tuple_num: Key, rratio: u8, skew: f64) -> Self {
        debug_assert!((0.0..1.0).contains(&skew), "skew must be in [0, 1)");
        Self {
            rng: SmallRng::from_entropy(),
            tuple_num,
            rratio,
            exponent: 1.0 + skew,
        }
    }

    fn sample_key(&mut self) -> Key {
        // skew == 0 degenerates the rejection loop (division by zero in the
        // exponent term); a uniform draw is the correct limit anyway.
        if self.exponent <= 1.0 {
            return self.rng.gen_range(0..self.tuple_num);
        }

        let a = self.exponent;
        let b = 2f64.powf(a - 1.0);
        loop {
            let u: f64 = self.rng.gen_range(f64::EPSILON..1.0);
            let v: f64 = self.rng.gen();
            let x = u.powf(-1.0 / (a - 1.0)).floor();
            if x < 1.0 {
                continue;
            }
            let t = (1.0 + 1.0 / x).powf(a - 1.0);
            if v * x * (t - 1.0) / (b - 1.0) <= t / b {
                let key = (x as u64).saturating_sub(1);
                if key < self.tuple_num {
                    return key;
                }
            }
        }
    }
}

impl ProcedureGenerator for ZipfGenerator {
    fn fill(&mut self, buffer: &mut [Operation]) {
        for slot in buffer.iter_mut() {
            let key = self.sample_key();
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

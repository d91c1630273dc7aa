//! Deterministic seed mixing and a counter-based pseudo-random stream for map generation.

pub(super) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

/// Seed for one depth of a run; every floor of a tomb gets an independent stream.
pub fn derive_level_seed(run_seed: u64, depth: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(depth).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Sequential draws over `mix_seed_stream`; the n-th draw depends only on `(seed, n)`.
pub(super) struct SeedStream {
    seed: u64,
    counter: u64,
}

impl SeedStream {
    pub(super) fn new(seed: u64) -> Self {
        Self { seed, counter: 0 }
    }

    pub(super) fn next_u64(&mut self) -> u64 {
        let value = mix_seed_stream(self.seed, self.counter);
        self.counter += 1;
        value
    }

    /// Inclusive on both ends.
    pub(super) fn range(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        let range_size = (max_value - min_value) as u64 + 1;
        min_value + (self.next_u64() % range_size) as usize
    }

    pub(super) fn percent(&mut self, chance: u32) -> bool {
        self.next_u64() % 100 < u64::from(chance)
    }

    pub(super) fn weighted<T: Copy>(&mut self, table: &[(T, u32)]) -> Option<T> {
        let total: u64 = table.iter().map(|&(_, weight)| u64::from(weight)).sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.next_u64() % total;
        for &(value, weight) in table {
            let weight = u64::from(weight);
            if roll < weight {
                return Some(value);
            }
            roll -= weight;
        }
        None
    }
}

//! Run seed selection for the command-line tools.

use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSeed {
    pub value: u64,
    /// No seed was given, so one was drawn from the clock.
    pub generated: bool,
}

/// Uses the seed given on the command line, or a clock-derived one when none was given.
pub fn resolve_seed(cli_seed: Option<u64>) -> RunSeed {
    match cli_seed {
        Some(value) => RunSeed { value, generated: false },
        None => RunSeed { value: clock_seed(), generated: true },
    }
}

fn clock_seed() -> u64 {
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |elapsed| elapsed.as_nanos());
    scramble((nanos as u64) ^ ((nanos >> 64) as u64))
}

/// Splitmix64 finalizer; neighbouring clock readings land far apart.
fn scramble(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

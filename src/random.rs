//! Seeded random number generation.
//!
//! Every stochastic operator in the crate takes `&mut R: Rng`; runners
//! that own their generator build it here from a configured seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a reproducible generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

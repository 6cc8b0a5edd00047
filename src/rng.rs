//! Explicit random-generator construction.
//!
//! Networks never reach for a global source: callers build a generator here
//! and pass it by `&mut` into `Network::new`.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Offset mixed into a base seed per derived stream.
const DERIVATION_PRIME: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic generator for reproducible runs and tests.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generator seeded from operating-system entropy.
pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}

/// Independent stream for the `index`-th network of a seeded batch.
pub fn derive(base_seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(base_seed.wrapping_add((index as u64).wrapping_mul(DERIVATION_PRIME)))
}

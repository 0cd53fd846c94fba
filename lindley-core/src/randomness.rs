//! Randomness facade for deterministic simulation.
//!
//! Every run owns its generator. There is no module-level or global stream:
//! callers create a [`SimRng`] from a seed and pass it by `&mut` to the
//! sampling functions, so concurrent runs never share mutable state.

use rand::SeedableRng;

/// Generator used by simulation runs.
///
/// ChaCha8 is portable across platforms and releases, so a seed reproduces the
/// same trace everywhere.
pub type SimRng = rand_chacha::ChaCha8Rng;

/// Create a run generator from a seed.
pub fn rng_from_seed(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}

/// Derive the seed of the `index`-th sub-run from a base seed.
///
/// SplitMix64 finalizer; consecutive indices land far apart in seed space.
pub fn derive_seed(base: u64, index: u64) -> u64 {
    let mut x = base.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

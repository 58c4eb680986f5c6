//! Session random source and the sampling helpers built on it.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// The single pseudo-random stream a session draws from.
pub type GameRng = ChaCha8Rng;

pub fn seeded(seed: u64) -> GameRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub fn random_index(rng: &mut GameRng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

/// Uniform sample in `[0, 1)` from the top 53 bits of one draw.
pub fn random_unit(rng: &mut GameRng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
}

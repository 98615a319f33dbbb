// Random sources for gameplay effects (spin-outs, camera shake)

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed values in [-1, 1]
pub trait RandomSource {
    fn signed_unit(&mut self) -> f32;
}

/// Seeded random source used by the running game
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn signed_unit(&mut self) -> f32 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

/// Random source that always yields the same value
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f32);

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn signed_unit(&mut self) -> f32 {
        self.0
    }
}

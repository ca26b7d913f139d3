use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable random source injected into every operation that draws
/// randomness (spawn colors, shuffle permutation, forced-pair choice),
/// so a recorded seed reproduces a whole playout.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_color(&mut self, number_of_colors: u8) -> u8 {
        self.rng.random_range(0..number_of_colors)
    }

    /// Uniform index into a collection of length `len`; `len` must be > 0.
    pub fn random_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

//! Deterministic random number generation for dealing.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same deal
//! - **Uniform shuffle**: Fisher–Yates via `rand::seq::SliceRandom`
//!
//! ```
//! use pair_match::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut left = vec![1, 2, 3, 4, 5, 6];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG owned by a single game session.
///
/// ChaCha8, so a seed reproduces the same deal on every platform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    ///
    /// Every permutation of the input is equally likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

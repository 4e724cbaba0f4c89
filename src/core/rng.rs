//! Seeded randomness for dealing tile decks.
//!
//! The rules themselves are deterministic; the only random step is the order
//! the catalog is dealt in. `GameRng` wraps ChaCha8 so that a seed always
//! deals the same decks.
//!
//! ```
//! use stoneage_tiles::core::GameRng;
//!
//! let mut a = GameRng::new(2024);
//! let mut b = GameRng::new(2024);
//! let mut deck_a: Vec<u32> = (0..20).collect();
//! let mut deck_b = deck_a.clone();
//! a.shuffle(&mut deck_a);
//! b.shuffle(&mut deck_b);
//! assert_eq!(deck_a, deck_b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle in place, advancing the stream.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

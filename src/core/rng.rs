//! Dice and card-draw randomness.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical dice and draws
//! - **Context streams**: Dice rolls and card draws use independent sequences,
//!   so drawing a card never shifts the dice that follow
//! - **Replaceable**: The engine only sees [`RandomSource`]; tests plug in
//!   [`LoadedDice`] to script exact faces
//!
//! ```
//! use monopoly_engine::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll_die(), b.roll_die());
//! ```

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Faces on one die.
pub const DIE_FACES: u8 = 6;

/// Source of dice faces and uniform deck picks.
pub trait RandomSource {
    /// One die face in `1..=6`.
    fn roll_die(&mut self) -> u8;

    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Seedable ChaCha8 randomness with separate streams for dice and cards.
#[derive(Clone, Debug)]
pub struct GameRng {
    dice: ChaCha8Rng,
    cards: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            dice: ChaCha8Rng::seed_from_u64(context_seed(seed, "dice")),
            cards: ChaCha8Rng::seed_from_u64(context_seed(seed, "cards")),
            seed,
        }
    }

    /// Seed from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed when given, entropy otherwise.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

fn context_seed(seed: u64, context: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    context.hash(&mut hasher);
    hasher.finish()
}

impl RandomSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.dice.gen_range(1..=DIE_FACES)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.cards.gen_range(0..len)
    }
}

/// Scripted faces for tests and demonstrations.
///
/// Faces are consumed in order; once exhausted every die shows 1 and 2
/// alternately, which never forms doubles. Card picks cycle through the
/// scripted indices, defaulting to 0.
#[derive(Clone, Debug, Default)]
pub struct LoadedDice {
    faces: VecDeque<u8>,
    picks: VecDeque<usize>,
    fallback_toggle: bool,
}

impl LoadedDice {
    /// Create with no scripted faces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the two faces of one roll.
    #[must_use]
    pub fn then_roll(mut self, d1: u8, d2: u8) -> Self {
        self.push_roll(d1, d2);
        self
    }

    /// Queue a deck pick.
    #[must_use]
    pub fn then_pick(mut self, index: usize) -> Self {
        self.picks.push_back(index);
        self
    }

    /// Queue the two faces of one roll on an existing source.
    pub fn push_roll(&mut self, d1: u8, d2: u8) {
        assert!((1..=DIE_FACES).contains(&d1) && (1..=DIE_FACES).contains(&d2), "die faces are 1..=6");
        self.faces.push_back(d1);
        self.faces.push_back(d2);
    }

    /// Scripted faces not yet consumed.
    #[must_use]
    pub fn remaining_faces(&self) -> usize {
        self.faces.len()
    }
}

impl RandomSource for LoadedDice {
    fn roll_die(&mut self) -> u8 {
        self.faces.pop_front().unwrap_or_else(|| {
            self.fallback_toggle = !self.fallback_toggle;
            if self.fallback_toggle { 1 } else { 2 }
        })
    }

    fn pick(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len
    }
}

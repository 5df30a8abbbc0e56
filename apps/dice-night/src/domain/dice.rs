//! Random source abstraction for die faces, turn-order shuffles and spin hints.
//!
//! Every random draw the game makes goes through [`RandomSource`], so a session
//! can be driven by a seeded generator in production and by a fixed script in
//! tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::rules::{DIE_FACES, EXTRA_TURNS};

/// Source of uniform integers for the game.
pub trait RandomSource {
    /// One die face, uniform in `1..=6`.
    fn roll_die(&mut self) -> u8;

    /// Uniform index in `0..=max` (used by the Fisher-Yates shuffle).
    fn index_up_to(&mut self, max: usize) -> usize;

    /// Extra full turns for a die's spin animation. Not part of game logic.
    fn extra_turns(&mut self) -> u8;
}

/// Production source backed by a ChaCha8 generator.
pub struct SeededDice {
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl SeededDice {
    /// `Some(seed)` reproduces a run exactly; `None` draws a fresh seed from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_seed(rand::random()),
        };
        Self { rng, seed }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomSource for SeededDice {
    fn roll_die(&mut self) -> u8 {
        self.rng.random_range(DIE_FACES)
    }

    fn index_up_to(&mut self, max: usize) -> usize {
        self.rng.random_range(0..=max)
    }

    fn extra_turns(&mut self) -> u8 {
        self.rng.random_range(EXTRA_TURNS)
    }
}

/// Deterministic source that replays a fixed list of faces.
///
/// Faces cycle when exhausted. Shuffle picks default to `max`, which keeps the
/// roster in its given order; spin hints are always the minimum.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    next_face: usize,
    picks: Vec<usize>,
    next_pick: usize,
}

impl ScriptedDice {
    pub fn new(faces: Vec<u8>) -> Self {
        debug_assert!(faces.iter().all(|f| DIE_FACES.contains(f)));
        Self {
            faces,
            ..Self::default()
        }
    }

    /// Script the shuffle as well. Each pick is clamped to the allowed bound.
    pub fn with_picks(mut self, picks: Vec<usize>) -> Self {
        self.picks = picks;
        self
    }

    /// Faces handed out so far.
    pub fn faces_used(&self) -> usize {
        self.next_face
    }
}

impl RandomSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        if self.faces.is_empty() {
            return *DIE_FACES.start();
        }
        let face = self.faces[self.next_face % self.faces.len()];
        self.next_face += 1;
        face
    }

    fn index_up_to(&mut self, max: usize) -> usize {
        match self.picks.get(self.next_pick) {
            Some(&pick) => {
                self.next_pick += 1;
                pick.min(max)
            }
            None => max,
        }
    }

    fn extra_turns(&mut self) -> u8 {
        *EXTRA_TURNS.start()
    }
}

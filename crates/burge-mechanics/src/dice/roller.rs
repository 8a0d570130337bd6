//! Sources of die faces.
//!
//! Everything that throws dice takes a [`DiceRoller`], so the percentile
//! engine and advancement rolls can run against a seeded RNG in production
//! and a fixed script in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Die;

/// Produces one face per call, in `1..=die.sides()`.
pub trait DiceRoller {
    /// Roll a single die.
    fn face(&mut self, die: Die) -> u32;
}

impl<T: DiceRoller + ?Sized> DiceRoller for &mut T {
    fn face(&mut self, die: Die) -> u32 {
        (**self).face(die)
    }
}

/// A roller backed by a random number generator.
#[derive(Debug, Clone)]
pub struct RngRoller<R = StdRng> {
    rng: R,
}

impl RngRoller<StdRng> {
    /// A deterministic roller for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A roller seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl<R: Rng> RngRoller<R> {
    /// Wrap an existing RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DiceRoller for RngRoller<R> {
    fn face(&mut self, die: Die) -> u32 {
        self.rng.random_range(1..=die.sides())
    }
}

/// Replays a fixed list of faces, cycling when the script runs out.
///
/// Faces are clamped into the range of the die being rolled, so a script
/// of `[10]` reads as 10 on a d10 and as 10 on a d100. An empty script
/// always rolls 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    faces: Vec<u32>,
    cursor: usize,
}

impl ScriptedRoller {
    /// Create a roller that yields `faces` in order.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of faces handed out so far.
    pub fn rolled(&self) -> usize {
        self.cursor
    }
}

impl DiceRoller for ScriptedRoller {
    fn face(&mut self, die: Die) -> u32 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face.clamp(1, die.sides())
    }
}

//! RNG module - deterministic piece selection
//!
//! Piece kinds come from a [`PieceSource`] handed to the spawner, so a seed (or a
//! scripted sequence) fixes the whole game.
//!
//! - [`UniformSource`]: every kind equally likely on every draw
//! - [`BagSource`]: the "7-bag" randomizer; each bag holds one of each piece,
//!   shuffled, and is drawn empty before the next one is generated
//! - [`Cycle`]: replays a fixed list, for tests and demos
//!
//! All of them sit on [`SimpleRng`], a small LCG that is stable across platforms.

use serde::Deserialize;

use crate::types::PieceKind;

/// Supplies the kind of each newly spawned piece
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG cycle quickly; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Uniform random piece selection
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagSource {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl BagSource {
    /// Create a new bag source with the given seed
    pub fn new(seed: u32) -> Self {
        let mut source = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        source.refill_bag();
        source
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl PieceSource for BagSource {
    fn next_kind(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }
}

/// Replays a fixed sequence of kinds, wrapping around at the end
#[derive(Debug, Clone)]
pub struct Cycle {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl Cycle {
    /// An empty list falls back to a single O piece
    pub fn new(kinds: Vec<PieceKind>) -> Self {
        let kinds = if kinds.is_empty() {
            vec![PieceKind::O]
        } else {
            kinds
        };
        Self { kinds, index: 0 }
    }
}

impl PieceSource for Cycle {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}

/// Which randomizer a session uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomizerKind {
    #[default]
    Uniform,
    Bag,
}

/// Runtime-selected randomizer
#[derive(Debug, Clone)]
pub enum Randomizer {
    Uniform(UniformSource),
    Bag(BagSource),
}

impl Randomizer {
    pub fn new(kind: RandomizerKind, seed: u32) -> Self {
        match kind {
            RandomizerKind::Uniform => Randomizer::Uniform(UniformSource::new(seed)),
            RandomizerKind::Bag => Randomizer::Bag(BagSource::new(seed)),
        }
    }
}

impl PieceSource for Randomizer {
    fn next_kind(&mut self) -> PieceKind {
        match self {
            Randomizer::Uniform(source) => source.next_kind(),
            Randomizer::Bag(source) => source.next_kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        assert_eq!(SimpleRng::new(0).state, 1);
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_uniform_source_reaches_every_kind() {
        let mut source = UniformSource::new(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[source.next_kind().index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_uniform_source_is_reproducible() {
        let mut a = UniformSource::new(99);
        let mut b = UniformSource::new(99);
        for _ in 0..50 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut source = BagSource::new(1);
        assert_eq!(source.remaining().len(), 7);

        let mut drawn = Vec::new();
        for _ in 0..7 {
            drawn.push(source.next_kind());
        }

        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
        assert!(source.remaining().is_empty());
    }

    #[test]
    fn test_bag_auto_refill() {
        let mut source = BagSource::new(1);
        for _ in 0..8 {
            source.next_kind();
        }
        assert_eq!(source.remaining().len(), 6);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut source = Cycle::new(vec![PieceKind::I, PieceKind::T]);
        assert_eq!(source.next_kind(), PieceKind::I);
        assert_eq!(source.next_kind(), PieceKind::T);
        assert_eq!(source.next_kind(), PieceKind::I);

        let mut fallback = Cycle::new(Vec::new());
        assert_eq!(fallback.next_kind(), PieceKind::O);
    }
}

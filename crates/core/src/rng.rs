//! RNG module - injectable piece selection
//!
//! Piece kinds are drawn uniformly and independently: no bag, so the same kind
//! can come up several times in a row. The random source is a value owned by
//! the session rather than process-global state, which keeps piece sequences
//! reproducible from a seed.

use crate::types::ShapeKind;

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of a power-of-two LCG
    /// cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Supplies the kind of each newly spawned piece.
pub trait PieceSource {
    fn next_kind(&mut self) -> ShapeKind;
}

/// Uniform, independent draws over the seven kinds.
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

    /// Current RNG state (a seed that continues the sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> ShapeKind {
        let idx = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }
}

/// Replays a fixed sequence of kinds, wrapping around at the end.
///
/// Meant for scripted scenarios and tests.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<ShapeKind>,
    pos: usize,
}

impl ScriptedSource {
    /// Returns `None` for an empty script.
    pub fn new(kinds: impl Into<Vec<ShapeKind>>) -> Option<Self> {
        let kinds = kinds.into();
        if kinds.is_empty() {
            return None;
        }
        Some(Self { kinds, pos: 0 })
    }

    /// Always yields `kind`.
    pub fn repeat(kind: ShapeKind) -> Self {
        Self {
            kinds: vec![kind],
            pos: 0,
        }
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> ShapeKind {
        let kind = self.kinds[self.pos];
        self.pos = (self.pos + 1) % self.kinds.len();
        kind
    }
}

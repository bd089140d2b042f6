//! Seeded random number generator.
//!
//! xorshift32: small, fast and reproducible from a seed, which keeps whole
//! sessions replayable in tests.

use glam::Vec2;

use crate::physics::WorldBounds;

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Seeded random number generator using the xorshift32 algorithm.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Creates a new RNG with the given seed.
    /// Seed of 0 is treated as 1 to avoid the all-zero fixed point.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Returns the raw u32 value from the RNG.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a random float in [0, 1).
    pub fn next(&mut self) -> f32 {
        // Top 24 bits fit an f32 mantissa exactly, so 1.0 is never produced.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a random integer from 0 (inclusive) to max (exclusive).
    pub fn next_int(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Returns a random float in the range [min, max).
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }

    /// Uniform point inside `bounds` shrunk by `margin` on every side.
    ///
    /// A margin larger than half the bounds collapses to the center.
    pub fn point_in(&mut self, bounds: &WorldBounds, margin: f32) -> Vec2 {
        let margin = margin.min(bounds.width() * 0.5).min(bounds.height() * 0.5);
        Vec2::new(
            self.next_range(bounds.min.x + margin, bounds.max.x - margin),
            self.next_range(bounds.min.y + margin, bounds.max.y - margin),
        )
    }

    /// Random lowercase alphanumeric string, used for peer identifiers.
    pub fn alphanumeric(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| ALPHANUMERIC[self.next_int(ALPHANUMERIC.len() as u32) as usize] as char)
            .collect()
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(1)
    }
}

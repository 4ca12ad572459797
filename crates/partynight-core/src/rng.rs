//! Random source abstraction.
//!
//! Engines never call `rand` directly: every draw goes through [`GameRng`]
//! so tests can script exact outcomes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait GameRng: Send {
    /// Random `u32` in `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Random `f32` in `[min, max)`. Returns `min` when the range is empty.
    fn next_f32_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        // Narrowing to f32 can round up onto `max`.
        let value = (f64::from(min) + self.next_f64() * (f64::from(max) - f64::from(min))) as f32;
        value.min(largest_below(max)).max(min)
    }

    /// Random index into a collection of `len` items. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        self.next_u32_range(0, len.saturating_sub(1) as u32) as usize
    }
}

/// Largest finite `f32` strictly less than `x`.
fn largest_below(x: f32) -> f32 {
    if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f32::from_bits(1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

/// In-place Fisher-Yates shuffle/// In-place Fisher-Yates shuffle driven by a [`GameRng`].
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn GameRng) {
    for i in (1..items.len()).rev() {
        let j = rng.next_u32_range(0, i as u32) as usize;
        items.swap(i, j);
    }
}

/// Production RNG backed by `StdRng`.
pub struct StdGameRng {
    inner: StdRng,
}

impl StdGameRng {
    /// Seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl GameRng for StdGameRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.inner.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}

/// Boxed RNG handed to engines.
pub type BoxedRng = Box<dyn GameRng>;

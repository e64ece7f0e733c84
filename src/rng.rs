//! Pluggable random sources
//!
//! Every source yields `f64` values in `[0, 1)`. Gameplay code takes a
//! `&mut impl RandomSource` so production can use [`SystemRandom`] while
//! tests and replays swap in [`XorShiftRandom`] or [`SequenceRandom`].

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SEED;

/// Uniform value generator in `[0, 1)`
pub trait RandomSource {
    /// Next value, always in `[0, 1)`
    fn next(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next(&mut self) -> f64 {
        (**self).next()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next(&mut self) -> f64 {
        (**self).next()
    }
}

/// Map `next()` to an integer in `[0, max_exclusive)`.
///
/// Ranges of 0 or 1 return 0 without consuming a value.
pub fn random_int<R: RandomSource + ?Sized>(rng: &mut R, max_exclusive: u32) -> u32 {
    if max_exclusive <= 1 {
        return 0;
    }
    let value = (rng.next() * f64::from(max_exclusive)).floor() as u32;
    // Float rounding can land exactly on the bound for large ranges
    value.min(max_exclusive - 1)
}

/// Platform entropy, not reproducible
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn next(&mut self) -> f64 {
        rand::random::<f64>()
    }
}

/// Xorshift32 generator: same seed, same sequence, on every platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XorShiftRandom {
    state: u32,
}

impl XorShiftRandom {
    /// Zero is the xorshift fixed point and would emit 0 forever, so it maps to 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Current internal state (for save/replay)
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Raw 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl Default for XorShiftRandom {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for XorShiftRandom {
    fn next(&mut self) -> f64 {
        const SPAN: u32 = u32::MAX;
        f64::from(self.next_u32() % SPAN) / f64::from(SPAN)
    }
}

/// Replays a fixed script of values, wrapping at the end.
///
/// Values already in `[0, 1)` pass through untouched so test fixtures read
/// literally. Anything else finite maps to its fractional part (negative
/// fractions wrap, so `-0.3` becomes `0.7`). Non-finite entries and an empty
/// script yield 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values consumed so far (keeps counting across wraps)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn normalize(raw: f64) -> f64 {
        if !raw.is_finite() {
            return 0.0;
        }
        if (0.0..1.0).contains(&raw) {
            return raw;
        }
        let frac = raw.fract();
        let mapped = if frac >= 0.0 { frac } else { frac + 1.0 };
        // -1e-20 + 1.0 rounds to 1.0
        if mapped < 1.0 { mapped } else { 0.0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let raw = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        Self::normalize(raw)
    }
}

/// Adapter for any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<Pcg32> {
    /// Seeded PCG stream, reproducible across platforms
    pub fn pcg(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

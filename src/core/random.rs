//! Injectable randomness.
//!
//! Source sampling and the verdict/confidence perturbations all draw from a
//! [`RandomSource`], so callers can seed or pin every draw.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of the bounded random draws used by the engine
pub trait RandomSource {
    /// Uniform integer in `[low, high]`
    fn int_in(&mut self, low: i64, high: i64) -> i64;

    /// Uniform float in `[low, high]`
    fn float_in(&mut self, low: f64, high: f64) -> f64;

    /// `amount` distinct indices from `0..len`, in selection order
    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize>;

    /// Uniform index into a non-empty slice of length `len`
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.int_in(0, len as i64 - 1) as usize
    }
}

/// Adapter from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn int_in(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        self.0.gen_range(low..=high)
    }

    fn float_in(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.0.gen_range(low..=high)
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, len, amount.min(len)).into_vec()
    }
}

/// Thread-local generator, for synchronous callers
pub type ThreadRandom = RngSource<ThreadRng>;

/// Seeded generator; `Send`, so it can live across an await
pub type SeededRandom = RngSource<StdRng>;

pub fn thread_random() -> ThreadRandom {
    RngSource::new(rand::thread_rng())
}

pub fn seeded_random(seed: u64) -> SeededRandom {
    RngSource::new(StdRng::seed_from_u64(seed))
}

pub fn entropy_random() -> SeededRandom {
    RngSource::new(StdRng::from_entropy())
}

/// Deterministic source returning pinned values clamped into each range.
///
/// `sample_indices` always picks the first `amount` indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandom {
    pub int: i64,
    pub float: f64,
}

impl FixedRandom {
    pub fn new(int: i64, float: f64) -> Self {
        Self { int, float }
    }

    /// Every draw lands on the low end (or zero noise for symmetric ranges)
    pub fn zero() -> Self {
        Self::default()
    }
}

impl RandomSource for FixedRandom {
    fn int_in(&mut self, low: i64, high: i64) -> i64 {
        self.int.clamp(low, high.max(low))
    }

    fn float_in(&mut self, low: f64, high: f64) -> f64 {
        self.float.clamp(low, high.max(low))
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        (0..amount.min(len)).collect()
    }
}

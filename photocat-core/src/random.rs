//! Random sources for simulation noise
//!
//! Everything stochastic in the core draws through [`RandomSource`]:
//! - Any `rand::Rng` (production uses an entropy- or seed-initialized `StdRng`)
//! - [`ScriptedSource`] for tests that need exact, hand-picked draws
//!
//! Draw contract:
//! - `uniform(low, high)` returns a float in `[low, high]`
//! - `randint(low, high)` returns an integer in `[low, high]` (both inclusive)
//! - `chance(p)` returns `true` with probability `p`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of random draws used by the simulator, twin and adaptor
pub trait RandomSource {
    /// Uniform float in `[low, high]`
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in `[low, high]`, both ends inclusive
    fn randint(&mut self, low: u32, high: u32) -> u32;

    /// Bernoulli trial with success probability `probability`
    fn chance(&mut self, probability: f64) -> bool;
}

impl<R: Rng> RandomSource for R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.gen_range(low..=high)
    }

    fn randint(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.gen_range(low..=high)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Reproducible generator for a given seed
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generator seeded from OS entropy
pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}

/// Scripted source for testing
///
/// Each draw pops the next queued value:
/// - `uniform` returns it clamped into `[low, high]`
/// - `randint` rounds it and clamps into `[low, high]`
/// - `chance` succeeds when it is below the probability
///
/// Once the script runs out the source turns neutral: `uniform` returns the
/// midpoint, `randint` the upper bound and `chance` always fails.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<f64>,
    consumed: usize,
}

impl ScriptedSource {
    /// Source replaying `draws` in order
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Queue more draws behind the remaining ones
    pub fn extend(&mut self, draws: impl IntoIterator<Item = f64>) {
        self.draws.extend(draws);
    }

    /// Number of draws taken so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Draws still queued
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    fn next(&mut self) -> Option<f64> {
        let draw = self.draws.pop_front();
        if draw.is_some() {
            self.consumed += 1;
        }
        draw
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        match self.next() {
            Some(value) => crate::util::clamp_to(value, low, high),
            None => low + (high - low) / 2.0,
        }
    }

    fn randint(&mut self, low: u32, high: u32) -> u32 {
        match self.next() {
            Some(value) => (value.round().max(0.0) as u32).clamp(low.min(high), high.max(low)),
            None => high,
        }
    }

    fn chance(&mut self, probability: f64) -> bool {
        match self.next() {
            Some(value) => value < probability,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_draws_respect_bounds() {
        let mut rng = seeded(7);
        for _ in 0..1_000 {
            let x = rng.uniform(-0.05, 0.05);
            assert!((-0.05..=0.05).contains(&x));
            let q = rng.randint(80, 100);
            assert!((80..=100).contains(&q));
        }
    }

    #[test]
    fn degenerate_ranges_return_low() {
        let mut rng = seeded(1);
        assert_eq!(rng.uniform(3.0, 3.0), 3.0);
        assert_eq!(rng.randint(5, 5), 5);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = seeded(99);
        let mut b = seeded(99);
        for _ in 0..10 {
            assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
        }
    }

    #[test]
    fn scripted_source_replays_and_clamps() {
        let mut src = ScriptedSource::new([0.5, 120.0, 0.01, 7.0]);
        assert_eq!(src.uniform(0.0, 1.0), 0.5);
        assert_eq!(src.randint(80, 100), 100);
        assert!(src.chance(0.05));
        assert_eq!(src.uniform(0.0, 5.0), 5.0);
        assert_eq!(src.consumed(), 4);

        // exhausted: neutral behaviour
        assert_eq!(src.uniform(2.0, 4.0), 3.0);
        assert_eq!(src.randint(1, 9), 9);
        assert!(!src.chance(1.0));
    }
}

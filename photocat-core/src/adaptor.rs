//! Online parameter adaptation
//!
//! Simulates online tuning of the plant controller. Every call counts one new
//! observation; on every 100th observation the PID gains take a small random
//! step and are clamped back into their bounds. The learning hyperparameters
//! are reported but never perturbed.
//!
//! This is a literal heuristic, not reinforcement learning: the reading batch
//! is never consulted.
//!
//! ```rust
//! use photocat_core::ParameterAdaptor;
//!
//! let mut adaptor = ParameterAdaptor::seeded(7);
//! let initial = adaptor.parameters().clone();
//! for _ in 0..99 {
//!     adaptor.adapt();
//! }
//! assert_eq!(adaptor.parameters(), &initial);
//! assert!(adaptor.adapt().adjusted);
//! ```

use log::debug;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::{
    constants::adaptation::{
        ADAPTATION_CADENCE, BATCH_SIZE, DISCOUNT_FACTOR_INITIAL, EXPLORATION_RATE_INITIAL,
        KD_BOUNDS, KD_INITIAL, KD_STEP, KI_BOUNDS, KI_INITIAL, KI_STEP, KP_BOUNDS, KP_INITIAL,
        KP_STEP, LEARNING_RATE_INITIAL, OPTIMAL_CONDITION_RANGE,
    },
    random::{self, RandomSource},
    util::clamp_to,
};

/// Controller gains plus learning hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector {
    /// Proportional gain
    pub kp: f64,
    /// Integral gain
    pub ki: f64,
    /// Derivative gain
    pub kd: f64,
    /// Learning rate, never perturbed
    pub learning_rate: f64,
    /// Discount factor, never perturbed
    pub discount_factor: f64,
    /// Exploration rate, never perturbed
    pub exploration_rate: f64,
}

impl Default for ParameterVector {
    fn default() -> Self {
        Self {
            kp: KP_INITIAL,
            ki: KI_INITIAL,
            kd: KD_INITIAL,
            learning_rate: LEARNING_RATE_INITIAL,
            discount_factor: DISCOUNT_FACTOR_INITIAL,
            exploration_rate: EXPLORATION_RATE_INITIAL,
        }
    }
}

impl ParameterVector {
    /// True when every gain lies inside its configured bounds
    pub fn within_bounds(&self) -> bool {
        let inside = |value: f64, (lo, hi): (f64, f64)| value >= lo && value <= hi;
        inside(self.kp, KP_BOUNDS) && inside(self.ki, KI_BOUNDS) && inside(self.kd, KD_BOUNDS)
    }
}

/// State after one `adapt` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationReport {
    #[serde(flatten)]
    pub parameters: ParameterVector,
    /// Observations counted so far, this one included
    pub learning_samples: u64,
    /// Whether this call perturbed the gains
    pub adjusted: bool,
    /// Fixed training batch size
    pub batch_size: u32,
    /// Optimal-condition parameter count drawn for this call
    pub optimal_condition_params: u32,
}

/// Bounded parameter vector with cadence-driven perturbation
pub struct ParameterAdaptor<R = StdRng> {
    parameters: ParameterVector,
    samples: u64,
    rng: R,
}

impl ParameterAdaptor<StdRng> {
    /// Adaptor with an entropy-seeded generator
    pub fn new() -> Self {
        Self::with_source(random::from_entropy())
    }

    /// Reproducible adaptor for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(random::seeded(seed))
    }
}

impl Default for ParameterAdaptor<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> ParameterAdaptor<R> {
    /// Adaptor with an injected random source
    pub fn with_source(rng: R) -> Self {
        Self {
            parameters: ParameterVector::default(),
            samples: 0,
            rng,
        }
    }

    /// Count one observation and perturb the gains on the cadence
    pub fn adapt(&mut self) -> AdaptationReport {
        self.samples += 1;

        let adjusted = self.samples % ADAPTATION_CADENCE == 0;
        if adjusted {
            self.perturb();
        }

        let (low, high) = OPTIMAL_CONDITION_RANGE;
        AdaptationReport {
            parameters: self.parameters.clone(),
            learning_samples: self.samples,
            adjusted,
            batch_size: BATCH_SIZE,
            optimal_condition_params: self.rng.randint(low, high),
        }
    }

    /// Current parameter vector
    pub fn parameters(&self) -> &ParameterVector {
        &self.parameters
    }

    /// Observations counted so far
    pub fn samples(&self) -> u64 {
        self.samples
    }

    fn perturb(&mut self) {
        let p = &mut self.parameters;
        p.kp = clamp_to(p.kp + self.rng.uniform(-KP_STEP, KP_STEP), KP_BOUNDS.0, KP_BOUNDS.1);
        p.ki = clamp_to(p.ki + self.rng.uniform(-KI_STEP, KI_STEP), KI_BOUNDS.0, KI_BOUNDS.1);
        p.kd = clamp_to(p.kd + self.rng.uniform(-KD_STEP, KD_STEP), KD_BOUNDS.0, KD_BOUNDS.1);

        debug!(
            "parameters adjusted at sample {}: kp={:.4} ki={:.4} kd={:.4}",
            self.samples, p.kp, p.ki, p.kd
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    #[test]
    fn ninety_nine_calls_leave_vector_untouched() {
        let mut adaptor = ParameterAdaptor::seeded(11);
        for i in 1..=99 {
            let report = adaptor.adapt();
            assert_eq!(report.learning_samples, i);
            assert!(!report.adjusted);
            assert_eq!(report.parameters, ParameterVector::default());
        }
    }

    #[test]
    fn hundredth_call_applies_scripted_step() {
        // 99 optimal-condition draws, then kp/ki/kd steps, then the 100th draw
        let mut draws = vec![15.0; 99];
        draws.extend([0.05, -0.01, 0.005, 12.0]);
        let mut adaptor = ParameterAdaptor::with_source(ScriptedSource::new(draws));

        for _ in 0..99 {
            adaptor.adapt();
        }
        let report = adaptor.adapt();

        assert!(report.adjusted);
        assert_eq!(report.learning_samples, 100);
        assert!((report.parameters.kp - 2.90).abs() < 1e-9);
        assert!((report.parameters.ki - 0.41).abs() < 1e-9);
        assert!((report.parameters.kd - 0.185).abs() < 1e-9);
        assert_eq!(report.parameters.learning_rate, LEARNING_RATE_INITIAL);
        assert_eq!(report.optimal_condition_params, 12);
    }

    #[test]
    fn report_carries_fixed_payload() {
        let report = ParameterAdaptor::seeded(3).adapt();
        assert_eq!(report.batch_size, 32);
        assert!((10..=20).contains(&report.optimal_condition_params));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kp"], 2.85);
        assert_eq!(json["learning_samples"], 1);
    }

    #[test]
    fn gains_stay_bounded_over_long_runs() {
        let mut adaptor = ParameterAdaptor::seeded(2025);
        for _ in 0..50_000 {
            let report = adaptor.adapt();
            assert!(report.parameters.within_bounds());
        }
        assert_eq!(adaptor.samples(), 50_000);
    }
}

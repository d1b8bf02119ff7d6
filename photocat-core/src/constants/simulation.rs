//! Random-Walk Simulation Parameters
//!
//! The simulator evolves each channel as a bounded multiplicative random
//! walk. These constants describe the size of each step, the secondary trend
//! bias and how often a reading is deliberately degraded.

// ===== RANDOM WALK =====

/// Maximum relative step applied to the last value on each call.
///
/// The step factor is drawn uniformly from `[-RANDOM_WALK_STEP, +RANDOM_WALK_STEP]`
/// and applied as `last * (1 + step)`.
pub const RANDOM_WALK_STEP: f64 = 0.05;

// ===== TREND BIAS =====

/// Lower bound of the falling drift factor (pollution channel).
pub const FALLING_DRIFT_MIN: f64 = -0.01;

/// Upper bound of the falling drift factor.
///
/// Smaller in magnitude than the lower bound, so the expected drift is
/// downward.
pub const FALLING_DRIFT_MAX: f64 = 0.005;

/// Lower bound of the rising drift factor (efficiency-style channels).
pub const RISING_DRIFT_MIN: f64 = -0.005;

/// Upper bound of the rising drift factor.
pub const RISING_DRIFT_MAX: f64 = 0.01;

// ===== DEGRADATION =====

/// Probability that a single `generate` call degrades its reading.
pub const ANOMALY_PROBABILITY: f64 = 0.05;

/// Conditional probability that a degraded reading also carries an
/// out-of-range value.
pub const ANOMALY_VALUE_PROBABILITY: f64 = 0.3;

/// Anomalous values are drawn from `[min * ANOMALY_FLOOR_FACTOR, min]`.
pub const ANOMALY_FLOOR_FACTOR: f64 = 0.5;

// ===== OUTPUT =====

/// Decimal places kept on emitted reading values.
pub const VALUE_DECIMALS: i32 = 2;

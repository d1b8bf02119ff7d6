//! Parameter Adaptation Defaults and Bounds
//!
//! The adaptor keeps a PID-style gain set plus learning hyperparameters and
//! perturbs the gains once every [`ADAPTATION_CADENCE`] samples.

/// Number of samples between two perturbations.
pub const ADAPTATION_CADENCE: u64 = 100;

/// Initial proportional gain.
pub const KP_INITIAL: f64 = 2.85;
/// Initial integral gain.
pub const KI_INITIAL: f64 = 0.42;
/// Initial derivative gain.
pub const KD_INITIAL: f64 = 0.18;
/// Initial learning rate.
pub const LEARNING_RATE_INITIAL: f64 = 0.01;
/// Initial discount factor.
pub const DISCOUNT_FACTOR_INITIAL: f64 = 0.95;
/// Initial exploration rate.
pub const EXPLORATION_RATE_INITIAL: f64 = 0.085;

/// Proportional gain bounds.
pub const KP_BOUNDS: (f64, f64) = (0.5, 5.0);
/// Integral gain bounds.
pub const KI_BOUNDS: (f64, f64) = (0.1, 2.0);
/// Derivative gain bounds.
pub const KD_BOUNDS: (f64, f64) = (0.05, 1.0);

/// Maximum absolute perturbation of `kp` per adjustment.
pub const KP_STEP: f64 = 0.05;
/// Maximum absolute perturbation of `ki` per adjustment.
pub const KI_STEP: f64 = 0.01;
/// Maximum absolute perturbation of `kd` per adjustment.
pub const KD_STEP: f64 = 0.005;

/// Training batch size reported with every adaptation.
pub const BATCH_SIZE: u32 = 32;

/// Range of the "optimal condition parameters" count reported per call.
pub const OPTIMAL_CONDITION_RANGE: (u32, u32) = (10, 20);

//! Fusion Weights and Projection Factors
//!
//! The composite signal is a fixed weighted average over five channels.
//! Energy does not take part in fusion; it feeds the digital twin instead.

use crate::channel::Channel;

/// Fusion weight per channel. Weights sum to 1.0.
pub const FUSION_WEIGHTS: [(Channel, f64); 5] = [
    (Channel::Flow, 0.15),
    (Channel::Pollution, 0.35),
    (Channel::Light, 0.10),
    (Channel::Ph, 0.20),
    (Channel::Temperature, 0.20),
];

/// Illustrative process/measurement noise `(q, r)` per fused channel.
///
/// Reported alongside the estimate for display. Nothing is filtered with it.
pub const NOISE_COVARIANCE: [(Channel, f64, f64); 5] = [
    (Channel::Flow, 0.01, 0.1),
    (Channel::Pollution, 0.02, 0.15),
    (Channel::Light, 0.01, 0.08),
    (Channel::Ph, 0.01, 0.09),
    (Channel::Temperature, 0.01, 0.05),
];

/// Decimal places kept on the fused value.
pub const FUSION_VALUE_DECIMALS: i32 = 2;

/// Decimal places kept on the fused confidence.
pub const FUSION_CONFIDENCE_DECIMALS: i32 = 1;

// ===== DIGITAL TWIN =====

/// Expected relative pollution after one horizon (3% reduction).
pub const TWIN_POLLUTION_FACTOR: f64 = 0.97;

/// Expected relative efficiency after one horizon (2% gain).
pub const TWIN_EFFICIENCY_FACTOR: f64 = 1.02;

/// Pollution assumed when the batch has no pollution reading (ppm).
pub const TWIN_DEFAULT_POLLUTION: f64 = 150.0;

/// Energy efficiency assumed when the batch has no energy reading (%).
pub const TWIN_DEFAULT_EFFICIENCY: f64 = 70.0;

/// System health as a fraction of mean data quality.
pub const TWIN_HEALTH_FACTOR: f64 = 0.95;

/// Placeholder remaining-life band (%).
pub const TWIN_REMAINING_LIFE_MIN: f64 = 85.0;

/// Upper end of the placeholder remaining-life band (%).
pub const TWIN_REMAINING_LIFE_MAX: f64 = 95.0;

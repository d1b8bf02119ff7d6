//! Data-Quality Bands and Fault Thresholds
//!
//! Quality is an integer percentage attached to every reading. Healthy
//! readings sit in `[80, 100]`; a degraded reading drops into `[50, 79]`.

/// Lowest quality a healthy reading can carry.
pub const QUALITY_NORMAL_MIN: u8 = 80;

/// Highest quality a reading can carry.
pub const QUALITY_NORMAL_MAX: u8 = 100;

/// Lowest quality a degraded reading can carry.
pub const QUALITY_DEGRADED_MIN: u8 = 50;

/// Highest quality a degraded reading can carry.
///
/// Kept strictly below [`QUALITY_FAULT_THRESHOLD`] so every injected anomaly
/// is also reported by the diagnoser.
pub const QUALITY_DEGRADED_MAX: u8 = 79;

/// Readings below this quality raise a fault.
pub const QUALITY_FAULT_THRESHOLD: u8 = 80;

/// Faults below this quality are high severity and carry a compensation value.
pub const QUALITY_HIGH_SEVERITY_THRESHOLD: u8 = 70;

/// Suggested compensation as a fraction of the degraded reading.
pub const COMPENSATION_FACTOR: f64 = 0.95;

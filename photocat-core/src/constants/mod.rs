//! Constants for the Photocat Telemetry Core
//!
//! Every tuning number used by the simulator, the diagnoser, the fusion
//! estimator, the digital twin and the parameter adaptor lives here so the
//! heuristics can be read in one place.
//!
//! ## Organization
//!
//! - **Simulation**: random-walk step sizes, drift bands, anomaly odds
//! - **Quality**: data-quality bands and fault thresholds
//! - **Fusion**: channel weights and the illustrative noise table
//! - **Adaptation**: parameter vector defaults, bounds and cadence

/// Random-walk and anomaly-injection parameters for the sensor simulator.
pub mod simulation;

/// Data-quality bands and fault classification thresholds.
pub mod quality;

/// Fusion weights, noise covariance and digital-twin projection factors.
pub mod fusion;

/// Parameter vector defaults, bounds and adaptation cadence.
pub mod adaptation;

pub use simulation::{
    RANDOM_WALK_STEP, ANOMALY_PROBABILITY, ANOMALY_VALUE_PROBABILITY,
    VALUE_DECIMALS,
};

pub use quality::{
    QUALITY_NORMAL_MIN, QUALITY_NORMAL_MAX, QUALITY_DEGRADED_MIN,
    QUALITY_FAULT_THRESHOLD, QUALITY_HIGH_SEVERITY_THRESHOLD,
};

pub use adaptation::ADAPTATION_CADENCE;

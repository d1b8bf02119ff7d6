//! Quality-based fault diagnosis
//!
//! Flags every reading whose data quality fell below the healthy band.
//! The diagnoser is stateless: the same batch always yields the same faults,
//! in input order, with no deduplication across calls. Resolution of a fault
//! is an external action; the diagnoser only ever creates `Active` records.
//!
//! | quality   | fault   | severity | compensation   |
//! |-----------|---------|----------|----------------|
//! | ≥ 80      | none    |          |                |
//! | 70 – 79   | warning | medium   | none           |
//! | < 70      | warning | high     | value × 0.95   |

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::quality::{
        COMPENSATION_FACTOR, QUALITY_FAULT_THRESHOLD, QUALITY_HIGH_SEVERITY_THRESHOLD,
    },
    reading::Reading,
};

/// Kind of fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultType {
    /// Sensor failure
    Error,
    /// Degraded data
    Warning,
    /// Informational notice
    Info,
}

/// How urgently a fault needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No action needed soon
    Low,
    /// Check when convenient
    Medium,
    /// Needs attention now
    High,
}

/// Lifecycle state of a fault record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultStatus {
    /// Open and unhandled
    Active,
    /// Closed by an operator
    Resolved,
    /// Being looked at
    Investigating,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        })
    }
}

/// Fault raised against one sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultRecord {
    /// Component name, `<channel>_sensor`
    pub component: String,
    /// Kind of fault
    pub fault_type: FaultType,
    /// Human-readable summary naming the channel and its quality
    pub description: String,
    /// Urgency
    pub severity: Severity,
    /// Lifecycle state
    pub status: FaultStatus,
    /// Suggested replacement value, only for high-severity faults
    pub compensation_value: Option<f64>,
}

/// Threshold-based diagnoser
#[derive(Debug, Clone)]
pub struct FaultDiagnoser {
    fault_threshold: u8,
    high_severity_threshold: u8,
    compensation_factor: f64,
}

impl Default for FaultDiagnoser {
    fn default() -> Self {
        Self {
            fault_threshold: QUALITY_FAULT_THRESHOLD,
            high_severity_threshold: QUALITY_HIGH_SEVERITY_THRESHOLD,
            compensation_factor: COMPENSATION_FACTOR,
        }
    }
}

impl FaultDiagnoser {
    /// Diagnoser with custom thresholds
    pub fn new_with_thresholds(fault_threshold: u8, high_severity_threshold: u8) -> Self {
        // high severity must sit inside the fault band
        let high_severity_threshold = high_severity_threshold.min(fault_threshold);
        Self {
            fault_threshold,
            high_severity_threshold,
            compensation_factor: COMPENSATION_FACTOR,
        }
    }

    /// One fault per degraded reading, in input order
    pub fn diagnose<'a, I>(&self, readings: I) -> Vec<FaultRecord>
    where
        I: IntoIterator<Item = &'a Reading>,
    {
        readings
            .into_iter()
            .filter_map(|reading| self.check(reading))
            .collect()
    }

    /// Fault for a single reading, if its quality is degraded
    pub fn check(&self, reading: &Reading) -> Option<FaultRecord> {
        if reading.quality >= self.fault_threshold {
            return None;
        }

        let high = reading.quality < self.high_severity_threshold;
        Some(FaultRecord {
            component: format!("{}_sensor", reading.channel),
            fault_type: FaultType::Warning,
            description: format!(
                "{} sensor data quality low ({}%)",
                reading.channel, reading.quality
            ),
            severity: if high { Severity::High } else { Severity::Medium },
            status: FaultStatus::Active,
            compensation_value: high.then(|| reading.value * self.compensation_factor),
        })
    }
}

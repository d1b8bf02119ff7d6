//! Shared fixtures for the core integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use photocat_core::{
    ChannelTable, FixedClock, ParameterAdaptor, ScriptedSource, SensorSimulator, TelemetryPipeline,
};

/// Start of every fixture timeline
pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, 15)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid fixture date")
}

/// Simulator over the default table driven by a scripted source
pub fn scripted_simulator(draws: Vec<f64>) -> SensorSimulator<ScriptedSource, FixedClock> {
    SensorSimulator::with_source(
        ChannelTable::default(),
        ScriptedSource::new(draws),
        FixedClock::new(start_time()),
    )
}

/// Fully seeded pipeline on a fixed clock
pub fn fixed_pipeline(seed: u64) -> TelemetryPipeline<rand::rngs::StdRng, FixedClock> {
    TelemetryPipeline::from_parts(
        SensorSimulator::with_source(
            ChannelTable::default(),
            photocat_core::random::seeded(seed),
            FixedClock::new(start_time()),
        ),
        ParameterAdaptor::seeded(seed + 1),
        photocat_core::random::seeded(seed + 2),
    )
}

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let diff = ($actual - $expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                $actual, $tolerance, $expected, diff
            );
        }
    };
}

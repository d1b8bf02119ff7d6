//! Digital-twin projection
//!
//! A simple forward projection from the current batch. There is
//! no physical model behind it: pollution is expected to fall 3%, efficiency to
//! rise 2%, health tracks mean data quality and remaining life is a placeholder
//! draw.

use serde::{Deserialize, Serialize};

use crate::{
    channel::Channel,
    constants::fusion::{
        TWIN_DEFAULT_EFFICIENCY, TWIN_DEFAULT_POLLUTION, TWIN_EFFICIENCY_FACTOR,
        TWIN_HEALTH_FACTOR, TWIN_POLLUTION_FACTOR, TWIN_REMAINING_LIFE_MAX,
        TWIN_REMAINING_LIFE_MIN,
    },
    errors::{CoreError, CoreResult},
    random::RandomSource,
    reading::Reading,
    util::{mean, round_to},
};

/// Short-horizon projection, every field rounded to one decimal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinProjection {
    /// Expected pollutant concentration
    pub predicted_pollution: f64,
    /// Expected efficiency
    pub predicted_efficiency: f64,
    /// Mean data quality scaled to a health score
    pub system_health: f64,
    /// Remaining service life placeholder, percent
    pub remaining_life: f64,
}

/// Heuristic near-future predictor
#[derive(Debug, Clone, Default)]
pub struct DigitalTwinPredictor;

impl DigitalTwinPredictor {
    /// Stateless predictor
    pub fn new() -> Self {
        Self
    }

    /// Project the batch forward
    ///
    /// Fails with `NoData` on an empty batch, where system health is undefined.
    pub fn predict<'a, I, R>(&self, readings: I, rng: &mut R) -> CoreResult<TwinProjection>
    where
        I: IntoIterator<Item = &'a Reading>,
        R: RandomSource + ?Sized,
    {
        let mut pollution = None;
        let mut energy = None;
        let mut qualities = Vec::new();

        for reading in readings {
            match reading.channel {
                Channel::Pollution => pollution = Some(reading.value),
                Channel::Energy => energy = Some(reading.value),
                _ => {}
            }
            qualities.push(f64::from(reading.quality));
        }

        let mean_quality = mean(&qualities).ok_or(CoreError::NoData {
            operation: "digital twin prediction",
        })?;

        let pollution = pollution.unwrap_or(TWIN_DEFAULT_POLLUTION);
        let efficiency = energy.unwrap_or(TWIN_DEFAULT_EFFICIENCY);
        let remaining_life = rng.uniform(TWIN_REMAINING_LIFE_MIN, TWIN_REMAINING_LIFE_MAX);

        Ok(TwinProjection {
            predicted_pollution: round_to(pollution * TWIN_POLLUTION_FACTOR, 1),
            predicted_efficiency: round_to(efficiency * TWIN_EFFICIENCY_FACTOR, 1),
            system_health: round_to(mean_quality * TWIN_HEALTH_FACTOR, 1),
            remaining_life: round_to(remaining_life, 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{seeded, ScriptedSource};
    use chrono::NaiveDate;

    fn reading(channel: Channel, value: f64, quality: u8) -> Reading {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        Reading::new(channel, value, "", quality, ts)
    }

    #[test]
    fn projects_pollution_and_efficiency() {
        let batch = [
            reading(Channel::Pollution, 160.0, 90),
            reading(Channel::Energy, 70.0, 90),
        ];
        let mut rng = ScriptedSource::new([90.04]);
        let projection = DigitalTwinPredictor::new().predict(&batch, &mut rng).unwrap();

        assert_eq!(projection.predicted_pollution, 155.2);
        assert_eq!(projection.predicted_efficiency, 71.4);
        assert_eq!(projection.system_health, 85.5);
        assert_eq!(projection.remaining_life, 90.0);
    }

    #[test]
    fn missing_channels_fall_back_to_defaults() {
        let batch = [reading(Channel::Flow, 25.0, 80)];
        let projection = DigitalTwinPredictor::new()
            .predict(&batch, &mut seeded(1))
            .unwrap();

        assert_eq!(projection.predicted_pollution, 145.5);
        assert_eq!(projection.predicted_efficiency, 71.4);
        assert_eq!(projection.system_health, 76.0);
        assert!((85.0..=95.0).contains(&projection.remaining_life));
    }

    #[test]
    fn empty_batch_is_no_data() {
        let empty: [Reading; 0] = [];
        let result = DigitalTwinPredictor::new().predict(&empty, &mut seeded(1));
        assert!(matches!(result, Err(CoreError::NoData { .. })));
    }
}

//! Weighted multi-sensor fusion
//!
//! Combines a fixed weighted subset of channels into one composite value and
//! one composite confidence:
//!
//! ```text
//! value      = Σ(valueᵢ · wᵢ)   / Σwᵢ
//! confidence = Σ(qualityᵢ · wᵢ) / Σwᵢ
//! ```
//!
//! Sums run over weighted channels present in the batch only, so a missing
//! channel renormalizes the rest. A batch with none of them fuses to `(0, 0)`.
//! The weights and the illustrative noise table are static and returned with
//! every estimate for display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    channel::Channel,
    constants::fusion::{
        FUSION_CONFIDENCE_DECIMALS, FUSION_VALUE_DECIMALS, FUSION_WEIGHTS, NOISE_COVARIANCE,
    },
    reading::Reading,
    util::round_to,
};

/// Process (`q`) and measurement (`r`) noise for one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseCovariance {
    /// Process noise
    pub q: f64,
    /// Measurement noise
    pub r: f64,
}

/// Result of one fusion pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionEstimate {
    /// Composite value, two decimals
    pub value: f64,
    /// Composite confidence in quality percent, one decimal
    pub confidence: f64,
    /// Weighted channels that contributed
    pub channels_used: usize,
    /// Static channel weights
    pub weights: BTreeMap<Channel, f64>,
    /// Static noise table
    pub noise: BTreeMap<Channel, NoiseCovariance>,
}

/// Fixed-weight fusion estimator
#[derive(Debug, Clone)]
pub struct FusionEstimator {
    weights: BTreeMap<Channel, f64>,
    noise: BTreeMap<Channel, NoiseCovariance>,
}

impl Default for FusionEstimator {
    fn default() -> Self {
        Self {
            weights: FUSION_WEIGHTS.iter().copied().collect(),
            noise: NOISE_COVARIANCE
                .iter()
                .map(|&(channel, q, r)| (channel, NoiseCovariance { q, r }))
                .collect(),
        }
    }
}

impl FusionEstimator {
    /// Estimator with the plant's fixed weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight for `channel`, `None` if it does not take part in fusion
    pub fn weight(&self, channel: Channel) -> Option<f64> {
        self.weights.get(&channel).copied()
    }

    /// Fuse a batch of readings
    pub fn fuse<'a, I>(&self, readings: I) -> FusionEstimate
    where
        I: IntoIterator<Item = &'a Reading>,
    {
        let mut value_sum = 0.0;
        let mut quality_sum = 0.0;
        let mut weight_sum = 0.0;
        let mut channels_used = 0;

        for reading in readings {
            let Some(weight) = self.weight(reading.channel) else {
                continue;
            };
            value_sum += reading.value * weight;
            quality_sum += f64::from(reading.quality) * weight;
            weight_sum += weight;
            channels_used += 1;
        }

        let (value, confidence) = if weight_sum > 0.0 {
            (value_sum / weight_sum, quality_sum / weight_sum)
        } else {
            (0.0, 0.0)
        };

        FusionEstimate {
            value: round_to(value, FUSION_VALUE_DECIMALS),
            confidence: round_to(confidence, FUSION_CONFIDENCE_DECIMALS),
            channels_used,
            weights: self.weights.clone(),
            noise: self.noise.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading(channel: Channel, value: f64, quality: u8) -> Reading {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        Reading::new(channel, value, "", quality, ts)
    }

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = FusionEstimator::default().weights.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn no_weighted_channels_fuses_to_zero() {
        let estimate = FusionEstimator::default().fuse(&[reading(Channel::Energy, 70.0, 95)]);
        assert_eq!(estimate.value, 0.0);
        assert_eq!(estimate.confidence, 0.0);
        assert_eq!(estimate.channels_used, 0);

        let empty: [Reading; 0] = [];
        let estimate = FusionEstimator::default().fuse(&empty);
        assert_eq!((estimate.value, estimate.confidence), (0.0, 0.0));
    }

    #[test]
    fn partial_batch_renormalizes() {
        // pollution 0.35 and ph 0.20
        let batch = [
            reading(Channel::Pollution, 150.0, 90),
            reading(Channel::Ph, 7.0, 80),
            reading(Channel::Energy, 70.0, 10),
        ];
        let estimate = FusionEstimator::default().fuse(&batch);

        let expected_value = (150.0 * 0.35 + 7.0 * 0.20) / 0.55;
        let expected_conf = (90.0 * 0.35 + 80.0 * 0.20) / 0.55;
        assert_eq!(estimate.value, round_to(expected_value, 2));
        assert_eq!(estimate.confidence, round_to(expected_conf, 1));
        assert_eq!(estimate.channels_used, 2);
    }

    #[test]
    fn identical_readings_fuse_to_themselves() {
        let batch: Vec<_> = FUSION_WEIGHTS
            .iter()
            .map(|&(channel, _)| reading(channel, 42.0, 88))
            .collect();
        let estimate = FusionEstimator::default().fuse(&batch);
        assert_eq!(estimate.value, 42.0);
        assert_eq!(estimate.confidence, 88.0);
    }

    #[test]
    fn static_tables_are_reported() {
        let estimate = FusionEstimator::default().fuse(&[reading(Channel::Flow, 25.0, 90)]);
        assert_eq!(estimate.weights.get(&Channel::Pollution), Some(&0.35));
        assert_eq!(
            estimate.noise.get(&Channel::Temperature),
            Some(&NoiseCovariance { q: 0.01, r: 0.05 })
        );
        assert!(!estimate.weights.contains_key(&Channel::Energy));
    }
}

//! Summary and per-period statistics

use std::collections::BTreeMap;

use photocat_core::{
    util::{mean, round_to},
    Channel, Reading,
};
use serde::{Deserialize, Serialize};

use crate::bucket::AggregateBucket;

/// Descriptive statistics over bucket values, two decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of values
    pub count: usize,
    /// Mean
    pub mean: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Sample standard deviation, 0 for fewer than two values
    pub std: f64,
}

/// Statistics for one channel over one period, two decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodStatistic {
    /// Mean
    pub mean: f64,
    /// Number of readings
    pub count: usize,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

/// Summary over the values of `buckets`, `None` when there are none
pub fn summary_statistics(buckets: &[AggregateBucket]) -> Option<SummaryStatistics> {
    let values: Vec<f64> = buckets.iter().map(|b| b.value).collect();
    let avg = mean(&values)?;
    let (min, max) = min_max(&values);

    Some(SummaryStatistics {
        count: values.len(),
        mean: round_to(avg, 2),
        min: round_to(min, 2),
        max: round_to(max, 2),
        std: round_to(sample_std(&values, avg), 2),
    })
}

/// Per-channel statistics of a period's readings
pub fn period_statistics<'a, I>(records: I) -> BTreeMap<Channel, PeriodStatistic>
where
    I: IntoIterator<Item = &'a Reading>,
{
    let mut by_channel: BTreeMap<Channel, Vec<f64>> = BTreeMap::new();
    for record in records {
        by_channel.entry(record.channel).or_default().push(record.value);
    }

    by_channel
        .into_iter()
        .filter_map(|(channel, values)| {
            let avg = mean(&values)?;
            let (min, max) = min_max(&values);
            Some((
                channel,
                PeriodStatistic {
                    mean: round_to(avg, 2),
                    count: values.len(),
                    min: round_to(min, 2),
                    max: round_to(max, 2),
                },
            ))
        })
        .collect()
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Bessel-corrected standard deviation
fn sample_std(values: &[f64], avg: f64) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

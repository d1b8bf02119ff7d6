//! Period-over-period comparison

use std::collections::BTreeMap;

use photocat_core::{util::round_to, Channel};
use serde::{Deserialize, Serialize};

use crate::stats::PeriodStatistic;

/// Direction of change between two periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// B above A
    Up,
    /// B below A
    Down,
    /// No change, or A is zero
    Flat,
}

/// Mean-to-mean change for a channel present in both periods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangeSummary {
    /// Mean in period A
    pub period_a_mean: f64,
    /// Mean in period B
    pub period_b_mean: f64,
    /// Percentage change from A to B, one decimal
    pub change: f64,
    /// Direction of the change
    pub trend: Direction,
}

/// One channel's comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    /// Statistics for period A, if the channel appears there
    pub period_a: Option<PeriodStatistic>,
    /// Statistics for period B, if the channel appears there
    pub period_b: Option<PeriodStatistic>,
    /// Only set when the channel appears in both periods
    pub change: Option<ChangeSummary>,
}

/// Compare every channel that appears in either period
pub fn compare_periods(
    a: &BTreeMap<Channel, PeriodStatistic>,
    b: &BTreeMap<Channel, PeriodStatistic>,
) -> BTreeMap<Channel, PeriodComparison> {
    a.keys()
        .chain(b.keys())
        .copied()
        .map(|channel| {
            let period_a = a.get(&channel).copied();
            let period_b = b.get(&channel).copied();
            let change = period_a
                .zip(period_b)
                .map(|(sa, sb)| change_between(sa.mean, sb.mean));
            (
                channel,
                PeriodComparison {
                    period_a,
                    period_b,
                    change,
                },
            )
        })
        .collect()
}

fn change_between(a_mean: f64, b_mean: f64) -> ChangeSummary {
    let percent = if a_mean != 0.0 {
        (b_mean - a_mean) / a_mean * 100.0
    } else {
        0.0
    };

    let trend = if percent > 0.0 {
        Direction::Up
    } else if percent < 0.0 {
        Direction::Down
    } else {
        Direction::Flat
    };

    ChangeSummary {
        period_a_mean: a_mean,
        period_b_mean: b_mean,
        change: round_to(percent, 1),
        trend,
    }
}

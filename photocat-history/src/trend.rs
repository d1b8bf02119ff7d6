//! Long-run trend analysis
//!
//! Classifies first-to-last percentage change of daily series for the three
//! headline metrics. A change beyond ±0.5% counts as a movement; anything
//! inside the band is stable. Which direction is "improving" depends on the
//! metric: less pollutant and less energy are good, more efficiency is good.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use log::debug;
use photocat_core::{
    util::{mean, round_to},
    Channel, Reading,
};
use serde::{Deserialize, Serialize};

const MOVEMENT_THRESHOLD: f64 = 0.5;
const DAY_LABEL: &str = "%m-%d";

/// Headline metric tracked over days
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendMetric {
    /// Pollutant concentration
    Pollution,
    /// System efficiency
    Efficiency,
    /// Energy use
    Energy,
}

impl TrendMetric {
    /// Every metric in report order
    pub const ALL: [TrendMetric; 3] = [
        TrendMetric::Pollution,
        TrendMetric::Efficiency,
        TrendMetric::Energy,
    ];

    fn improves_when_rising(&self) -> bool {
        matches!(self, TrendMetric::Efficiency)
    }

    fn narrative(&self, outlook: Outlook) -> &'static str {
        match (self, outlook) {
            (TrendMetric::Pollution, Outlook::Improving) => "pollutant concentration is clearly falling",
            (TrendMetric::Pollution, Outlook::Worsening) => {
                "pollutant concentration is rising and needs attention"
            }
            (TrendMetric::Pollution, Outlook::Stable) => "pollutant concentration is stable",
            (TrendMetric::Efficiency, Outlook::Improving) => "system efficiency keeps improving",
            (TrendMetric::Efficiency, Outlook::Worsening) => {
                "system efficiency has dropped and needs inspection"
            }
            (TrendMetric::Efficiency, Outlook::Stable) => "system efficiency is stable",
            (TrendMetric::Energy, Outlook::Improving) => "energy use keeps being optimized",
            (TrendMetric::Energy, Outlook::Worsening) => "energy use has increased and needs optimization",
            (TrendMetric::Energy, Outlook::Stable) => "energy use is stable",
        }
    }
}

/// Qualitative reading of a metric's movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outlook {
    /// Moving in the good direction
    Improving,
    /// Within the ±0.5% band
    Stable,
    /// Moving in the bad direction
    Worsening,
}

/// Classification of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTrend {
    /// First-to-last change in percent, two decimals
    pub change_percent: f64,
    /// Qualitative reading of the change
    pub outlook: Outlook,
    /// Human-readable summary
    pub narrative: String,
}

/// Classification of every headline metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Classification per metric
    pub metrics: BTreeMap<TrendMetric, MetricTrend>,
    /// Narratives joined with "; "
    pub conclusion: String,
}

impl TrendReport {
    /// True when there was too little data to classify
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Daily means per channel, aligned on a shared date axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    /// Day labels, `MM-DD`, oldest first
    pub dates: Vec<String>,
    /// One value per date; 0 for days without samples of that channel
    pub series: BTreeMap<Channel, Vec<f64>>,
}

impl DailySeries {
    /// Series keyed by headline metric, ready for [`trend_classification`]
    ///
    /// Pollution and energy map to their channels. Efficiency has no channel
    /// of its own, so callers that track it insert it themselves.
    pub fn trend_inputs(&self) -> BTreeMap<TrendMetric, Vec<f64>> {
        [
            (TrendMetric::Pollution, Channel::Pollution),
            (TrendMetric::Energy, Channel::Energy),
        ]
        .into_iter()
        .filter_map(|(metric, channel)| Some((metric, self.series.get(&channel)?.clone())))
        .collect()
    }
}

/// First-to-last percentage change, 0 when undefined
pub fn percent_change(values: &[f64]) -> f64 {
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) if values.len() >= 2 && first != 0.0 => {
            (last - first) / first * 100.0
        }
        _ => 0.0,
    }
}

/// Classify each metric's series
///
/// Returns an empty report when the pollution series has fewer than two
/// points. A missing efficiency or energy series classifies as stable.
pub fn trend_classification(series: &BTreeMap<TrendMetric, Vec<f64>>) -> TrendReport {
    let pollution_points = series.get(&TrendMetric::Pollution).map_or(0, Vec::len);
    if pollution_points < 2 {
        debug!("trend classification skipped: {pollution_points} pollution points");
        return TrendReport::default();
    }

    let metrics: BTreeMap<TrendMetric, MetricTrend> = TrendMetric::ALL
        .iter()
        .map(|&metric| {
            let values = series.get(&metric).map_or(&[][..], Vec::as_slice);
            (metric, classify(metric, percent_change(values)))
        })
        .collect();

    let conclusion = metrics
        .values()
        .map(|trend| trend.narrative.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    TrendReport { metrics, conclusion }
}

fn classify(metric: TrendMetric, change: f64) -> MetricTrend {
    let outlook = if change.abs() <= MOVEMENT_THRESHOLD {
        Outlook::Stable
    } else if (change > 0.0) == metric.improves_when_rising() {
        Outlook::Improving
    } else {
        Outlook::Worsening
    };

    MetricTrend {
        change_percent: round_to(change, 2),
        outlook,
        narrative: metric.narrative(outlook).to_string(),
    }
}

/// Group readings by calendar day and average each channel per day
pub fn daily_trend_series<'a, I>(records: I) -> DailySeries
where
    I: IntoIterator<Item = &'a Reading>,
{
    let mut days: BTreeMap<NaiveDate, BTreeMap<Channel, Vec<f64>>> = BTreeMap::new();
    let mut channels: BTreeSet<Channel> = BTreeSet::new();

    for record in records {
        channels.insert(record.channel);
        days.entry(record.timestamp.date())
            .or_default()
            .entry(record.channel)
            .or_default()
            .push(record.value);
    }

    let dates: Vec<String> = days.keys().map(|d| d.format(DAY_LABEL).to_string()).collect();
    let series = channels
        .into_iter()
        .map(|channel| {
            let values: Vec<f64> = days
                .values()
                .map(|per_channel| {
                    per_channel
                        .get(&channel)
                        .and_then(|values| mean(values))
                        .map_or(0.0, |avg| round_to(avg, 1))
                })
                .collect();
            (channel, values)
        })
        .collect();

    DailySeries { dates, series }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(entries: &[(TrendMetric, &[f64])]) -> BTreeMap<TrendMetric, Vec<f64>> {
        entries.iter().map(|(m, v)| (*m, v.to_vec())).collect()
    }

    #[test]
    fn percent_change_guards() {
        assert_eq!(percent_change(&[]), 0.0);
        assert_eq!(percent_change(&[5.0]), 0.0);
        assert_eq!(percent_change(&[0.0, 5.0]), 0.0);
        assert_eq!(percent_change(&[100.0, 90.0]), -10.0);
    }

    #[test]
    fn half_percent_is_still_stable() {
        for metric in TrendMetric::ALL {
            assert_eq!(classify(metric, 0.5).outlook, Outlook::Stable);
            assert_eq!(classify(metric, -0.5).outlook, Outlook::Stable);
        }

        assert_eq!(classify(TrendMetric::Pollution, -0.51).outlook, Outlook::Improving);
        assert_eq!(classify(TrendMetric::Pollution, 0.51).outlook, Outlook::Worsening);
        assert_eq!(classify(TrendMetric::Efficiency, 0.51).outlook, Outlook::Improving);
        assert_eq!(classify(TrendMetric::Efficiency, -0.51).outlook, Outlook::Worsening);
        assert_eq!(classify(TrendMetric::Energy, -0.51).outlook, Outlook::Improving);
        assert_eq!(classify(TrendMetric::Energy, 0.51).outlook, Outlook::Worsening);
    }

    #[test]
    fn daily_series_feeds_classification() {
        let daily = DailySeries {
            dates: vec!["07-01".into(), "07-02".into()],
            series: BTreeMap::from([
                (Channel::Pollution, vec![160.0, 150.0]),
                (Channel::Energy, vec![70.0, 72.0]),
                (Channel::Flow, vec![25.0, 26.0]),
            ]),
        };
        let inputs = daily.trend_inputs();

        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[&TrendMetric::Pollution], vec![160.0, 150.0]);
        assert_eq!(inputs[&TrendMetric::Energy], vec![70.0, 72.0]);
        assert!(!inputs.contains_key(&TrendMetric::Efficiency));

        let report = trend_classification(&inputs);
        assert_eq!(report.metrics[&TrendMetric::Energy].outlook, Outlook::Worsening);
    }

    #[test]
    fn short_pollution_series_gives_empty_report() {
        let report = trend_classification(&series(&[(TrendMetric::Pollution, &[150.0])]));
        assert!(report.is_empty());
        assert!(report.conclusion.is_empty());
    }

    #[test]
    fn falling_pollution_and_rising_efficiency_improve() {
        let report = trend_classification(&series(&[
            (TrendMetric::Pollution, &[160.0, 150.0, 144.0]),
            (TrendMetric::Efficiency, &[80.0, 82.0]),
            (TrendMetric::Energy, &[70.0, 70.2]),
        ]));

        let pollution = &report.metrics[&TrendMetric::Pollution];
        assert_eq!(pollution.change_percent, -10.0);
        assert_eq!(pollution.outlook, Outlook::Improving);
        assert_eq!(report.metrics[&TrendMetric::Efficiency].outlook, Outlook::Improving);
        assert_eq!(report.metrics[&TrendMetric::Energy].outlook, Outlook::Stable);
        assert_eq!(
            report.conclusion,
            "pollutant concentration is clearly falling; system efficiency keeps improving; energy use is stable"
        );
    }

    #[test]
    fn rising_energy_worsens_and_missing_efficiency_is_stable() {
        let report = trend_classification(&series(&[
            (TrendMetric::Pollution, &[150.0, 152.0]),
            (TrendMetric::Energy, &[60.0, 66.0]),
        ]));
        assert_eq!(report.metrics[&TrendMetric::Pollution].outlook, Outlook::Worsening);
        assert_eq!(report.metrics[&TrendMetric::Efficiency].outlook, Outlook::Stable);
        assert_eq!(report.metrics[&TrendMetric::Energy].outlook, Outlook::Worsening);
        assert_eq!(report.metrics[&TrendMetric::Energy].change_percent, 10.0);
    }
}

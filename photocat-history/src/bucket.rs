//! Time-bucketed aggregation
//!
//! Groups readings by the hour or calendar day of their timestamp and
//! reports the mean of each bucket. Buckets come out in the order their first
//! reading was seen, so a chronologically sorted input gives chronologically
//! sorted buckets.

use core::fmt;
use core::str::FromStr;
use std::collections::HashMap;

use log::trace;
use photocat_core::{util::round_to, Reading};
use serde::{Deserialize, Serialize};

use crate::errors::HistoryError;

const HOURLY_KEY: &str = "%Y-%m-%d %H:00";
const DAILY_KEY: &str = "%Y-%m-%d";
const RAW_KEY: &str = "%Y-%m-%d %H:%M:%S";

/// Bucket width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per clock hour
    Hourly,
    /// One bucket per calendar day
    Daily,
    /// No grouping; one entry per reading
    Raw,
}

impl Granularity {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
            Granularity::Raw => "raw",
        }
    }

    fn key_format(&self) -> &'static str {
        match self {
            Granularity::Hourly => HOURLY_KEY,
            Granularity::Daily => DAILY_KEY,
            Granularity::Raw => RAW_KEY,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(Granularity::Hourly),
            "daily" => Ok(Granularity::Daily),
            "raw" => Ok(Granularity::Raw),
            other => Err(HistoryError::UnknownGranularity {
                name: other.to_string(),
            }),
        }
    }
}

/// One aggregated bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBucket {
    /// Formatted bucket start, or the full timestamp for raw entries
    pub bucket_key: String,
    /// Mean of the bucket, two decimals (raw entries keep the reading value)
    pub value: f64,
    /// Readings in the bucket
    pub count: usize,
    /// Only carried by raw entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Aggregate `records` into buckets of the given width
pub fn aggregate_by_bucket<'a, I>(records: I, granularity: Granularity) -> Vec<AggregateBucket>
where
    I: IntoIterator<Item = &'a Reading>,
{
    let format = granularity.key_format();

    if granularity == Granularity::Raw {
        return records
            .into_iter()
            .map(|r| AggregateBucket {
                bucket_key: r.timestamp.format(format).to_string(),
                value: r.value,
                count: 1,
                unit: Some(r.unit.clone()),
            })
            .collect();
    }

    // (key, sum, count) in first-seen order
    let mut groups: Vec<(String, f64, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = record.timestamp.format(format).to_string();
        match index.get(&key) {
            Some(&i) => {
                groups[i].1 += record.value;
                groups[i].2 += 1;
            }
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, record.value, 1));
            }
        }
    }

    trace!("aggregated into {} {granularity} buckets", groups.len());

    groups
        .into_iter()
        .map(|(bucket_key, sum, count)| AggregateBucket {
            bucket_key,
            value: round_to(sum / count as f64, 2),
            count,
            unit: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use photocat_core::{Channel, Timestamp};

    fn at(day: u32, hour: u32, minute: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    fn reading(value: f64, ts: Timestamp) -> Reading {
        Reading::new(Channel::Pollution, value, "ppm", 95, ts)
    }

    #[test]
    fn granularity_parses_known_names() {
        assert_eq!("hourly".parse::<Granularity>().unwrap(), Granularity::Hourly);
        assert_eq!("daily".parse::<Granularity>().unwrap(), Granularity::Daily);
        assert_eq!("raw".parse::<Granularity>().unwrap(), Granularity::Raw);
        assert!(matches!(
            "weekly".parse::<Granularity>(),
            Err(HistoryError::UnknownGranularity { .. })
        ));
    }

    #[test]
    fn hourly_buckets_average_and_keep_first_seen_order() {
        let records = vec![
            reading(150.0, at(2, 10, 5)),
            reading(140.0, at(2, 9, 59)),
            reading(152.0, at(2, 10, 45)),
        ];
        let buckets = aggregate_by_bucket(&records, Granularity::Hourly);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].bucket_key, "2024-05-02 10:00");
        assert_eq!(buckets[0].value, 151.0);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].bucket_key, "2024-05-02 09:00");
        assert_eq!(buckets[1].count, 1);
        assert!(buckets.iter().all(|b| b.unit.is_none()));
    }

    #[test]
    fn daily_means_are_rounded() {
        let records = vec![
            reading(1.0, at(3, 1, 0)),
            reading(1.0, at(3, 2, 0)),
            reading(2.0, at(3, 3, 0)),
        ];
        let buckets = aggregate_by_bucket(&records, Granularity::Daily);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].bucket_key, "2024-05-03");
        assert_eq!(buckets[0].value, 1.33);
    }

    #[test]
    fn raw_passes_readings_through() {
        let records = vec![reading(150.123, at(4, 12, 30))];
        let buckets = aggregate_by_bucket(&records, Granularity::Raw);
        assert_eq!(buckets[0].bucket_key, "2024-05-04 12:30:00");
        assert_eq!(buckets[0].value, 150.123);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[0].unit.as_deref(), Some("ppm"));
    }

    #[test]
    fn empty_input_gives_no_buckets() {
        assert!(aggregate_by_bucket(&Vec::<Reading>::new(), Granularity::Hourly).is_empty());
    }
}

//! Historical analysis over stored Photocat readings
//!
//! Everything here is a pure function over an ordered slice of readings that
//! the storage layer already loaded. Nothing is cached between calls.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use photocat_core::{Channel, Reading};
//! use photocat_history::{aggregate_by_bucket, summary_statistics, Granularity};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
//! let records = vec![
//!     Reading::new(Channel::Flow, 24.0, "cm/s", 95, day.and_hms_opt(9, 0, 0).unwrap()),
//!     Reading::new(Channel::Flow, 26.0, "cm/s", 91, day.and_hms_opt(15, 0, 0).unwrap()),
//! ];
//!
//! let buckets = aggregate_by_bucket(&records, "daily".parse::<Granularity>()?);
//! assert_eq!(buckets[0].value, 25.0);
//!
//! let stats = summary_statistics(&buckets).unwrap();
//! assert_eq!(stats.count, 1);
//! # Ok::<(), photocat_history::HistoryError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bucket;
pub mod compare;
pub mod errors;
pub mod export;
pub mod stats;
pub mod trend;
pub mod window;

pub use bucket::{aggregate_by_bucket, AggregateBucket, Granularity};
pub use compare::{compare_periods, ChangeSummary, Direction, PeriodComparison};
pub use errors::{HistoryError, HistoryResult};
pub use export::{to_csv, to_json};
pub use stats::{period_statistics, summary_statistics, PeriodStatistic, SummaryStatistics};
pub use trend::{
    daily_trend_series, percent_change, trend_classification, DailySeries, MetricTrend, Outlook,
    TrendMetric, TrendReport,
};
pub use window::within_window;

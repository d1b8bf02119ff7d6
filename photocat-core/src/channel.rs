//! Sensor channels and their simulation ranges
//!
//! The plant exposes a closed set of six channels. Each one has a legal value
//! range, a display unit and an optional trend bias. The table is supplied
//! once at startup and never changes afterwards.
//!
//! ```rust
//! use photocat_core::{Channel, ChannelTable};
//!
//! let table = ChannelTable::default();
//! let ph = table.get(Channel::Ph)?;
//! assert_eq!((ph.min, ph.max), (6.5, 7.5));
//!
//! let parsed: Channel = "pollution".parse()?;
//! assert_eq!(parsed, Channel::Pollution);
//! # Ok::<(), photocat_core::CoreError>(())
//! ```

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};

/// Simulated sensor category
///
/// Declaration order is the fixed channel order used by `generate_all` and
/// by every ordered map keyed on channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Water flow velocity
    Flow,
    /// Pollutant concentration
    Pollution,
    /// Illumination on the catalyst
    Light,
    /// Acidity
    Ph,
    /// Water temperature
    Temperature,
    /// Energy efficiency
    Energy,
}

impl Channel {
    /// Every channel in fixed order
    pub const ALL: [Channel; 6] = [
        Channel::Flow,
        Channel::Pollution,
        Channel::Light,
        Channel::Ph,
        Channel::Temperature,
        Channel::Energy,
    ];

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Flow => "flow",
            Channel::Pollution => "pollution",
            Channel::Light => "light",
            Channel::Ph => "ph",
            Channel::Temperature => "temperature",
            Channel::Energy => "energy",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .iter()
            .copied()
            .find(|channel| channel.as_str() == s)
            .ok_or_else(|| CoreError::UnknownChannel { name: s.to_string() })
    }
}

/// Secondary trend bias applied after the random-walk step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drift {
    /// No bias
    #[default]
    None,
    /// Net downward bias (pollutant concentration)
    Falling,
    /// Net upward bias (efficiency-style signals)
    Rising,
}

/// Static configuration of one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Lowest legal value
    pub min: f64,
    /// Highest legal value
    pub max: f64,
    /// Display unit
    #[serde(default)]
    pub unit: String,
    /// Trend bias
    #[serde(default)]
    pub drift: Drift,
}

impl ChannelConfig {
    /// Range with a unit and no drift
    pub fn new(min: f64, max: f64, unit: impl Into<String>) -> Self {
        Self {
            min,
            max,
            unit: unit.into(),
            drift: Drift::None,
        }
    }

    /// Same range with a trend bias
    pub fn with_drift(mut self, drift: Drift) -> Self {
        self.drift = drift;
        self
    }

    /// True if `value` is inside `[min, max]`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Range that injected anomalies are drawn from: `[min * 0.5, min]`
    pub fn anomaly_range(&self) -> (f64, f64) {
        let floor = self.min * crate::constants::simulation::ANOMALY_FLOOR_FACTOR;
        if floor <= self.min {
            (floor, self.min)
        } else {
            (self.min, floor)
        }
    }

    fn validate(&self, channel: Channel) -> CoreResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CoreError::InvalidConfig {
                reason: format!("{channel}: range bounds must be finite"),
            });
        }
        if self.min >= self.max {
            return Err(CoreError::InvalidConfig {
                reason: format!("{channel}: min {} must be below max {}", self.min, self.max),
            });
        }
        Ok(())
    }
}

/// Channel → configuration table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelTable {
    entries: BTreeMap<Channel, ChannelConfig>,
}

impl Default for ChannelTable {
    fn default() -> Self {
        let entries = BTreeMap::from([
            (Channel::Flow, ChannelConfig::new(20.0, 35.0, "cm/s")),
            (
                Channel::Pollution,
                ChannelConfig::new(140.0, 170.0, "ppm").with_drift(Drift::Falling),
            ),
            (Channel::Light, ChannelConfig::new(800.0, 950.0, "lux")),
            (Channel::Ph, ChannelConfig::new(6.5, 7.5, "")),
            (Channel::Temperature, ChannelConfig::new(24.0, 27.0, "°C")),
            (Channel::Energy, ChannelConfig::new(60.0, 75.0, "%")),
        ]);
        Self { entries }
    }
}

impl ChannelTable {
    /// Build a table from explicit entries, validating every range
    pub fn new(entries: impl IntoIterator<Item = (Channel, ChannelConfig)>) -> CoreResult<Self> {
        let table = Self {
            entries: entries.into_iter().collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Check every configured range
    pub fn validate(&self) -> CoreResult<()> {
        self.entries
            .iter()
            .try_for_each(|(channel, config)| config.validate(*channel))
    }

    /// Configuration for `channel`, or `UnknownChannel` if it is not configured
    pub fn get(&self, channel: Channel) -> CoreResult<&ChannelConfig> {
        self.entries
            .get(&channel)
            .ok_or_else(|| CoreError::UnknownChannel {
                name: channel.as_str().to_string(),
            })
    }

    /// Whether `channel` is configured
    pub fn contains(&self, channel: Channel) -> bool {
        self.entries.contains_key(&channel)
    }

    /// Configured channels in fixed order
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.entries.keys().copied()
    }

    /// Configured entries in fixed order
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &ChannelConfig)> {
        self.entries.iter().map(|(channel, config)| (*channel, config))
    }

    /// Number of configured channels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no channel is configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Sensor readings and reading sets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::time::Timestamp;

/// Single sensor reading
///
/// Produced by the simulator or loaded back from storage. Immutable once
/// created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Which sensor produced it
    pub channel: Channel,
    /// Measured value, two decimals
    pub value: f64,
    /// Display unit copied from the channel table
    pub unit: String,
    /// Data quality percentage (0-100)
    pub quality: u8,
    /// Wall-clock time of the reading
    pub timestamp: Timestamp,
}

impl Reading {
    /// Build a reading
    pub fn new(
        channel: Channel,
        value: f64,
        unit: impl Into<String>,
        quality: u8,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            channel,
            value,
            unit: unit.into(),
            quality,
            timestamp,
        }
    }

    /// Quality below the fault threshold
    pub fn is_degraded(&self) -> bool {
        self.quality < crate::constants::QUALITY_FAULT_THRESHOLD
    }
}

/// One reading per channel, iterated in fixed channel order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingSet {
    readings: BTreeMap<Channel, Reading>,
}

impl ReadingSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the reading for its channel
    pub fn insert(&mut self, reading: Reading) -> Option<Reading> {
        self.readings.insert(reading.channel, reading)
    }

    /// Reading for `channel`, if present
    pub fn get(&self, channel: Channel) -> Option<&Reading> {
        self.readings.get(&channel)
    }

    /// Value for `channel`, if present
    pub fn value(&self, channel: Channel) -> Option<f64> {
        self.get(channel).map(|reading| reading.value)
    }

    /// Readings in channel order
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.values()
    }

    /// Channels present, in channel order
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.readings.keys().copied()
    }

    /// Number of readings
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// True when the set holds no readings
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Flatten into a vector in channel order
    pub fn into_vec(self) -> Vec<Reading> {
        self.readings.into_values().collect()
    }
}

impl FromIterator<Reading> for ReadingSet {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        let mut set = ReadingSet::new();
        for reading in iter {
            set.insert(reading);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ReadingSet {
    type Item = &'a Reading;
    type IntoIter = std::collections::btree_map::Values<'a, Channel, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.values()
    }
}

impl IntoIterator for ReadingSet {
    type Item = Reading;
    type IntoIter = std::collections::btree_map::IntoValues<Channel, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.into_values()
    }
}

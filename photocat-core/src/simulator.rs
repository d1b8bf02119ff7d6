//! Stateful sensor simulator
//!
//! Stands in for the plant's sensor network. Each channel evolves as a bounded
//! multiplicative random walk, so consecutive readings are autocorrelated
//! instead of independent draws.
//!
//! ## Step Algorithm
//!
//! For one `generate(channel)` call, draws are taken in this order:
//!
//! ```text
//! 1. base     first call:  uniform(min, max)
//!             otherwise:   clamp(last * (1 + uniform(-0.05, 0.05)))
//! 2. drift    falling:     value *= 1 + uniform(-0.01, 0.005)
//!             rising:      value *= 1 + uniform(-0.005, 0.01)
//!             then clamp to [min, max]
//! 3. quality  randint(80, 100)
//! 4. degrade  chance(0.05) → quality = randint(50, 79)
//!                 chance(0.3) → value = uniform(min * 0.5, min)
//! 5. emit     value rounded to 2 decimals and clamped back into its band
//!             (range, or anomaly band), stored as the channel's last value
//! ```
//!
//! Step 4's anomalous value bypasses the clamp. It is the only
//! way a reading can leave `[min, max]`, and it always carries quality < 80.
//!
//! ```rust
//! use photocat_core::{Channel, ChannelTable, SensorSimulator};
//!
//! let mut sim = SensorSimulator::seeded(ChannelTable::default(), 42);
//! let first = sim.generate(Channel::Flow)?;
//! assert_eq!(sim.last_value(Channel::Flow), Some(first.value));
//!
//! let all = sim.generate_all()?;
//! assert_eq!(all.len(), 6);
//! # Ok::<(), photocat_core::CoreError>(())
//! ```

use std::collections::BTreeMap;

use log::{debug, trace};
use rand::rngs::StdRng;

use crate::{
    channel::{Channel, ChannelConfig, ChannelTable, Drift},
    constants::{
        quality::{QUALITY_DEGRADED_MAX, QUALITY_DEGRADED_MIN, QUALITY_NORMAL_MAX, QUALITY_NORMAL_MIN},
        simulation::{
            ANOMALY_PROBABILITY, ANOMALY_VALUE_PROBABILITY, FALLING_DRIFT_MAX, FALLING_DRIFT_MIN,
            RANDOM_WALK_STEP, RISING_DRIFT_MAX, RISING_DRIFT_MIN, VALUE_DECIMALS,
        },
    },
    errors::CoreResult,
    random::{self, RandomSource},
    reading::{Reading, ReadingSet},
    time::{Clock, SystemClock},
    util::{clamp_to, round_to},
};

/// Per-channel random-walk simulator
pub struct SensorSimulator<R = StdRng, C = SystemClock> {
    channels: ChannelTable,
    last_values: BTreeMap<Channel, f64>,
    rng: R,
    clock: C,
}

impl SensorSimulator<StdRng, SystemClock> {
    /// Simulator with an entropy-seeded generator and the host clock
    pub fn new(channels: ChannelTable) -> Self {
        Self::with_source(channels, random::from_entropy(), SystemClock)
    }

    /// Reproducible simulator for a fixed seed
    pub fn seeded(channels: ChannelTable, seed: u64) -> Self {
        Self::with_source(channels, random::seeded(seed), SystemClock)
    }
}

impl<R: RandomSource, C: Clock> SensorSimulator<R, C> {
    /// Simulator with an injected random source and clock
    pub fn with_source(channels: ChannelTable, rng: R, clock: C) -> Self {
        Self {
            channels,
            last_values: BTreeMap::new(),
            rng,
            clock,
        }
    }

    /// Produce the next reading for `channel`
    ///
    /// Fails with `UnknownChannel` if the channel is not in the table.
    pub fn generate(&mut self, channel: Channel) -> CoreResult<Reading> {
        let config = self.channels.get(channel)?.clone();

        let base = match self.last_values.get(&channel) {
            None => self.rng.uniform(config.min, config.max),
            Some(&last) => {
                let step = self.rng.uniform(-RANDOM_WALK_STEP, RANDOM_WALK_STEP);
                clamp_to(last * (1.0 + step), config.min, config.max)
            }
        };

        let mut value = self.apply_drift(base, &config);
        let mut bounds = (config.min, config.max);
        let mut quality = self.draw_quality(QUALITY_NORMAL_MIN, QUALITY_NORMAL_MAX);

        if self.rng.chance(ANOMALY_PROBABILITY) {
            quality = self.draw_quality(QUALITY_DEGRADED_MIN, QUALITY_DEGRADED_MAX);
            trace!("{channel}: degraded reading, quality {quality}%");

            if self.rng.chance(ANOMALY_VALUE_PROBABILITY) {
                bounds = config.anomaly_range();
                value = self.rng.uniform(bounds.0, bounds.1);
                debug!("{channel}: injected anomaly {value:.2} below range [{}, {}]", config.min, config.max);
            }
        }

        // bounds with more than two decimals can round outside the band
        let value = clamp_to(round_to(value, VALUE_DECIMALS), bounds.0, bounds.1);
        self.last_values.insert(channel, value);

        Ok(Reading::new(channel, value, config.unit, quality, self.clock.now()))
    }

    /// Parse `name` and generate for it
    pub fn generate_named(&mut self, name: &str) -> CoreResult<Reading> {
        let channel: Channel = name.parse()?;
        self.generate(channel)
    }

    /// One reading for every configured channel, in fixed channel order
    ///
    /// Each channel's state is updated independently; the set is returned whole.
    pub fn generate_all(&mut self) -> CoreResult<ReadingSet> {
        let channels: Vec<Channel> = self.channels.channels().collect();
        let mut set = ReadingSet::new();
        for channel in channels {
            set.insert(self.generate(channel)?);
        }
        Ok(set)
    }

    /// Last emitted value for `channel`, `None` before its first reading
    pub fn last_value(&self, channel: Channel) -> Option<f64> {
        self.last_values.get(&channel).copied()
    }

    /// Forget every channel's walk position
    pub fn reset(&mut self) {
        self.last_values.clear();
    }

    /// Channel table in use
    pub fn channels(&self) -> &ChannelTable {
        &self.channels
    }

    /// Clock in use
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Mutable access to the random source
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    fn apply_drift(&mut self, value: f64, config: &ChannelConfig) -> f64 {
        let factor = match config.drift {
            Drift::None => return value,
            Drift::Falling => self.rng.uniform(FALLING_DRIFT_MIN, FALLING_DRIFT_MAX),
            Drift::Rising => self.rng.uniform(RISING_DRIFT_MIN, RISING_DRIFT_MAX),
        };
        clamp_to(value * (1.0 + factor), config.min, config.max)
    }

    fn draw_quality(&mut self, low: u8, high: u8) -> u8 {
        // randint stays inside [low, high], both of which fit in u8
        self.rng.randint(u32::from(low), u32::from(high)).min(u32::from(high)) as u8
    }
}

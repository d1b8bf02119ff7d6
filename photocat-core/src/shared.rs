//! Shared handles for hosts that dispatch concurrent calls
//!
//! The simulator's walk positions and the adaptor's sample counter are only
//! meaningful under sequential access. These handles wrap one instance in
//! `Arc<Mutex<_>>` so every `generate`, `generate_all` and `adapt` runs under
//! the lock; cloning a handle shares the same instance.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;

use crate::{
    adaptor::{AdaptationReport, ParameterAdaptor, ParameterVector},
    channel::Channel,
    errors::CoreResult,
    random::RandomSource,
    reading::{Reading, ReadingSet},
    simulator::SensorSimulator,
    time::{Clock, SystemClock},
};

/// Serialized access to one [`SensorSimulator`]
pub struct SharedSimulator<R = StdRng, C = SystemClock> {
    inner: Arc<Mutex<SensorSimulator<R, C>>>,
}

impl<R, C> Clone for SharedSimulator<R, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RandomSource, C: Clock> SharedSimulator<R, C> {
    /// Wrap a simulator
    pub fn new(simulator: SensorSimulator<R, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(simulator)),
        }
    }

    /// Next reading for `channel` under the lock
    pub fn generate(&self, channel: Channel) -> CoreResult<Reading> {
        self.inner.lock().generate(channel)
    }

    /// One reading per configured channel under the lock
    pub fn generate_all(&self) -> CoreResult<ReadingSet> {
        self.inner.lock().generate_all()
    }

    /// Last emitted value for `channel`
    pub fn last_value(&self, channel: Channel) -> Option<f64> {
        self.inner.lock().last_value(channel)
    }

    /// Run `f` with exclusive access to the simulator
    pub fn with<T>(&self, f: impl FnOnce(&mut SensorSimulator<R, C>) -> T) -> T {
        let mut simulator = self.inner.lock();
        f(&mut simulator)
    }
}

/// Serialized access to one [`ParameterAdaptor`]
pub struct SharedAdaptor<R = StdRng> {
    inner: Arc<Mutex<ParameterAdaptor<R>>>,
}

impl<R> Clone for SharedAdaptor<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RandomSource> SharedAdaptor<R> {
    /// Wrap an adaptor
    pub fn new(adaptor: ParameterAdaptor<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(adaptor)),
        }
    }

    /// Count one observation under the lock
    pub fn adapt(&self) -> AdaptationReport {
        self.inner.lock().adapt()
    }

    /// Current parameters and sample count without counting an observation
    pub fn snapshot(&self) -> (ParameterVector, u64) {
        let adaptor = self.inner.lock();
        (adaptor.parameters().clone(), adaptor.samples())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelTable;
    use std::thread;

    #[test]
    fn concurrent_adapt_loses_no_samples() {
        let shared = SharedAdaptor::new(ParameterAdaptor::seeded(1));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let adaptor = shared.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        adaptor.adapt();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let (parameters, samples) = shared.snapshot();
        assert_eq!(samples, 2_000);
        assert!(parameters.within_bounds());
    }

    #[test]
    fn clones_share_walk_state() {
        let shared = SharedSimulator::new(SensorSimulator::seeded(ChannelTable::default(), 9));
        let other = shared.clone();

        let reading = shared.generate(Channel::Ph).unwrap();
        assert_eq!(other.last_value(Channel::Ph), Some(reading.value));

        let set = other.with(|sim| sim.generate_all()).unwrap();
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn concurrent_generate_all_keeps_state_consistent() {
        let shared = SharedSimulator::new(SensorSimulator::seeded(ChannelTable::default(), 4));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sim = shared.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        sim.generate_all().unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        for channel in Channel::ALL {
            assert!(shared.last_value(channel).is_some());
        }
    }
}

//! One telemetry poll, end to end
//!
//! ```text
//! SensorSimulator ──► ReadingSet ──┬──► TelemetrySink::store_reading (each)
//!                                  ├──► FaultDiagnoser ──► TelemetrySink::store_fault (each)
//!                                  ├──► FusionEstimator
//!                                  ├──► DigitalTwinPredictor
//!                                  └──  ParameterAdaptor (counts the poll)
//! ```
//!
//! Every consumer sees the same batch and none depends on another's output.
//! The core never persists anything itself; the sink is the storage
//! collaborator's entry point.

use log::{debug, warn};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::{
    adaptor::{AdaptationReport, ParameterAdaptor},
    config::CoreConfig,
    diagnosis::{FaultDiagnoser, FaultRecord},
    errors::{CoreError, CoreResult},
    fusion::{FusionEstimate, FusionEstimator},
    random::{self, RandomSource},
    reading::{Reading, ReadingSet},
    simulator::SensorSimulator,
    time::{Clock, SystemClock},
    twin::{DigitalTwinPredictor, TwinProjection},
};

/// Storage collaborator receiving readings and faults one at a time
pub trait TelemetrySink {
    /// Persist one reading
    fn store_reading(&mut self, reading: &Reading) -> CoreResult<()>;

    /// Persist one fault
    fn store_fault(&mut self, fault: &FaultRecord) -> CoreResult<()>;
}

/// In-memory sink for tests and replay
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Readings in arrival order
    pub readings: Vec<Reading>,
    /// Faults in arrival order
    pub faults: Vec<FaultRecord>,
}

impl MemorySink {
    /// Empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything stored so far
    pub fn clear(&mut self) {
        self.readings.clear();
        self.faults.clear();
    }
}

impl TelemetrySink for MemorySink {
    fn store_reading(&mut self, reading: &Reading) -> CoreResult<()> {
        self.readings.push(reading.clone());
        Ok(())
    }

    fn store_fault(&mut self, fault: &FaultRecord) -> CoreResult<()> {
        self.faults.push(fault.clone());
        Ok(())
    }
}

impl<S: TelemetrySink + ?Sized> TelemetrySink for &mut S {
    fn store_reading(&mut self, reading: &Reading) -> CoreResult<()> {
        (**self).store_reading(reading)
    }

    fn store_fault(&mut self, fault: &FaultRecord) -> CoreResult<()> {
        (**self).store_fault(fault)
    }
}

/// Everything one poll produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollReport {
    /// Readings of this poll
    pub readings: ReadingSet,
    /// Faults raised for those readings
    pub faults: Vec<FaultRecord>,
    /// Composite signal
    pub fusion: FusionEstimate,
    /// `None` when the batch was empty
    pub projection: Option<TwinProjection>,
    /// Adaptor state after counting this poll
    pub adaptation: AdaptationReport,
}

/// Simulator, analysers and adaptor wired for one poll per call
pub struct TelemetryPipeline<R = StdRng, C = SystemClock> {
    simulator: SensorSimulator<R, C>,
    adaptor: ParameterAdaptor<R>,
    twin_rng: R,
    diagnoser: FaultDiagnoser,
    estimator: FusionEstimator,
    predictor: DigitalTwinPredictor,
}

impl TelemetryPipeline<StdRng, SystemClock> {
    /// Pipeline from startup configuration
    ///
    /// With a seed, the simulator, adaptor and twin each get their own
    /// generator derived from it, so runs are reproducible.
    pub fn from_config(config: &CoreConfig) -> Self {
        let rng = |offset: u64| match config.seed {
            Some(seed) => random::seeded(seed.wrapping_add(offset)),
            None => random::from_entropy(),
        };
        Self::from_parts(
            SensorSimulator::with_source(config.channels.clone(), rng(0), SystemClock),
            ParameterAdaptor::with_source(rng(1)),
            rng(2),
        )
    }
}

impl<R: RandomSource, C: Clock> TelemetryPipeline<R, C> {
    /// Pipeline from already-built components
    pub fn from_parts(simulator: SensorSimulator<R, C>, adaptor: ParameterAdaptor<R>, twin_rng: R) -> Self {
        Self {
            simulator,
            adaptor,
            twin_rng,
            diagnoser: FaultDiagnoser::default(),
            estimator: FusionEstimator::default(),
            predictor: DigitalTwinPredictor::new(),
        }
    }

    /// Run one poll and hand its readings, then its faults, to `sink`
    ///
    /// Every analyser runs before anything reaches the sink. A sink error
    /// aborts the hand-off and is returned as is: the walk has advanced and
    /// the adaptor has counted the poll, but readings and faults after the
    /// failing one are not stored.
    pub fn poll<S: TelemetrySink>(&mut self, mut sink: S) -> CoreResult<PollReport> {
        let readings = self.simulator.generate_all()?;
        let faults = self.diagnoser.diagnose(&readings);
        let fusion = self.estimator.fuse(&readings);
        let projection = match self.predictor.predict(&readings, &mut self.twin_rng) {
            Ok(projection) => Some(projection),
            Err(CoreError::NoData { operation }) => {
                warn!("{operation} skipped: empty reading batch");
                None
            }
            Err(other) => return Err(other),
        };
        let adaptation = self.adaptor.adapt();

        for reading in &readings {
            sink.store_reading(reading)?;
        }
        for fault in &faults {
            sink.store_fault(fault)?;
        }

        debug!(
            "poll: {} readings, {} faults, fused {:.2} @ {:.1}%",
            readings.len(),
            faults.len(),
            fusion.value,
            fusion.confidence
        );

        Ok(PollReport {
            readings,
            faults,
            fusion,
            projection,
            adaptation,
        })
    }

    /// The wrapped simulator
    pub fn simulator(&self) -> &SensorSimulator<R, C> {
        &self.simulator
    }

    /// Mutable access to the simulator
    pub fn simulator_mut(&mut self) -> &mut SensorSimulator<R, C> {
        &mut self.simulator
    }

    /// The wrapped adaptor
    pub fn adaptor(&self) -> &ParameterAdaptor<R> {
        &self.adaptor
    }
}

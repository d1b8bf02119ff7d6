//! Telemetry core for the Photocat treatment platform
//!
//! Stands in for the plant's sensor network. Produces plausible readings,
//! fuses them into a composite signal, flags degraded sensors, projects the
//! near future and nudges a bounded set of controller parameters.
//!
//! Key properties:
//! - Pure computation over in-memory values, no I/O outside config loading
//! - Stateful parts (simulator, adaptor) are plain `&mut self` objects
//! - Every random draw goes through an injectable [`RandomSource`]
//!
//! ```no_run
//! use photocat_core::{CoreConfig, MemorySink, TelemetryPipeline};
//!
//! let config = CoreConfig::from_file("photocat.json")?;
//! let mut pipeline = TelemetryPipeline::from_config(&config);
//! let mut sink = MemorySink::new();
//!
//! let report = pipeline.poll(&mut sink)?;
//! println!("fused {} @ {}%", report.fusion.value, report.fusion.confidence);
//! # Ok::<(), photocat_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod adaptor;
pub mod channel;
pub mod config;
pub mod constants;
pub mod diagnosis;
pub mod errors;
pub mod fusion;
pub mod pipeline;
pub mod random;
pub mod reading;
pub mod shared;
pub mod simulator;
pub mod time;
pub mod twin;
pub mod util;

// Public API
pub use adaptor::{AdaptationReport, ParameterAdaptor, ParameterVector};
pub use channel::{Channel, ChannelConfig, ChannelTable, Drift};
pub use config::CoreConfig;
pub use diagnosis::{FaultDiagnoser, FaultRecord, FaultStatus, FaultType, Severity};
pub use errors::{CoreError, CoreResult};
pub use fusion::{FusionEstimate, FusionEstimator, NoiseCovariance};
pub use pipeline::{MemorySink, PollReport, TelemetryPipeline, TelemetrySink};
pub use random::{RandomSource, ScriptedSource};
pub use reading::{Reading, ReadingSet};
pub use shared::{SharedAdaptor, SharedSimulator};
pub use simulator::SensorSimulator;
pub use time::{Clock, FixedClock, SystemClock, Timestamp};
pub use twin::{DigitalTwinPredictor, TwinProjection};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Poll Loop Example
//!
//! Drives the telemetry pipeline the way a host's periodic job would:
//! one poll per tick, readings and faults handed to a sink, and the
//! composite signal, projection and controller parameters printed.
//!
//! Run with: `cargo run -p photocat-core --example 01_poll_loop`

use photocat_core::{CoreConfig, CoreResult, FaultRecord, Reading, TelemetryPipeline, TelemetrySink};

/// Prints what a storage collaborator would persist
struct ConsoleSink;

impl TelemetrySink for ConsoleSink {
    fn store_reading(&mut self, reading: &Reading) -> CoreResult<()> {
        println!(
            "  {:<12} {:>8.2} {:<5} q={}%",
            reading.channel, reading.value, reading.unit, reading.quality
        );
        Ok(())
    }

    fn store_fault(&mut self, fault: &FaultRecord) -> CoreResult<()> {
        println!("  !! {} [{}] {}", fault.component, fault.severity, fault.description);
        Ok(())
    }
}

fn main() -> CoreResult<()> {
    let config = CoreConfig {
        seed: Some(2024),
        ..CoreConfig::default()
    };
    let mut pipeline = TelemetryPipeline::from_config(&config);

    for tick in 1..=5 {
        println!("=== Poll {tick} ===");
        let report = pipeline.poll(ConsoleSink)?;

        println!(
            "  fusion: {:.2} (confidence {:.1}%, {} channels)",
            report.fusion.value, report.fusion.confidence, report.fusion.channels_used
        );
        if let Some(projection) = &report.projection {
            println!(
                "  twin: pollution {:.1} ppm, efficiency {:.1}%, health {:.1}%, life {:.1}%",
                projection.predicted_pollution,
                projection.predicted_efficiency,
                projection.system_health,
                projection.remaining_life
            );
        }
        let params = &report.adaptation.parameters;
        println!(
            "  params: kp={:.3} ki={:.3} kd={:.3} after {} samples",
            params.kp, params.ki, params.kd, report.adaptation.learning_samples
        );
    }

    Ok(())
}

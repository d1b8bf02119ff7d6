//! Configuration loading from disk

use std::io::Write;

use photocat_core::{Channel, CoreConfig, CoreError, Drift, MemorySink, TelemetryPipeline};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn config_round_trips_through_a_file() {
    let original = CoreConfig {
        seed: Some(99),
        ..CoreConfig::default()
    };
    let file = write_config(&original.to_json_string().unwrap());

    let loaded = CoreConfig::from_file(file.path()).unwrap();
    assert_eq!(loaded, original);
    assert_eq!(
        loaded.channels.get(Channel::Pollution).unwrap().drift,
        Drift::Falling
    );
}

#[test]
fn seeded_file_config_is_reproducible() {
    let file = write_config(r#"{ "seed": 7 }"#);
    let config = CoreConfig::from_file(file.path()).unwrap();

    let mut a = TelemetryPipeline::from_config(&config);
    let mut b = TelemetryPipeline::from_config(&config);
    let ra = a.poll(MemorySink::new()).unwrap();
    let rb = b.poll(MemorySink::new()).unwrap();

    let values = |r: &photocat_core::PollReport| -> Vec<f64> { r.readings.iter().map(|x| x.value).collect() };
    assert_eq!(values(&ra), values(&rb));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = CoreConfig::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(CoreError::Io(_))));
}

#[test]
fn malformed_file_is_parse_error() {
    let file = write_config("{ \"seed\": ");
    assert!(matches!(
        CoreConfig::from_file(file.path()),
        Err(CoreError::Parse(_))
    ));
}

//! CSV and JSON export of stored readings

use photocat_core::{Channel, Reading};
use serde::Serialize;

use crate::errors::HistoryResult;

const CSV_HEADER: &str = "timestamp,channel,value,unit,quality";
const EXPORT_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Flat export row
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    timestamp: String,
    channel: Channel,
    value: f64,
    unit: &'a str,
    quality: u8,
}

impl<'a> From<&'a Reading> for ExportRow<'a> {
    fn from(reading: &'a Reading) -> Self {
        Self {
            timestamp: reading.timestamp.format(EXPORT_TIMESTAMP).to_string(),
            channel: reading.channel,
            value: reading.value,
            unit: &reading.unit,
            quality: reading.quality,
        }
    }
}

/// CSV with a header line, or an empty string when there is nothing to export
pub fn to_csv(records: &[Reading]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows = records.iter().map(ExportRow::from).map(|row| {
        format!(
            "{},{},{},{},{}",
            row.timestamp,
            row.channel,
            row.value,
            csv_field(row.unit),
            row.quality
        )
    });

    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(CSV_HEADER.to_string());
    lines.extend(rows);
    lines.push(String::new());
    lines.join("\n")
}

/// Pretty-printed JSON array of export rows
pub fn to_json(records: &[Reading]) -> HistoryResult<String> {
    let rows: Vec<ExportRow<'_>> = records.iter().map(ExportRow::from).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

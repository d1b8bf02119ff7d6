//! Startup configuration
//!
//! Loaded once when the host starts. Everything is optional; an empty document
//! yields the plant's default channel table and an entropy-seeded generator.
//!
//! ```json
//! {
//!   "channels": {
//!     "flow":      { "min": 20,  "max": 35,  "unit": "cm/s" },
//!     "pollution": { "min": 140, "max": 170, "unit": "ppm", "drift": "falling" }
//!   },
//!   "seed": 42
//! }
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{channel::ChannelTable, errors::CoreResult};

/// Core configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Simulation ranges per channel
    #[serde(default)]
    pub channels: ChannelTable,
    /// Seed for reproducible simulation; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CoreConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: CoreConfig = serde_json::from_str(json)?;
        config.channels.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let config = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!(
            "loaded configuration from {} ({} channels)",
            path.display(),
            config.channels.len()
        );
        Ok(config)
    }

    /// Serialize as pretty JSON
    pub fn to_json_string(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

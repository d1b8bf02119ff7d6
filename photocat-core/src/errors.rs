//! Error Types for the Telemetry Core
//!
//! ## Error Categories
//!
//! ### Caller Errors
//! - `UnknownChannel`: a channel name outside the configured set. Not retried,
//!   surfaced to whoever asked for it.
//!
//! ### Degraded Results
//! - `NoData`: an empty reading batch reached a step that needs at least one
//!   reading (the digital twin's health average). Hosts usually turn this into
//!   an empty response rather than a failure.
//!
//! ### Startup and Boundary Failures
//! - `InvalidConfig`, `Io`, `Parse`: the channel table could not be loaded.
//! - `Sink`: the persistence collaborator rejected a reading or fault.
//!
//! Empty-set means and zero denominators are not errors at all. Those paths
//! return a sentinel (0, "flat", "stable") because they are expected steady
//! state.
//!
//! ```rust
//! use photocat_core::{Channel, CoreError};
//!
//! match "humidity".parse::<Channel>() {
//!     Ok(_) => unreachable!(),
//!     Err(CoreError::UnknownChannel { name }) => assert_eq!(name, "humidity"),
//!     Err(other) => panic!("unexpected {other}"),
//! }
//! ```

use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the telemetry core
#[derive(Error, Debug)]
pub enum CoreError {
    /// Channel name is not part of the configured channel set
    #[error("Unknown sensor channel: {name}")]
    UnknownChannel {
        /// The name the caller asked for
        name: String,
    },

    /// Operation needs at least one reading
    #[error("No readings available for {operation}")]
    NoData {
        /// Operation that received the empty batch
        operation: &'static str,
    },

    /// Channel table or other startup configuration is unusable
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with it
        reason: String,
    },

    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration document is not valid JSON for the expected shape
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Persistence collaborator refused a record
    #[error("Sink rejected record: {reason}")]
    Sink {
        /// Reason reported by the sink
        reason: String,
    },
}

impl CoreError {
    /// True for errors caused by the caller's input rather than the environment
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::UnknownChannel { .. } | Self::NoData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = CoreError::UnknownChannel { name: "humidity".into() };
        assert_eq!(err.to_string(), "Unknown sensor channel: humidity");

        let err = CoreError::NoData { operation: "digital twin prediction" };
        assert!(err.to_string().contains("digital twin"));
    }

    #[test]
    fn caller_errors_are_classified() {
        assert!(CoreError::UnknownChannel { name: "x".into() }.is_caller_error());
        assert!(CoreError::NoData { operation: "fuse" }.is_caller_error());
        assert!(!CoreError::Sink { reason: "disk full".into() }.is_caller_error());
    }
}

//! Error types for history analysis

use thiserror::Error;

/// History analysis errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Aggregation granularity name not recognised
    #[error("unknown granularity: {name}")]
    UnknownGranularity {
        /// The name that was given
        name: String,
    },

    /// JSON export failed
    #[error("export failed: {0}")]
    Export(#[from] serde_json::Error),
}

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

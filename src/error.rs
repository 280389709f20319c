//! Error types for the TSP genetic solver.

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, TspError>;

/// Every way a solver run can fail. None of these are retried.
#[derive(Debug, Error)]
pub enum TspError {
    /// The instance file could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The instance text does not follow the `<cities>,<edges>` format
    #[error("Malformed input at line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    /// An edge names a city outside `1..=num_cities`
    #[error("Invalid city reference {city}: cities are numbered 1..={num_cities}")]
    InvalidCityReference { city: usize, num_cities: usize },

    /// Roulette weights cannot be formed from the current fitness values
    #[error("Degenerate evaluation: {0}")]
    DegenerateEvaluation(String),

    /// Rejected before any computation starts
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The reported route walks over city pairs that have no road
    #[error("Route uses {missing_legs} leg(s) between cities with no connecting road")]
    DisconnectedRoute { missing_legs: usize },

    /// JSON report could not be written
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV report could not be written
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TspError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        TspError::MalformedInput {
            line,
            message: message.into(),
        }
    }
}

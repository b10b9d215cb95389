//! Error types for flock construction.
//!
//! Every variant is a configuration or input problem detected before the
//! first step runs. A constructed `Flock` cannot fail while stepping.

use flockwise_data::ConnectivityState;
use thiserror::Error;

/// Main error type for flockwise_core operations.
#[derive(Error, Debug)]
pub enum FlockError {
    #[error("Agent count must be positive, got {0}")]
    InvalidAgentCount(usize),

    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Initial heading must be finite, got ({x}, {y})")]
    InvalidHeading { x: f64, y: f64 },

    #[error("k_nearest must be at least 1")]
    ZeroNeighborLimit,

    #[error("State threshold must be non-negative, got {0}")]
    NegativeThreshold(i64),

    #[error("State thresholds must be strictly increasing, got {low} then {high}")]
    UnorderedThresholds { low: i64, high: i64 },

    #[error("Weight vector for {0:?} contains non-finite values")]
    InvalidWeights(ConnectivityState),

    #[error("Spawn range {field} must be an increasing sub-range of [0, 1], got [{low}, {high}]")]
    InvalidSpawnRange {
        field: &'static str,
        low: f64,
        high: f64,
    },

    #[error("State {state:?} does not exist in the {variant} policy")]
    StateNotInPolicy {
        state: ConnectivityState,
        variant: &'static str,
    },

    #[error("Agent {index} has an invalid position ({x}, {y})")]
    InvalidCoordinate { index: usize, x: f64, y: f64 },

    #[error("Agent {index} has a non-finite velocity ({x}, {y})")]
    InvalidVelocity { index: usize, x: f64, y: f64 },

    #[error("Agent {index}: {field} is out of range ({value})")]
    InvalidAgentParameter {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Expected {expected} initial agent states, got {actual}")]
    AgentCountMismatch { expected: usize, actual: usize },

    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration file error: {0}")]
    FileSystem(#[from] std::io::Error),
}

/// Result type alias for flockwise_core operations.
pub type Result<T> = std::result::Result<T, FlockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FlockError::UnorderedThresholds { low: 3, high: 1 };
        assert_eq!(
            err.to_string(),
            "State thresholds must be strictly increasing, got 3 then 1"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: FlockError = io_err.into();
        assert!(matches!(err, FlockError::FileSystem(_)));
    }
}

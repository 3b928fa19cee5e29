//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// A single constraint violated by a [`GameConfig`](super::GameConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("tolerance must be positive (got {0})")]
    NonPositiveTolerance(f64),

    #[error("tolerance must be finite (got {0})")]
    NonFiniteTolerance(f64),

    #[error("attempts must be at least 1 (got {0})")]
    NoAttempts(u32),

    #[error("distance_error must not be negative (got {0})")]
    NegativeDistanceError(f64),

    #[error("distance_error is too large to sample a noise band from (got {0})")]
    NonFiniteDistanceError(f64),

    #[error("poll interval must be at least one second")]
    ZeroPollInterval,

    #[error("bounds {axis} range is inverted ({min} > {max})")]
    InvertedBounds {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("bounds {axis} value {value} is outside [-{limit}, {limit}]")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        limit: f64,
    },
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// One or more values violate their constraints
    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

//! Error types for the layers around the numeric core
//!
//! The solver and annualizer never fail; these cover input validation,
//! scenario loading and configuration.

use thiserror::Error;

/// A fattening scenario whose inputs cannot describe a real cycle
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("slaughter weight {slaughter} kg must exceed purchase weight {purchase} kg")]
    NoWeightGain { purchase: f64, slaughter: f64 },

    #[error("carcass yield must be in (0, 100], got {0}")]
    YieldOutOfRange(f64),
}

/// Failure to read scenarios from CSV
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("scenario on line {line} is invalid: {source}")]
    Invalid {
        line: u64,
        #[source]
        source: ScenarioError,
    },
}

/// Malformed configuration override
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

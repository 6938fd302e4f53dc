//! Engine configuration
//!
//! Defaults reproduce the calculator's fixed behavior. Overrides come from
//! environment variables:
//!   IRR_INITIAL_GUESS, IRR_MAX_ITERATIONS, IRR_TOLERANCE, IRR_DERIVATIVE_FLOOR
//!   MATRIX_VARIATIONS (comma separated fractions, e.g. "-0.1,0,0.1")

use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::returns::SolverSettings;
use crate::sensitivity::DEFAULT_VARIATIONS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Newton-Raphson settings for every IRR solve
    pub solver: SolverSettings,

    /// Relative price moves for both sensitivity axes
    pub variations: Vec<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solver: SolverSettings::default(),
            variations: DEFAULT_VARIATIONS.to_vec(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by any of the recognised environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SolverSettings::default();

        let solver = SolverSettings {
            initial_guess: parse_or(&lookup, "IRR_INITIAL_GUESS", defaults.initial_guess)?,
            max_iterations: parse_or(&lookup, "IRR_MAX_ITERATIONS", defaults.max_iterations)?,
            tolerance: parse_or(&lookup, "IRR_TOLERANCE", defaults.tolerance)?,
            derivative_floor: parse_or(&lookup, "IRR_DERIVATIVE_FLOOR", defaults.derivative_floor)?,
        };

        let variations = match lookup("MATRIX_VARIATIONS") {
            Some(raw) => parse_variations(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: "MATRIX_VARIATIONS".to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_VARIATIONS.to_vec(),
        };

        let config = Self { solver, variations };
        debug!("Engine config: {:?}", config);
        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Parse "-0.1, 0, 0.1" into fractions; `None` if any entry is not a finite number
pub fn parse_variations(raw: &str) -> Option<Vec<f64>> {
    let values: Option<Vec<f64>> = raw
        .split(',')
        .map(|s| s.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect();
    values.filter(|v| !v.is_empty())
}

//! Side-by-side evaluation of several fattening scenarios
//!
//! Holds the engine configuration once, then evaluates any number of
//! scenarios with it, in parallel for batches.

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::cycle::{FatteningInputs, FatteningOutcome, FatteningScenario};
use crate::sensitivity::{evaluate_matrix_with, MatrixMetric, SensitivityMatrix};

/// One evaluated scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub inputs: FatteningInputs,
    pub outcome: FatteningOutcome,
}

/// Scenarios ranked by effective annual IRR, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub ranked: Vec<ScenarioResult>,
}

impl Comparison {
    pub fn best(&self) -> Option<&ScenarioResult> {
        self.ranked.first()
    }

    /// Gap in annual IRR points between the best scenario and `name`
    pub fn annual_irr_gap(&self, name: &str) -> Option<f64> {
        let best = self.best()?;
        let other = self.ranked.iter().find(|r| r.name == name)?;
        Some(best.outcome.annual_irr_pct - other.outcome.annual_irr_pct)
    }
}

/// Evaluates scenarios with a fixed engine configuration
///
/// # Example
/// ```
/// use livestock_returns::{ScenarioComparator, FatteningInputs, FatteningScenario};
///
/// let comparator = ScenarioComparator::new();
/// let scenarios = vec![
///     FatteningScenario::new("baseline", FatteningInputs::default()),
///     FatteningScenario::new("better price", FatteningInputs {
///         sale_price_per_arroba: 330.0,
///         ..FatteningInputs::default()
///     }),
/// ];
/// let comparison = comparator.compare(&scenarios);
/// assert_eq!(comparison.best().unwrap().name, "better price");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioComparator {
    config: EngineConfig,
}

impl ScenarioComparator {
    /// Comparator with the default engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Comparator configured from environment overrides
    pub fn from_env() -> Result<Self, crate::error::ConfigError> {
        Ok(Self::with_config(EngineConfig::from_env()?))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a single scenario
    pub fn run(&self, scenario: &FatteningScenario) -> ScenarioResult {
        let outcome = scenario.inputs.evaluate_with(&self.config.solver);
        if !outcome.irr_converged {
            warn!(
                "IRR for scenario {:?} did not converge; reporting last iterate {:.6}%",
                scenario.name, outcome.monthly_irr_pct
            );
        }
        ScenarioResult {
            name: scenario.name.clone(),
            inputs: scenario.inputs,
            outcome,
        }
    }

    /// Evaluate many scenarios in parallel, preserving input order
    pub fn run_batch(&self, scenarios: &[FatteningScenario]) -> Vec<ScenarioResult> {
        let results: Vec<_> = scenarios.par_iter().map(|s| self.run(s)).collect();
        info!("Evaluated {} scenarios", results.len());
        results
    }

    /// Evaluate and rank scenarios by annual IRR, best first.
    ///
    /// Scenarios whose IRR is not a finite number sort last; ties keep input order.
    pub fn compare(&self, scenarios: &[FatteningScenario]) -> Comparison {
        let mut ranked = self.run_batch(scenarios);
        ranked.sort_by(|a, b| ranking_key(b).total_cmp(&ranking_key(a)));
        Comparison { ranked }
    }

    /// Sensitivity grid for one scenario using the configured variations
    pub fn sensitivity(&self, inputs: &FatteningInputs, metric: MatrixMetric) -> SensitivityMatrix {
        evaluate_matrix_with(
            inputs,
            &self.config.variations,
            &self.config.variations,
            metric,
            &self.config.solver,
        )
    }
}

fn ranking_key(result: &ScenarioResult) -> f64 {
    let rate = result.outcome.annual_irr_pct;
    if rate.is_finite() {
        rate
    } else {
        f64::NEG_INFINITY
    }
}

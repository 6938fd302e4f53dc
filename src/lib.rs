//! Livestock Returns - return engine for cattle fattening cycles
//!
//! This library provides:
//! - Monthly IRR of a fattening cycle via Newton-Raphson over a fractional horizon
//! - Monthly to effective annual rate conversion
//! - The calculator's profit model (costs, revenue, margin, break-even price)
//! - Price sensitivity matrices over purchase and sale prices
//! - Side-by-side scenario comparison and CSV batch loading

pub mod comparator;
pub mod config;
pub mod cycle;
pub mod error;
pub mod returns;
pub mod sensitivity;

// Re-export commonly used types
pub use comparator::{Comparison, ScenarioComparator, ScenarioResult};
pub use config::EngineConfig;
pub use cycle::{FatteningInputs, FatteningOutcome, FatteningScenario};
pub use error::{ConfigError, LoadError, ScenarioError};
pub use returns::{calculate_livestock_irr, convert_monthly_to_annual_rate, IrrSolution};
pub use sensitivity::{MatrixMetric, SensitivityMatrix};

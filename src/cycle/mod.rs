//! Fattening cycle inputs, derived profit model and scenario loading

mod data;
pub mod loader;

pub use data::{FatteningInputs, FatteningOutcome, FatteningScenario, DAYS_PER_MONTH, KG_PER_ARROBA};
pub(crate) use data::percent_of;
pub use loader::{load_default_scenarios, load_scenarios, load_scenarios_from_reader};

//! Load fattening scenarios from CSV
//!
//! Expected header:
//! `name,purchase_weight_kg,purchase_price_per_kg,slaughter_weight_kg,carcass_yield_pct,sale_price_per_arroba,daily_gain_kg,monthly_cost`

use csv::Reader;
use log::info;
use std::io::Read;
use std::path::Path;

use super::data::{FatteningInputs, FatteningScenario};
use crate::error::LoadError;

/// Default location of the scenario file
pub const DEFAULT_SCENARIOS_PATH: &str = "data/scenarios.csv";

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    purchase_weight_kg: f64,
    purchase_price_per_kg: f64,
    slaughter_weight_kg: f64,
    carcass_yield_pct: f64,
    sale_price_per_arroba: f64,
    daily_gain_kg: f64,
    monthly_cost: f64,
}

impl CsvRow {
    fn into_scenario(self) -> FatteningScenario {
        FatteningScenario::new(
            self.name,
            FatteningInputs {
                purchase_weight_kg: self.purchase_weight_kg,
                purchase_price_per_kg: self.purchase_price_per_kg,
                slaughter_weight_kg: self.slaughter_weight_kg,
                carcass_yield_pct: self.carcass_yield_pct,
                sale_price_per_arroba: self.sale_price_per_arroba,
                daily_gain_kg: self.daily_gain_kg,
                monthly_cost: self.monthly_cost,
            },
        )
    }
}

/// Load and validate all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<FatteningScenario>, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let scenarios = load_scenarios_from_reader(file)?;
    info!("Loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load and validate scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<FatteningScenario>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let scenario = row.into_scenario();
        // Header is line 1, so data rows start at line 2
        let line = scenarios.len() as u64 + 2;
        scenario
            .inputs
            .validate()
            .map_err(|source| LoadError::Invalid { line, source })?;
        scenarios.push(scenario);
    }

    Ok(scenarios)
}

/// Load scenarios from the default data/scenarios.csv location
pub fn load_default_scenarios() -> Result<Vec<FatteningScenario>, LoadError> {
    load_scenarios(DEFAULT_SCENARIOS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScenarioError;

    const HEADER: &str = "name,purchase_weight_kg,purchase_price_per_kg,slaughter_weight_kg,carcass_yield_pct,sale_price_per_arroba,daily_gain_kg,monthly_cost\n";

    #[test]
    fn test_load_from_reader() {
        let data = format!(
            "{}baseline,200,14.5,360,54.5,300,0.65,135\nheavy,250,13.8,420,55,310,0.8,150\n",
            HEADER
        );
        let scenarios = load_scenarios_from_reader(data.as_bytes()).expect("valid CSV");
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].name, "baseline");
        assert_eq!(scenarios[0].inputs, FatteningInputs::default());
        assert_eq!(scenarios[1].inputs.slaughter_weight_kg, 420.0);
    }

    #[test]
    fn test_invalid_row_reports_line() {
        let data = format!(
            "{}ok,200,14.5,360,54.5,300,0.65,135\nbad,200,14.5,180,54.5,300,0.65,135\n",
            HEADER
        );
        match load_scenarios_from_reader(data.as_bytes()) {
            Err(LoadError::Invalid { line, source }) => {
                assert_eq!(line, 3);
                assert!(matches!(source, ScenarioError::NoWeightGain { .. }));
            }
            other => panic!("expected invalid row error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let data = format!("{}x,abc,14.5,360,54.5,300,0.65,135\n", HEADER);
        assert!(matches!(
            load_scenarios_from_reader(data.as_bytes()),
            Err(LoadError::Csv(_))
        ));
    }

    #[test]
    fn test_default_file_loads() {
        let scenarios = load_default_scenarios().expect("bundled scenario file");
        assert!(!scenarios.is_empty());
    }
}

//! Fattening cycle inputs and the profit model derived from them

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;
use crate::returns::{
    convert_monthly_to_annual_rate, solve_with_settings, CashFlowSchedule, SolverSettings,
};

/// Carcass weight of one arroba, kg
pub const KG_PER_ARROBA: f64 = 15.0;

/// Days per commercial month used to turn the fattening period into months
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Herd inputs for one animal going through a fattening cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatteningInputs {
    /// Live weight at purchase, kg
    pub purchase_weight_kg: f64,

    /// Price paid per kg of live weight
    pub purchase_price_per_kg: f64,

    /// Live weight at slaughter, kg
    pub slaughter_weight_kg: f64,

    /// Carcass yield as a percentage of live weight
    pub carcass_yield_pct: f64,

    /// Sale price per arroba of carcass
    pub sale_price_per_arroba: f64,

    /// Average daily weight gain, kg/day
    pub daily_gain_kg: f64,

    /// Operating cost per head per month
    pub monthly_cost: f64,
}

impl Default for FatteningInputs {
    /// The calculator's starting scenario
    fn default() -> Self {
        Self {
            purchase_weight_kg: 200.0,
            purchase_price_per_kg: 14.50,
            slaughter_weight_kg: 360.0,
            carcass_yield_pct: 54.5,
            sale_price_per_arroba: 300.0,
            daily_gain_kg: 0.65,
            monthly_cost: 135.0,
        }
    }
}

impl FatteningInputs {
    /// Check that the inputs describe a cycle the model can price.
    ///
    /// The return solver itself accepts anything; this is the calling layer's gate.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let fields = [
            ("purchase_weight_kg", self.purchase_weight_kg),
            ("purchase_price_per_kg", self.purchase_price_per_kg),
            ("slaughter_weight_kg", self.slaughter_weight_kg),
            ("carcass_yield_pct", self.carcass_yield_pct),
            ("sale_price_per_arroba", self.sale_price_per_arroba),
            ("daily_gain_kg", self.daily_gain_kg),
            ("monthly_cost", self.monthly_cost),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ScenarioError::NonFinite { field });
            }
        }

        for (field, value) in [
            ("purchase_weight_kg", self.purchase_weight_kg),
            ("purchase_price_per_kg", self.purchase_price_per_kg),
            ("daily_gain_kg", self.daily_gain_kg),
        ] {
            if value <= 0.0 {
                return Err(ScenarioError::NonPositive { field, value });
            }
        }

        if self.monthly_cost < 0.0 {
            return Err(ScenarioError::Negative {
                field: "monthly_cost",
                value: self.monthly_cost,
            });
        }
        if self.sale_price_per_arroba < 0.0 {
            return Err(ScenarioError::Negative {
                field: "sale_price_per_arroba",
                value: self.sale_price_per_arroba,
            });
        }

        if self.slaughter_weight_kg <= self.purchase_weight_kg {
            return Err(ScenarioError::NoWeightGain {
                purchase: self.purchase_weight_kg,
                slaughter: self.slaughter_weight_kg,
            });
        }

        if self.carcass_yield_pct <= 0.0 || self.carcass_yield_pct > 100.0 {
            return Err(ScenarioError::YieldOutOfRange(self.carcass_yield_pct));
        }

        Ok(())
    }

    pub fn purchase_cost(&self) -> f64 {
        self.purchase_weight_kg * self.purchase_price_per_kg
    }

    pub fn weight_gain_kg(&self) -> f64 {
        self.slaughter_weight_kg - self.purchase_weight_kg
    }

    pub fn permanence_days(&self) -> f64 {
        self.weight_gain_kg() / self.daily_gain_kg
    }

    /// Time on feed in (fractional) months
    pub fn permanence_months(&self) -> f64 {
        self.permanence_days() / DAYS_PER_MONTH
    }

    /// Carcass arrobas produced at slaughter
    pub fn carcass_arrobas(&self) -> f64 {
        self.slaughter_weight_kg * (self.carcass_yield_pct / 100.0) / KG_PER_ARROBA
    }

    pub fn sale_revenue(&self) -> f64 {
        self.carcass_arrobas() * self.sale_price_per_arroba
    }

    pub fn operating_cost(&self) -> f64 {
        self.monthly_cost * self.permanence_months()
    }

    /// Cash-flow schedule fed to the return solver
    pub fn schedule(&self) -> CashFlowSchedule {
        CashFlowSchedule::new(
            self.purchase_weight_kg,
            self.purchase_price_per_kg,
            self.monthly_cost,
            self.sale_revenue(),
            self.permanence_months(),
        )
    }

    /// Run the full profit model with the default solver settings
    pub fn evaluate(&self) -> FatteningOutcome {
        self.evaluate_with(&SolverSettings::default())
    }

    /// Run the full profit model with custom solver settings
    pub fn evaluate_with(&self, settings: &SolverSettings) -> FatteningOutcome {
        let purchase_cost = self.purchase_cost();
        let sale_revenue = self.sale_revenue();
        let operating_cost = self.operating_cost();
        let total_cost = purchase_cost + operating_cost;
        let profit = sale_revenue - total_cost;
        let carcass_arrobas = self.carcass_arrobas();

        let irr = solve_with_settings(&self.schedule(), settings);

        FatteningOutcome {
            purchase_cost,
            weight_gain_kg: self.weight_gain_kg(),
            permanence_days: self.permanence_days(),
            permanence_months: self.permanence_months(),
            carcass_arrobas,
            sale_revenue,
            operating_cost,
            total_cost,
            profit,
            margin_pct: percent_of(profit, sale_revenue),
            return_on_cost_pct: percent_of(profit, total_cost),
            monthly_irr_pct: irr.rate_pct,
            annual_irr_pct: convert_monthly_to_annual_rate(irr.rate_pct),
            irr_converged: irr.converged,
            break_even_price_per_arroba: if carcass_arrobas == 0.0 {
                0.0
            } else {
                total_cost / carcass_arrobas
            },
        }
    }
}

/// `part / whole` in percent, 0 when `whole` is 0
pub(crate) fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Everything the calculator reports for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatteningOutcome {
    pub purchase_cost: f64,
    pub weight_gain_kg: f64,
    pub permanence_days: f64,
    pub permanence_months: f64,
    pub carcass_arrobas: f64,
    pub sale_revenue: f64,
    pub operating_cost: f64,
    pub total_cost: f64,
    pub profit: f64,

    /// Profit over sale revenue, %
    pub margin_pct: f64,

    /// Profit over total cost, %
    pub return_on_cost_pct: f64,

    pub monthly_irr_pct: f64,
    pub annual_irr_pct: f64,
    pub irr_converged: bool,

    /// Sale price per arroba at which profit is zero
    pub break_even_price_per_arroba: f64,
}

/// A named set of inputs, as compared side by side or loaded in bulk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatteningScenario {
    pub name: String,
    pub inputs: FatteningInputs,
}

impl FatteningScenario {
    pub fn new(name: impl Into<String>, inputs: FatteningInputs) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::calculate_livestock_irr;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_scenario_figures() {
        let inputs = FatteningInputs::default();
        inputs.validate().expect("default inputs are valid");

        let outcome = inputs.evaluate();
        assert_relative_eq!(outcome.purchase_cost, 2900.0);
        assert_relative_eq!(outcome.weight_gain_kg, 160.0);
        assert_relative_eq!(outcome.permanence_months, 8.205128205128204, max_relative = 1e-12);
        assert_relative_eq!(outcome.carcass_arrobas, 13.08, max_relative = 1e-12);
        assert_relative_eq!(outcome.sale_revenue, 3924.0, max_relative = 1e-12);
        assert_relative_eq!(outcome.operating_cost, 135.0 * 8.205128205128204, max_relative = 1e-12);
        assert_relative_eq!(outcome.profit, 3924.0 - 2900.0 - outcome.operating_cost, max_relative = 1e-9);
    }

    #[test]
    fn test_default_scenario_irr_is_plausible() {
        let outcome = FatteningInputs::default().evaluate();
        assert!((outcome.permanence_months - 8.2).abs() < 0.01);
        assert!(outcome.irr_converged);
        assert!(outcome.monthly_irr_pct.abs() < 10.0, "got {}", outcome.monthly_irr_pct);
        assert_relative_eq!(
            outcome.annual_irr_pct,
            convert_monthly_to_annual_rate(outcome.monthly_irr_pct)
        );
    }

    #[test]
    fn test_outcome_irr_matches_direct_solver_call() {
        let inputs = FatteningInputs {
            sale_price_per_arroba: 330.0,
            ..FatteningInputs::default()
        };
        let outcome = inputs.evaluate();
        let direct = calculate_livestock_irr(
            inputs.purchase_weight_kg,
            inputs.purchase_price_per_kg,
            inputs.monthly_cost,
            inputs.sale_revenue(),
            inputs.permanence_months(),
        );
        assert_eq!(outcome.monthly_irr_pct, direct);
        assert!(outcome.profit > 0.0);
        assert!(outcome.monthly_irr_pct > 0.0);
    }

    #[test]
    fn test_break_even_price_zeroes_profit() {
        let inputs = FatteningInputs::default();
        let break_even = inputs.evaluate().break_even_price_per_arroba;

        let at_break_even = FatteningInputs {
            sale_price_per_arroba: break_even,
            ..inputs
        }
        .evaluate();
        assert!(at_break_even.profit.abs() < 1e-9, "profit {}", at_break_even.profit);
    }

    #[test]
    fn test_margin_and_return_on_cost() {
        let outcome = FatteningInputs::default().evaluate();
        assert_relative_eq!(outcome.margin_pct, outcome.profit / outcome.sale_revenue * 100.0);
        assert_relative_eq!(outcome.return_on_cost_pct, outcome.profit / outcome.total_cost * 100.0);
        assert_eq!(percent_of(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        let base = FatteningInputs::default();

        let no_gain = FatteningInputs { slaughter_weight_kg: 200.0, ..base };
        assert_eq!(
            no_gain.validate(),
            Err(ScenarioError::NoWeightGain { purchase: 200.0, slaughter: 200.0 })
        );

        let zero_gmd = FatteningInputs { daily_gain_kg: 0.0, ..base };
        assert_eq!(
            zero_gmd.validate(),
            Err(ScenarioError::NonPositive { field: "daily_gain_kg", value: 0.0 })
        );

        let bad_yield = FatteningInputs { carcass_yield_pct: 120.0, ..base };
        assert_eq!(bad_yield.validate(), Err(ScenarioError::YieldOutOfRange(120.0)));

        let negative_cost = FatteningInputs { monthly_cost: -1.0, ..base };
        assert!(matches!(
            negative_cost.validate(),
            Err(ScenarioError::Negative { field: "monthly_cost", .. })
        ));

        let nan_price = FatteningInputs { purchase_price_per_kg: f64::NAN, ..base };
        assert_eq!(
            nan_price.validate(),
            Err(ScenarioError::NonFinite { field: "purchase_price_per_kg" })
        );
    }
}

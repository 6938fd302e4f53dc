//! Price sensitivity grid over purchase price (rows) and sale price (columns)

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cycle::{percent_of, FatteningInputs};
use crate::returns::{convert_monthly_to_annual_rate, solve_with_settings, CashFlowSchedule, SolverSettings};

/// Relative price moves used on both axes unless told otherwise
pub const DEFAULT_VARIATIONS: [f64; 5] = [-0.10, -0.05, 0.0, 0.05, 0.10];

/// Which derived figure fills the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixMetric {
    /// Sale revenue minus purchase and operating cost
    Profit,
    /// Monthly IRR, %
    MonthlyIrr,
    /// Effective annual IRR, %
    AnnualIrr,
    /// Profit over sale revenue, %
    MarginPct,
}

impl MatrixMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatrixMetric::Profit => "profit",
            MatrixMetric::MonthlyIrr => "monthly_irr",
            MatrixMetric::AnnualIrr => "annual_irr",
            MatrixMetric::MarginPct => "margin_pct",
        }
    }
}

impl fmt::Display for MatrixMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatrixMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "profit" => Ok(MatrixMetric::Profit),
            "monthly_irr" | "monthly-irr" => Ok(MatrixMetric::MonthlyIrr),
            "annual_irr" | "annual-irr" => Ok(MatrixMetric::AnnualIrr),
            "margin_pct" | "margin-pct" | "margin" => Ok(MatrixMetric::MarginPct),
            other => Err(format!(
                "unknown metric {:?} (expected profit, monthly_irr, annual_irr or margin_pct)",
                other
            )),
        }
    }
}

/// Grid of metric values with its value range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityMatrix {
    pub metric: MatrixMetric,

    /// Relative purchase price moves, one per row
    pub row_variations: Vec<f64>,

    /// Relative sale price moves, one per column
    pub col_variations: Vec<f64>,

    /// `cells[row][col]`
    pub cells: Vec<Vec<f64>>,

    /// Smallest finite cell (0 if none)
    pub min: f64,

    /// Largest finite cell (0 if none)
    pub max: f64,
}

impl SensitivityMatrix {
    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Value at the unperturbed (0%, 0%) point, when both axes include it
    pub fn base_value(&self) -> Option<f64> {
        let row = self.row_variations.iter().position(|&v| v == 0.0)?;
        let col = self.col_variations.iter().position(|&v| v == 0.0)?;
        self.cell(row, col)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.col_variations.len()
    }
}

/// Evaluate `metric` over every (purchase, sale) price pair with the default solver
pub fn evaluate_matrix(
    inputs: &FatteningInputs,
    row_variations: &[f64],
    col_variations: &[f64],
    metric: MatrixMetric,
) -> SensitivityMatrix {
    evaluate_matrix_with(inputs, row_variations, col_variations, metric, &SolverSettings::default())
}

/// Evaluate `metric` over every (purchase, sale) price pair.
///
/// Each cell reprices the purchase and the sale; operating cost, time on feed
/// and carcass output stay at the base scenario's values.
pub fn evaluate_matrix_with(
    inputs: &FatteningInputs,
    row_variations: &[f64],
    col_variations: &[f64],
    metric: MatrixMetric,
    settings: &SolverSettings,
) -> SensitivityMatrix {
    let base_revenue = inputs.sale_revenue();
    let operating_cost = inputs.operating_cost();
    let permanence_months = inputs.permanence_months();

    let cells: Vec<Vec<f64>> = row_variations
        .par_iter()
        .map(|&row| {
            let purchase_price = inputs.purchase_price_per_kg * (1.0 + row);
            let purchase_cost = inputs.purchase_weight_kg * purchase_price;

            col_variations
                .iter()
                .map(|&col| {
                    let sale_revenue = base_revenue * (1.0 + col);
                    let profit = sale_revenue - purchase_cost - operating_cost;

                    match metric {
                        MatrixMetric::Profit => profit,
                        MatrixMetric::MarginPct => percent_of(profit, sale_revenue),
                        MatrixMetric::MonthlyIrr | MatrixMetric::AnnualIrr => {
                            let schedule = CashFlowSchedule::new(
                                inputs.purchase_weight_kg,
                                purchase_price,
                                inputs.monthly_cost,
                                sale_revenue,
                                permanence_months,
                            );
                            let monthly = solve_with_settings(&schedule, settings).rate_pct;
                            if metric == MatrixMetric::AnnualIrr {
                                convert_monthly_to_annual_rate(monthly)
                            } else {
                                monthly
                            }
                        }
                    }
                })
                .collect()
        })
        .collect();

    let (min, max) = finite_range(&cells);

    SensitivityMatrix {
        metric,
        row_variations: row_variations.to_vec(),
        col_variations: col_variations.to_vec(),
        cells,
        min,
        max,
    }
}

fn finite_range(cells: &[Vec<f64>]) -> (f64, f64) {
    let mut values = cells.iter().flatten().copied().filter(|v| v.is_finite());
    match values.next() {
        Some(first) => values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))),
        None => (0.0, 0.0),
    }
}

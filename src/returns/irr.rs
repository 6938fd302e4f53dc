//! Internal Rate of Return (IRR) of a fattening cycle
//!
//! Newton-Raphson over the continuous (possibly fractional) horizon of a
//! [`CashFlowSchedule`]. The solver never fails: degenerate or
//! non-convergent runs hand back the last iterate, and [`IrrSolution`]
//! records how the run ended for callers that care.

use log::debug;
use serde::{Deserialize, Serialize};

use super::cashflows::CashFlowSchedule;

/// Starting guess for the monthly rate (1%)
pub const DEFAULT_INITIAL_GUESS: f64 = 0.01;

/// Iteration cap per solve
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Step size below which the iteration counts as converged
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Derivative magnitude below which a Newton step is not attempted
pub const DEFAULT_DERIVATIVE_FLOOR: f64 = 1e-6;

/// Tuning knobs for the Newton-Raphson iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    pub initial_guess: f64,
    pub max_iterations: u32,
    pub tolerance: f64,
    pub derivative_floor: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            derivative_floor: DEFAULT_DERIVATIVE_FLOOR,
        }
    }
}

/// How a solve ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Successive iterates moved less than the tolerance
    Converged,
    /// The NPV slope was too flat to take a Newton step
    FlatDerivative,
    /// The iteration cap was reached
    IterationLimit,
    /// Permanence period of zero (or less); no return is computable
    ZeroDuration,
}

/// Result of a solve, with the rate in percentage units (1.5 means 1.5%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrSolution {
    pub rate_pct: f64,
    pub converged: bool,
    pub iterations: u32,
    pub termination: Termination,
}

impl IrrSolution {
    fn zero_duration() -> Self {
        Self {
            rate_pct: 0.0,
            converged: false,
            iterations: 0,
            termination: Termination::ZeroDuration,
        }
    }

    /// Periodic rate as a decimal (0.015 for 1.5%)
    pub fn rate_decimal(&self) -> f64 {
        self.rate_pct / 100.0
    }
}

/// Solve the monthly IRR of `schedule` with custom settings
pub fn solve_with_settings(schedule: &CashFlowSchedule, settings: &SolverSettings) -> IrrSolution {
    if schedule.permanence_months <= 0.0 {
        return IrrSolution::zero_duration();
    }

    let mut rate = settings.initial_guess;

    for iteration in 1..=settings.max_iterations {
        let npv = schedule.npv(rate);
        let dnpv = schedule.npv_derivative(rate);

        if dnpv.abs() < settings.derivative_floor {
            debug!(
                "IRR solve stopped on flat derivative at iteration {} (rate {:.8}, dNPV {:e})",
                iteration, rate, dnpv
            );
            return IrrSolution {
                rate_pct: rate * 100.0,
                converged: false,
                iterations: iteration,
                termination: Termination::FlatDerivative,
            };
        }

        let new_rate = rate - npv / dnpv;

        if (new_rate - rate).abs() < settings.tolerance {
            return IrrSolution {
                rate_pct: new_rate * 100.0,
                converged: true,
                iterations: iteration,
                termination: Termination::Converged,
            };
        }

        rate = new_rate;
    }

    debug!(
        "IRR solve hit the {} iteration cap without converging (last rate {:.8})",
        settings.max_iterations, rate
    );
    IrrSolution {
        rate_pct: rate * 100.0,
        converged: false,
        iterations: settings.max_iterations,
        termination: Termination::IterationLimit,
    }
}

/// Solve the monthly IRR of a fattening cycle, keeping the convergence details
pub fn solve_livestock_irr(
    purchase_weight: f64,
    purchase_price: f64,
    monthly_cost: f64,
    sales_value: f64,
    permanence_months: f64,
) -> IrrSolution {
    let schedule = CashFlowSchedule::new(
        purchase_weight,
        purchase_price,
        monthly_cost,
        sales_value,
        permanence_months,
    );
    solve_with_settings(&schedule, &SolverSettings::default())
}

/// Monthly IRR of a fattening cycle, in percentage units.
///
/// # Arguments
/// * `purchase_weight` - Live weight bought, kg
/// * `purchase_price` - Price paid per kg
/// * `monthly_cost` - Operating cost per month
/// * `sales_value` - Sale proceeds at the end of the cycle
/// * `permanence_months` - Holding period in months, may be fractional
///
/// # Returns
/// * `f64` - Monthly rate (1.5 means 1.5%). `0` when `permanence_months <= 0`;
///   the last iterate when the iteration does not converge.
pub fn calculate_livestock_irr(
    purchase_weight: f64,
    purchase_price: f64,
    monthly_cost: f64,
    sales_value: f64,
    permanence_months: f64,
) -> f64 {
    solve_livestock_irr(
        purchase_weight,
        purchase_price,
        monthly_cost,
        sales_value,
        permanence_months,
    )
    .rate_pct
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_zero_duration_returns_zero() {
        assert_eq!(calculate_livestock_irr(200.0, 14.5, 135.0, 4000.0, 0.0), 0.0);
        assert_eq!(calculate_livestock_irr(1.0, 1.0, 1.0, 1.0, -3.0), 0.0);

        let solution = solve_livestock_irr(200.0, 14.5, 135.0, 4000.0, 0.0);
        assert_eq!(solution.termination, Termination::ZeroDuration);
        assert!(!solution.converged);
    }

    #[test]
    fn test_root_property() {
        let solution = solve_livestock_irr(200.0, 14.50, 135.0, 4000.0, 8.2);
        assert!(solution.converged, "expected convergence, got {:?}", solution);

        let schedule = CashFlowSchedule::new(200.0, 14.50, 135.0, 4000.0, 8.2);
        assert_abs_diff_eq!(schedule.npv(solution.rate_decimal()), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_simple_doubling_without_costs() {
        // 1000 grows to 1100 over one month with no operating cost: 10%
        let irr = calculate_livestock_irr(100.0, 10.0, 0.0, 1100.0, 1.0);
        assert_relative_eq!(irr, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_profitable_cycle_has_positive_rate() {
        let irr = calculate_livestock_irr(200.0, 14.50, 135.0, 4800.0, 8.2);
        assert!(irr > 0.0 && irr < 10.0, "got {}", irr);
    }

    #[test]
    fn test_loss_making_cycle_has_negative_rate() {
        let irr = calculate_livestock_irr(200.0, 14.50, 135.0, 3500.0, 8.2);
        assert!(irr < 0.0, "got {}", irr);
    }

    #[test]
    fn test_flat_derivative_stops_early() {
        // No cost and no revenue: NPV is flat in the rate
        let solution = solve_livestock_irr(0.0, 0.0, 0.0, 0.0, 6.0);
        assert_eq!(solution.termination, Termination::FlatDerivative);
        assert_eq!(solution.iterations, 1);
        assert_relative_eq!(solution.rate_pct, DEFAULT_INITIAL_GUESS * 100.0);
    }

    #[test]
    fn test_iteration_cap_returns_last_iterate() {
        let schedule = CashFlowSchedule::new(200.0, 14.50, 135.0, 4000.0, 8.2);
        let settings = SolverSettings {
            max_iterations: 1,
            tolerance: 0.0,
            ..SolverSettings::default()
        };
        let solution = solve_with_settings(&schedule, &settings);
        assert_eq!(solution.termination, Termination::IterationLimit);
        assert!(!solution.converged);
        assert!(solution.rate_pct.is_finite());
        assert!(solution.rate_pct != DEFAULT_INITIAL_GUESS * 100.0);
    }

    #[test]
    fn test_plain_function_matches_solution() {
        let solution = solve_livestock_irr(250.0, 13.0, 150.0, 4600.0, 9.7);
        let rate = calculate_livestock_irr(250.0, 13.0, 150.0, 4600.0, 9.7);
        assert_eq!(solution.rate_pct, rate);
    }

    #[test]
    fn test_idempotent() {
        let first = calculate_livestock_irr(200.0, 14.50, 135.0, 4000.0, 8.2);
        let second = calculate_livestock_irr(200.0, 14.50, 135.0, 4000.0, 8.2);
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

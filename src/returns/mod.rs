//! Return measures for a single fattening cycle
//!
//! - [`CashFlowSchedule`]: purchase, monthly costs and sale as a discountable schedule
//! - [`calculate_livestock_irr`]: monthly IRR via Newton-Raphson
//! - [`convert_monthly_to_annual_rate`]: monthly to effective annual rate

mod annualize;
mod cashflows;
mod irr;

pub use annualize::{convert_annual_to_monthly_rate, convert_monthly_to_annual_rate, PERIODS_PER_YEAR};
pub use cashflows::CashFlowSchedule;
pub use irr::{
    calculate_livestock_irr, solve_livestock_irr, solve_with_settings, IrrSolution,
    SolverSettings, Termination, DEFAULT_DERIVATIVE_FLOOR, DEFAULT_INITIAL_GUESS,
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};

//! Conversion between monthly and effective annual rates
//!
//! Both directions work in percentage units and assume 12 compounding
//! periods per year.

/// Compounding periods per year
pub const PERIODS_PER_YEAR: i32 = 12;

/// Effective annual rate equivalent to a monthly rate, both in percent.
///
/// Not guarded below -100% per month.
pub fn convert_monthly_to_annual_rate(monthly_rate_pct: f64) -> f64 {
    if monthly_rate_pct == 0.0 {
        return 0.0;
    }

    let monthly = monthly_rate_pct / 100.0;
    ((1.0 + monthly).powi(PERIODS_PER_YEAR) - 1.0) * 100.0
}

/// Monthly rate equivalent to an effective annual rate, both in percent.
///
/// Yields NaN below -100% per year.
pub fn convert_annual_to_monthly_rate(annual_rate_pct: f64) -> f64 {
    if annual_rate_pct == 0.0 {
        return 0.0;
    }

    let annual = annual_rate_pct / 100.0;
    ((1.0 + annual).powf(1.0 / PERIODS_PER_YEAR as f64) - 1.0) * 100.0
}

//! Cash-flow schedule of a single fattening cycle
//!
//! One purchase outflow at month 0, a level operating cost at every whole
//! month, a pro-rated cost for any fractional tail month and a single sale
//! inflow at the end of the permanence period.

use serde::{Deserialize, Serialize};

/// Discountable cash-flow schedule for one head (or one lot) of cattle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    /// Purchase outlay at month 0 (weight x price)
    pub investment: f64,

    /// Operating cost charged at the end of every month
    pub monthly_cost: f64,

    /// Sale proceeds received at the end of the permanence period
    pub sales_value: f64,

    /// Holding period in months, may be fractional
    pub permanence_months: f64,
}

impl CashFlowSchedule {
    pub fn new(
        purchase_weight: f64,
        purchase_price: f64,
        monthly_cost: f64,
        sales_value: f64,
        permanence_months: f64,
    ) -> Self {
        Self {
            investment: purchase_weight * purchase_price,
            monthly_cost,
            sales_value,
            permanence_months,
        }
    }

    /// Number of whole months carrying a full operating cost
    pub fn whole_months(&self) -> u32 {
        self.permanence_months.floor().max(0.0) as u32
    }

    /// Fraction of a month left over after the whole months
    pub fn fraction(&self) -> f64 {
        self.permanence_months - self.permanence_months.floor()
    }

    /// Operating cost of the fractional tail month (0 when the period is whole)
    pub fn fractional_cost(&self) -> f64 {
        self.monthly_cost * self.fraction()
    }

    /// Net present value at a periodic `rate` (decimal, 0.01 = 1%)
    ///
    /// The fractional cost is discounted at the full horizon, together with
    /// the sale, rather than at its own partial-month boundary.
    pub fn npv(&self, rate: f64) -> f64 {
        let base = 1.0 + rate;
        let mut npv = -self.investment;

        for t in 1..=self.whole_months() {
            npv -= self.monthly_cost / base.powi(t as i32);
        }

        let horizon = base.powf(self.permanence_months);
        if self.fraction() > 0.0 {
            npv -= self.fractional_cost() / horizon;
        }

        npv + self.sales_value / horizon
    }

    /// First derivative of [`npv`](Self::npv) with respect to `rate`
    pub fn npv_derivative(&self, rate: f64) -> f64 {
        let base = 1.0 + rate;
        let n = self.permanence_months;
        let mut dnpv = 0.0;

        // d/dr of -C/(1+r)^t is +t*C/(1+r)^(t+1)
        for t in 1..=self.whole_months() {
            dnpv += t as f64 * self.monthly_cost / base.powi(t as i32 + 1);
        }

        let horizon = base.powf(n + 1.0);
        if self.fraction() > 0.0 {
            dnpv += n * self.fractional_cost() / horizon;
        }

        dnpv - n * self.sales_value / horizon
    }

    /// Sum of all flows with no discounting
    pub fn undiscounted_total(&self) -> f64 {
        self.npv(0.0)
    }
}

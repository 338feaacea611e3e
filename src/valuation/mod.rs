//! Investment valuation over the annual projection
//!
//! NPV at the configured discount rate, IRR by bounded Newton-Raphson,
//! payback with linear interpolation inside the crossing year, and the
//! cumulative dashboard figures.

mod irr;

pub use irr::{solve_irr, IrrOutcome, IrrParams};

use serde::{Deserialize, Serialize};

use crate::financing::Financing;
use crate::projection::AnnualPeriod;

/// Net present value of the operating-year cash flows against the equity
/// outlay. `cashflows[0]` is year 1.
pub fn npv(equity_invested: f64, cashflows: &[f64], rate: f64) -> f64 {
    let mut value = -equity_invested;
    for (i, cf) in cashflows.iter().enumerate() {
        value += cf / (1.0 + rate).powi(i as i32 + 1);
    }
    value
}

/// When the cumulative free cash flow recovers the initial outlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaybackPeriod {
    /// Fractional years until cumulative FCF first reaches zero
    Years(f64),
    /// Cumulative FCF stays negative through the horizon
    NotReached,
    /// The crossing year has zero cash flow, so no interpolation exists
    Undefined,
}

impl PaybackPeriod {
    pub fn years(&self) -> Option<f64> {
        match self {
            PaybackPeriod::Years(y) => Some(*y),
            _ => None,
        }
    }
}

/// Valuation metrics for one projection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationResult {
    /// NPV at the configured discount rate
    pub npv: f64,
    /// IRR of the equity outlay against operating free cash flows
    pub irr: IrrOutcome,
    /// Payback period in fractional years
    pub payback: PaybackPeriod,
    /// Sum of operating-year free cash flows
    pub five_year_fcf: f64,
    /// Sum of operating-year net income
    pub five_year_net_income: f64,
    /// Sum of operating-year revenue
    pub five_year_revenue: f64,
    /// Net income averaged over the operating years
    pub average_annual_net_income: f64,
    /// Five-year net income over the initial investment, percent
    pub simple_roi_pct: f64,
}

/// Evaluate the annual sequence (years 0-5) with the default IRR knobs.
/// `discount_rate` is a percentage, as entered.
pub fn evaluate(
    annual: &[AnnualPeriod],
    financing: &Financing,
    discount_rate: f64,
) -> ValuationResult {
    evaluate_with_params(annual, financing, discount_rate, &IrrParams::default())
}

/// Evaluate with explicit IRR tuning.
pub fn evaluate_with_params(
    annual: &[AnnualPeriod],
    financing: &Financing,
    discount_rate: f64,
    params: &IrrParams,
) -> ValuationResult {
    let operating: Vec<&AnnualPeriod> = annual.iter().filter(|r| r.year > 0).collect();
    let cashflows: Vec<f64> = operating.iter().map(|r| r.free_cash_flow).collect();

    let five_year_fcf: f64 = cashflows.iter().sum();
    let five_year_net_income: f64 = operating.iter().map(|r| r.net_income).sum();
    let five_year_revenue: f64 = operating.iter().map(|r| r.total_revenue).sum();
    let average_annual_net_income = if operating.is_empty() {
        0.0
    } else {
        five_year_net_income / operating.len() as f64
    };
    let simple_roi_pct = if financing.initial_investment > 0.0 {
        five_year_net_income / financing.initial_investment * 100.0
    } else {
        0.0
    };

    ValuationResult {
        npv: npv(financing.equity_invested, &cashflows, discount_rate / 100.0),
        irr: solve_irr(financing.equity_invested, &cashflows, params),
        payback: payback_period(annual),
        five_year_fcf,
        five_year_net_income,
        five_year_revenue,
        average_annual_net_income,
        simple_roi_pct,
    }
}

/// First year whose cumulative free cash flow reaches zero, interpolated
/// within that year by its cash flow.
fn payback_period(annual: &[AnnualPeriod]) -> PaybackPeriod {
    for i in 1..annual.len() {
        if annual[i].cumulative_free_cash_flow >= 0.0 {
            if annual[i].free_cash_flow == 0.0 {
                return PaybackPeriod::Undefined;
            }
            let prior_cumulative = annual[i - 1].cumulative_free_cash_flow;
            let years = (i - 1) as f64 + (-prior_cumulative / annual[i].free_cash_flow);
            return PaybackPeriod::Years(years);
        }
    }
    PaybackPeriod::NotReached
}

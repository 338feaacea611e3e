//! Period record structures for projection output
//!
//! Every field is declared up front; nothing is added conditionally. The
//! year-0 annual record carries only the investment outflow and loan draw,
//! with every operating field an explicit zero.

use serde::{Deserialize, Serialize};

/// One month of the year-1 projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPeriod {
    /// Month index, 1-12
    pub month: u32,

    // Projected volumes (rounded to whole units)
    pub subscribers: f64,
    pub deliveries: f64,
    pub transfers: f64,

    // Revenue decomposition
    pub subscription_revenue: f64,
    pub delivery_revenue: f64,
    pub transfer_revenue: f64,
    pub total_revenue: f64,

    // Cost decomposition
    pub cogs: f64,
    pub rent_cost: f64,
    pub maintenance_cost: f64,
    pub electricity_cost: f64,
    pub staff_cost: f64,
    pub fixed_cost: f64,
    pub total_operating_cost: f64,

    // Earnings
    pub gross_profit: f64,
    pub ebitda: f64,
    pub depreciation: f64,
    pub ebit: f64,
    pub interest: f64,
    pub tax: f64,
    pub net_income: f64,

    // Revenue-normalized margins, percent (0 when revenue is 0)
    pub gross_margin_pct: f64,
    pub ebitda_margin_pct: f64,
    pub net_margin_pct: f64,
}

impl MonthlyPeriod {
    /// New record for a month with every value zeroed.
    pub fn new(month: u32) -> Self {
        Self {
            month,
            subscribers: 0.0,
            deliveries: 0.0,
            transfers: 0.0,
            subscription_revenue: 0.0,
            delivery_revenue: 0.0,
            transfer_revenue: 0.0,
            total_revenue: 0.0,
            cogs: 0.0,
            rent_cost: 0.0,
            maintenance_cost: 0.0,
            electricity_cost: 0.0,
            staff_cost: 0.0,
            fixed_cost: 0.0,
            total_operating_cost: 0.0,
            gross_profit: 0.0,
            ebitda: 0.0,
            depreciation: 0.0,
            ebit: 0.0,
            interest: 0.0,
            tax: 0.0,
            net_income: 0.0,
            gross_margin_pct: 0.0,
            ebitda_margin_pct: 0.0,
            net_margin_pct: 0.0,
        }
    }
}

/// One year of the 5-year projection, plus the year-0 outflow record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualPeriod {
    /// Year index, 0-5
    pub year: u32,

    // Projected volumes (monthly delivery/transfer run rates, rounded)
    pub subscribers: f64,
    pub deliveries_per_month: f64,
    pub transfers_per_month: f64,

    // Revenue decomposition (annualized)
    pub subscription_revenue: f64,
    pub delivery_revenue: f64,
    pub transfer_revenue: f64,
    pub total_revenue: f64,

    // Cost decomposition (annualized, inflation applied per class)
    pub cogs: f64,
    pub rent_cost: f64,
    pub maintenance_cost: f64,
    pub electricity_cost: f64,
    pub staff_cost: f64,
    pub fixed_cost: f64,
    pub total_operating_cost: f64,

    // Earnings
    pub gross_profit: f64,
    pub ebitda: f64,
    pub depreciation: f64,
    pub ebit: f64,
    pub interest: f64,
    pub ebt: f64,
    pub tax: f64,
    pub net_income: f64,

    // Debt service
    pub loan_payment: f64,
    pub principal_repaid: f64,

    // Cash flow
    pub working_capital: f64,
    pub working_capital_change: f64,
    pub free_cash_flow: f64,
    pub cumulative_free_cash_flow: f64,

    // Balance sheet
    pub cash_balance: f64,
    pub net_fixed_assets: f64,
    pub total_assets: f64,
    pub loan_balance: f64,
    pub retained_earnings: f64,
    pub equity_balance: f64,

    // Ratios (0 on non-positive denominators)
    pub gross_margin_pct: f64,
    pub ebitda_margin_pct: f64,
    pub net_margin_pct: f64,
    pub return_on_equity_pct: f64,
    pub return_on_assets_pct: f64,
    pub debt_to_equity: f64,
}

impl AnnualPeriod {
    /// New record for a year with every value zeroed.
    pub fn new(year: u32) -> Self {
        Self {
            year,
            subscribers: 0.0,
            deliveries_per_month: 0.0,
            transfers_per_month: 0.0,
            subscription_revenue: 0.0,
            delivery_revenue: 0.0,
            transfer_revenue: 0.0,
            total_revenue: 0.0,
            cogs: 0.0,
            rent_cost: 0.0,
            maintenance_cost: 0.0,
            electricity_cost: 0.0,
            staff_cost: 0.0,
            fixed_cost: 0.0,
            total_operating_cost: 0.0,
            gross_profit: 0.0,
            ebitda: 0.0,
            depreciation: 0.0,
            ebit: 0.0,
            interest: 0.0,
            ebt: 0.0,
            tax: 0.0,
            net_income: 0.0,
            loan_payment: 0.0,
            principal_repaid: 0.0,
            working_capital: 0.0,
            working_capital_change: 0.0,
            free_cash_flow: 0.0,
            cumulative_free_cash_flow: 0.0,
            cash_balance: 0.0,
            net_fixed_assets: 0.0,
            total_assets: 0.0,
            loan_balance: 0.0,
            retained_earnings: 0.0,
            equity_balance: 0.0,
            gross_margin_pct: 0.0,
            ebitda_margin_pct: 0.0,
            net_margin_pct: 0.0,
            return_on_equity_pct: 0.0,
            return_on_assets_pct: 0.0,
            debt_to_equity: 0.0,
        }
    }

    /// The year-0 record: the equity outflow and the loan principal drawn.
    /// All operating fields stay zero, meaning "not applicable".
    pub fn initial_outlay(equity_invested: f64, loan_drawn: f64) -> Self {
        let mut record = Self::new(0);
        record.free_cash_flow = -equity_invested;
        record.cumulative_free_cash_flow = -equity_invested;
        record.loan_balance = loan_drawn;
        record
    }
}

/// Ordered monthly and annual period sequences for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// 12 entries, months 1-12 of year 1
    pub monthly: Vec<MonthlyPeriod>,
    /// 6 entries, years 0-5
    pub annual: Vec<AnnualPeriod>,
}

impl ProjectionResult {
    /// Cumulative free cash flow over the whole horizon (year 0 included).
    pub fn final_cumulative_fcf(&self) -> f64 {
        self.annual
            .last()
            .map(|r| r.cumulative_free_cash_flow)
            .unwrap_or(0.0)
    }

    /// Operating years only (year 0 excluded).
    pub fn operating_years(&self) -> &[AnnualPeriod] {
        if self.annual.is_empty() {
            &self.annual
        } else {
            &self.annual[1..]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_outlay_record() {
        let record = AnnualPeriod::initial_outlay(600_000.0, 250_000.0);
        assert_eq!(record.year, 0);
        assert_eq!(record.free_cash_flow, -600_000.0);
        assert_eq!(record.cumulative_free_cash_flow, -600_000.0);
        assert_eq!(record.loan_balance, 250_000.0);
        // Operating fields are explicit zeros
        assert_eq!(record.total_revenue, 0.0);
        assert_eq!(record.net_income, 0.0);
        assert_eq!(record.equity_balance, 0.0);
    }

    #[test]
    fn test_operating_years_skips_year_zero() {
        let result = ProjectionResult {
            monthly: Vec::new(),
            annual: vec![
                AnnualPeriod::initial_outlay(100.0, 0.0),
                AnnualPeriod::new(1),
                AnnualPeriod::new(2),
            ],
        };
        let operating = result.operating_years();
        assert_eq!(operating.len(), 2);
        assert_eq!(operating[0].year, 1);
        assert_eq!(result.final_cumulative_fcf(), 0.0);
    }
}

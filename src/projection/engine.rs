//! Core projection engine: monthly pass (year 1) and annual pass (years 0-5)
//!
//! Revenue volumes compound monthly within year 1 and annually across the
//! five-year horizon; operating costs inflate annually per cost class and
//! are never inflated inside year 1. The annual pass folds an
//! [`AnnualState`] forward so each year is a function of the assumption
//! set and the immediately preceding year only.

use crate::assumptions::AssumptionSet;
use crate::financing::Financing;

use super::records::{AnnualPeriod, MonthlyPeriod, ProjectionResult};
use super::state::AnnualState;

/// Years in the annual projection horizon (plus the year-0 outlay record).
pub const PROJECTION_YEARS: u32 = 5;

/// Months in the detailed first-year pass.
pub const PROJECTION_MONTHS: u32 = 12;

/// Revenue-normalized percentage, 0 when revenue is 0.
fn margin_pct(numerator: f64, revenue: f64) -> f64 {
    if revenue > 0.0 {
        numerator / revenue * 100.0
    } else {
        0.0
    }
}

/// Ratio with a guarded denominator, 0 when the denominator is not positive.
fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Deterministic projection engine for one assumption snapshot.
pub struct ProjectionEngine {
    assumptions: AssumptionSet,
    financing: Financing,
}

impl ProjectionEngine {
    /// Build an engine, deriving the financing split from the assumptions.
    pub fn new(assumptions: AssumptionSet) -> Self {
        let financing = Financing::from_assumptions(&assumptions);
        Self {
            assumptions,
            financing,
        }
    }

    /// The financing split this engine projects under.
    pub fn financing(&self) -> &Financing {
        &self.financing
    }

    /// Run both passes and return the ordered period sequences.
    pub fn project(&self) -> ProjectionResult {
        ProjectionResult {
            monthly: self.project_monthly(),
            annual: self.project_annual(),
        }
    }

    /// Annual straight-line depreciation charge, 0 without a write-off period.
    fn annual_depreciation(&self) -> f64 {
        if self.assumptions.depreciation_years > 0 {
            self.financing.initial_investment / self.assumptions.depreciation_years as f64
        } else {
            0.0
        }
    }

    /// Year-1 monthly pass. Growth compounds at rate/12 per month with
    /// exponent m-1, so month 1 carries the unaltered base volumes.
    fn project_monthly(&self) -> Vec<MonthlyPeriod> {
        let a = &self.assumptions;
        let monthly_dep = self.annual_depreciation() / 12.0;
        let monthly_loan_rate = a.loan_interest_rate / 100.0 / 12.0;

        let mut months = Vec::with_capacity(PROJECTION_MONTHS as usize);
        for month in 1..=PROJECTION_MONTHS {
            let elapsed = (month - 1) as i32;
            let grow =
                |base: f64, rate: f64| (base * (1.0 + rate / 100.0 / 12.0).powi(elapsed)).round();

            let mut row = MonthlyPeriod::new(month);
            row.subscribers = grow(a.student_subscribers, a.subscriber_growth_rate);
            row.deliveries = grow(a.deliveries_per_month, a.delivery_growth_rate);
            row.transfers = grow(a.p2p_transfers_per_month, a.p2p_growth_rate);

            row.subscription_revenue = row.subscribers * a.yearly_sub_fee / 12.0;
            row.delivery_revenue = row.deliveries * a.price_per_delivery;
            row.transfer_revenue = row.transfers * a.price_per_transfer;
            row.total_revenue =
                row.subscription_revenue + row.delivery_revenue + row.transfer_revenue;

            // Year-1 cost basis, no inflation inside the first year
            row.rent_cost = a.total_monthly_rent();
            row.maintenance_cost = a.total_monthly_maintenance();
            row.electricity_cost = a.total_monthly_electricity();
            row.staff_cost = a.monthly_staff_cost();
            row.fixed_cost = a.monthly_overhead();
            row.cogs = row.deliveries * a.courier_cost_per_delivery
                + row.transfers * a.courier_cost_per_transfer;
            row.total_operating_cost = row.rent_cost
                + row.maintenance_cost
                + row.electricity_cost
                + row.staff_cost
                + row.fixed_cost
                + row.cogs;

            row.gross_profit = row.total_revenue - row.cogs;
            row.ebitda = row.total_revenue - row.total_operating_cost;
            row.depreciation = monthly_dep;
            row.ebit = row.ebitda - row.depreciation;
            row.interest = if self.financing.loan_drawn > 0.0 {
                self.financing.monthly_payment * monthly_loan_rate
            } else {
                0.0
            };
            row.tax = ((row.ebit - row.interest) * a.tax_rate / 100.0).max(0.0);
            row.net_income = row.ebit - row.interest - row.tax;

            row.gross_margin_pct = margin_pct(row.gross_profit, row.total_revenue);
            row.ebitda_margin_pct = margin_pct(row.ebitda, row.total_revenue);
            row.net_margin_pct = margin_pct(row.net_income, row.total_revenue);

            months.push(row);
        }
        months
    }

    /// Years 0-5. Year 0 is the investment outflow; years 1-5 fold the
    /// carried state forward one year at a time.
    fn project_annual(&self) -> Vec<AnnualPeriod> {
        let mut annual = Vec::with_capacity(PROJECTION_YEARS as usize + 1);
        annual.push(AnnualPeriod::initial_outlay(
            self.financing.equity_invested,
            self.financing.loan_drawn,
        ));

        let mut state = AnnualState::opening(&self.financing);
        for year in 1..=PROJECTION_YEARS {
            let row = self.project_year(year, &mut state);
            annual.push(row);
        }
        annual
    }

    /// One operating year: revenue growth, per-class cost inflation, debt
    /// service from the amortization schedule, and the balance-sheet
    /// roll-forward. Advances `state` to the end of this year.
    fn project_year(&self, year: u32, state: &mut AnnualState) -> AnnualPeriod {
        let a = &self.assumptions;
        let elapsed = (year - 1) as i32;
        let grow = |base: f64, rate: f64| (base * (1.0 + rate / 100.0).powi(elapsed)).round();
        let inflate = |rate: f64| (1.0 + rate / 100.0).powi(elapsed);

        let mut row = AnnualPeriod::new(year);
        row.subscribers = grow(a.student_subscribers, a.subscriber_growth_rate);
        row.deliveries_per_month = grow(a.deliveries_per_month, a.delivery_growth_rate);
        row.transfers_per_month = grow(a.p2p_transfers_per_month, a.p2p_growth_rate);

        row.subscription_revenue = row.subscribers * a.yearly_sub_fee;
        row.delivery_revenue = row.deliveries_per_month * a.price_per_delivery * 12.0;
        row.transfer_revenue = row.transfers_per_month * a.price_per_transfer * 12.0;
        row.total_revenue = row.subscription_revenue + row.delivery_revenue + row.transfer_revenue;

        // Inflation multipliers are keyed per cost class; courier COGS
        // scales with volume only
        row.rent_cost = a.total_monthly_rent() * 12.0 * inflate(a.rent_inflation_rate);
        row.maintenance_cost =
            a.total_monthly_maintenance() * 12.0 * inflate(a.general_inflation_rate);
        row.electricity_cost =
            a.total_monthly_electricity() * 12.0 * inflate(a.general_inflation_rate);
        row.staff_cost = a.monthly_staff_cost() * 12.0 * inflate(a.salary_inflation_rate);
        row.fixed_cost = a.monthly_overhead() * 12.0 * inflate(a.general_inflation_rate);
        row.cogs = row.deliveries_per_month * a.courier_cost_per_delivery * 12.0
            + row.transfers_per_month * a.courier_cost_per_transfer * 12.0;
        row.total_operating_cost = row.rent_cost
            + row.maintenance_cost
            + row.electricity_cost
            + row.staff_cost
            + row.fixed_cost
            + row.cogs;

        row.gross_profit = row.total_revenue - row.cogs;
        row.ebitda = row.total_revenue - row.total_operating_cost;
        row.depreciation = if year <= a.depreciation_years {
            self.annual_depreciation()
        } else {
            0.0
        };
        row.ebit = row.ebitda - row.depreciation;

        if let Some(loan_year) = self.financing.loan_year(year) {
            row.interest = loan_year.interest;
            row.principal_repaid = loan_year.principal;
            row.loan_payment = 12.0 * self.financing.monthly_payment;
            row.loan_balance = loan_year.closing_balance;
        } else {
            row.loan_balance = state.loan_balance;
        }

        row.ebt = row.ebit - row.interest;
        row.tax = (row.ebt * a.tax_rate / 100.0).max(0.0);
        row.net_income = row.ebt - row.tax;

        row.working_capital = row.total_revenue * a.working_capital_percent / 100.0;
        row.working_capital_change = row.working_capital - state.working_capital;
        row.free_cash_flow = row.net_income + row.depreciation
            - row.working_capital_change
            - row.principal_repaid;
        row.cumulative_free_cash_flow = state.cumulative_fcf + row.free_cash_flow;

        row.cash_balance = state.cash + row.free_cash_flow;
        let accumulated_dep =
            self.annual_depreciation() * year.min(a.depreciation_years) as f64;
        row.net_fixed_assets = self.financing.initial_investment - accumulated_dep;
        row.total_assets = row.cash_balance + row.working_capital + row.net_fixed_assets;
        row.retained_earnings = state.retained_earnings + row.net_income;
        row.equity_balance = self.financing.equity_invested + row.retained_earnings;

        row.gross_margin_pct = margin_pct(row.gross_profit, row.total_revenue);
        row.ebitda_margin_pct = margin_pct(row.ebitda, row.total_revenue);
        row.net_margin_pct = margin_pct(row.net_income, row.total_revenue);
        row.return_on_equity_pct = guarded_ratio(row.net_income, row.equity_balance) * 100.0;
        row.return_on_assets_pct = guarded_ratio(row.net_income, row.total_assets) * 100.0;
        row.debt_to_equity = guarded_ratio(row.loan_balance, row.equity_balance);

        state.cash = row.cash_balance;
        state.retained_earnings = row.retained_earnings;
        state.loan_balance = row.loan_balance;
        state.working_capital = row.working_capital;
        state.cumulative_fcf = row.cumulative_free_cash_flow;

        row
    }
}

//! Financing split and loan amortization
//!
//! Derives the equity/debt funding split for the initial build-out and,
//! under loan financing, the level monthly payment and a year-by-year
//! amortization schedule. Interest accrues on the prior year-end balance
//! at the annual rate (simple annual compounding of the outstanding
//! balance, not a monthly roll-up).

use serde::{Deserialize, Serialize};

use crate::assumptions::{AssumptionSet, FinancingType};

/// One contractual year of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanYear {
    /// Contract year, 1-indexed
    pub year: u32,
    /// Balance outstanding at the start of the year
    pub opening_balance: f64,
    /// Interest accrued on the opening balance
    pub interest: f64,
    /// Principal retired during the year
    pub principal: f64,
    /// Balance outstanding at the end of the year, never negative
    pub closing_balance: f64,
}

/// Funding split and debt service for one assumption set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Financing {
    /// Total capital outlay for all facility classes
    pub initial_investment: f64,
    /// Investor cash after subtracting the loan draw; may be non-positive
    /// when the loan covers more than the build-out
    pub equity_invested: f64,
    /// Principal drawn at year 0 (0 under equity financing)
    pub loan_drawn: f64,
    /// Level monthly debt service payment
    pub monthly_payment: f64,
    /// Amortization rows for years 1..=loan_term_years
    pub schedule: Vec<LoanYear>,
}

/// Capital outlay: unit plus installation cost, summed per facility class.
pub fn initial_investment(inputs: &AssumptionSet) -> f64 {
    inputs.num_student_lockers as f64
        * (inputs.student_locker_cost_per_unit + inputs.installation_per_student_locker)
        + inputs.num_commercial_lockers as f64
            * (inputs.commercial_locker_cost_per_unit + inputs.installation_per_commercial_locker)
        + inputs.num_drop_boxes as f64
            * (inputs.drop_box_cost_per_unit + inputs.installation_per_drop_box)
}

/// Level monthly payment for `amount` over `n_months` at monthly rate `r`.
/// Straight-line when the rate is zero.
fn level_payment(amount: f64, monthly_rate: f64, n_months: u32) -> f64 {
    if n_months == 0 {
        return 0.0;
    }
    if monthly_rate.abs() < 1e-12 {
        return amount / n_months as f64;
    }
    let factor = (1.0 + monthly_rate).powi(n_months as i32);
    amount * monthly_rate * factor / (factor - 1.0)
}

impl Financing {
    /// Derive the funding split and amortization schedule.
    pub fn from_assumptions(inputs: &AssumptionSet) -> Self {
        let initial = initial_investment(inputs);

        let financed_by_loan =
            inputs.financing_type == FinancingType::Loan && inputs.loan_amount > 0.0;
        if !financed_by_loan {
            return Self {
                initial_investment: initial,
                equity_invested: initial,
                loan_drawn: 0.0,
                monthly_payment: 0.0,
                schedule: Vec::new(),
            };
        }

        let annual_rate = inputs.loan_interest_rate / 100.0;
        let monthly_payment = level_payment(
            inputs.loan_amount,
            annual_rate / 12.0,
            inputs.loan_term_years * 12,
        );

        let mut schedule = Vec::with_capacity(inputs.loan_term_years as usize);
        let mut balance = inputs.loan_amount;
        for year in 1..=inputs.loan_term_years {
            let opening_balance = balance;
            let interest = opening_balance * annual_rate;
            // The level payment always covers interest; the min() only
            // absorbs the rounding residue of the final year.
            let principal = (12.0 * monthly_payment - interest).min(opening_balance);
            let closing_balance = opening_balance - principal;
            schedule.push(LoanYear {
                year,
                opening_balance,
                interest,
                principal,
                closing_balance,
            });
            balance = closing_balance;
        }

        Self {
            initial_investment: initial,
            equity_invested: initial - inputs.loan_amount,
            loan_drawn: inputs.loan_amount,
            monthly_payment,
            schedule,
        }
    }

    /// Schedule row for a contract year, `None` past the term.
    pub fn loan_year(&self, year: u32) -> Option<&LoanYear> {
        if year == 0 {
            return None;
        }
        self.schedule.get(year as usize - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn loan_inputs(amount: f64, rate: f64, term: u32) -> AssumptionSet {
        let mut inputs = AssumptionSet::default();
        inputs.financing_type = FinancingType::Loan;
        inputs.loan_amount = amount;
        inputs.loan_interest_rate = rate;
        inputs.loan_term_years = term;
        inputs
    }

    #[test]
    fn test_initial_investment_rollup() {
        let inputs = AssumptionSet::default();
        // 30*(8000+2000) + 20*(8000+2000) + 20*(4000+1000)
        assert_eq!(initial_investment(&inputs), 600_000.0);
    }

    #[test]
    fn test_equity_financing_has_no_schedule() {
        let financing = Financing::from_assumptions(&AssumptionSet::default());
        assert_eq!(financing.equity_invested, 600_000.0);
        assert_eq!(financing.loan_drawn, 0.0);
        assert_eq!(financing.monthly_payment, 0.0);
        assert!(financing.schedule.is_empty());
    }

    #[test]
    fn test_zero_loan_amount_treated_as_equity() {
        let inputs = loan_inputs(0.0, 7.0, 5);
        let financing = Financing::from_assumptions(&inputs);
        assert_eq!(financing.equity_invested, 600_000.0);
        assert!(financing.schedule.is_empty());
    }

    #[test]
    fn test_level_payment_formula() {
        // $200k at 7% over 5 years: standard annuity payment
        let financing = Financing::from_assumptions(&loan_inputs(200_000.0, 7.0, 5));
        let r: f64 = 0.07 / 12.0;
        let factor = (1.0 + r).powi(60);
        let expected = 200_000.0 * r * factor / (factor - 1.0);
        assert_relative_eq!(financing.monthly_payment, expected, epsilon = 1e-9);
        assert_eq!(financing.equity_invested, 400_000.0);
    }

    #[test]
    fn test_zero_rate_amortizes_exactly() {
        let financing = Financing::from_assumptions(&loan_inputs(120_000.0, 0.0, 5));
        assert_relative_eq!(financing.monthly_payment, 2_000.0, epsilon = 1e-9);
        // No interest: each year retires exactly 12 payments of principal
        // and the balance closes at zero at the end of the term
        for row in &financing.schedule {
            assert_relative_eq!(row.interest, 0.0, epsilon = 1e-9);
            assert_relative_eq!(row.principal, 24_000.0, epsilon = 1e-6);
        }
        let total_principal: f64 = financing.schedule.iter().map(|r| r.principal).sum();
        assert_relative_eq!(total_principal, 120_000.0, epsilon = 1e-6);
        assert_relative_eq!(
            financing.schedule.last().unwrap().closing_balance,
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_schedule_conserves_principal() {
        let financing = Financing::from_assumptions(&loan_inputs(300_000.0, 7.0, 5));
        assert_eq!(financing.schedule.len(), 5);

        // Annual simple interest on the opening balance runs slightly
        // ahead of the monthly payment derivation, so a small residual
        // survives the term; retired principal plus residual is the draw
        let last = financing.schedule.last().unwrap();
        let total_principal: f64 = financing.schedule.iter().map(|r| r.principal).sum();
        assert_relative_eq!(
            total_principal + last.closing_balance,
            300_000.0,
            max_relative = 1e-9
        );
        assert!(last.closing_balance >= 0.0);
        assert!(last.closing_balance < 0.05 * financing.loan_drawn);
    }

    #[test]
    fn test_balance_monotonically_non_increasing() {
        let financing = Financing::from_assumptions(&loan_inputs(300_000.0, 7.0, 5));
        let mut prev = financing.loan_drawn;
        for row in &financing.schedule {
            assert_eq!(row.opening_balance, prev);
            assert!(row.closing_balance <= row.opening_balance);
            assert!(row.closing_balance >= 0.0);
            prev = row.closing_balance;
        }
    }

    #[test]
    fn test_zero_term_loan_never_amortizes() {
        let financing = Financing::from_assumptions(&loan_inputs(100_000.0, 7.0, 0));
        assert_eq!(financing.monthly_payment, 0.0);
        assert!(financing.schedule.is_empty());
        assert_eq!(financing.loan_drawn, 100_000.0);
    }

    #[test]
    fn test_loan_beyond_investment_gives_negative_equity() {
        let financing = Financing::from_assumptions(&loan_inputs(700_000.0, 7.0, 5));
        assert_eq!(financing.equity_invested, -100_000.0);
    }

    #[test]
    fn test_loan_year_lookup() {
        let financing = Financing::from_assumptions(&loan_inputs(300_000.0, 7.0, 5));
        assert!(financing.loan_year(0).is_none());
        assert_eq!(financing.loan_year(1).unwrap().year, 1);
        assert_eq!(financing.loan_year(5).unwrap().year, 5);
        assert!(financing.loan_year(6).is_none());
    }
}

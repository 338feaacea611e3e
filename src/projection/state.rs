//! Carried state for the annual projection pass
//!
//! Each year's record depends on the immediately preceding year through
//! this accumulator. The engine advances it one year at a time, which
//! makes the first-order recurrence an explicit contract rather than an
//! array-indexing convention.

use crate::financing::Financing;

/// Balances carried forward from one projection year to the next.
#[derive(Debug, Clone)]
pub struct AnnualState {
    /// Cash balance at the end of the prior year
    pub cash: f64,
    /// Retained earnings accumulated through the prior year
    pub retained_earnings: f64,
    /// Loan balance outstanding at the end of the prior year
    pub loan_balance: f64,
    /// Working capital held at the end of the prior year
    pub working_capital: f64,
    /// Cumulative free cash flow through the prior year
    pub cumulative_fcf: f64,
}

impl AnnualState {
    /// Opening state at the end of year 0: the equity draw sits in cash,
    /// nothing has been earned, and the loan is fully outstanding.
    pub fn opening(financing: &Financing) -> Self {
        Self {
            cash: financing.equity_invested,
            retained_earnings: 0.0,
            loan_balance: financing.loan_drawn,
            working_capital: 0.0,
            cumulative_fcf: -financing.equity_invested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{AssumptionSet, FinancingType};

    #[test]
    fn test_opening_state_equity() {
        let financing = Financing::from_assumptions(&AssumptionSet::default());
        let state = AnnualState::opening(&financing);
        assert_eq!(state.cash, 600_000.0);
        assert_eq!(state.loan_balance, 0.0);
        assert_eq!(state.cumulative_fcf, -600_000.0);
        assert_eq!(state.retained_earnings, 0.0);
        assert_eq!(state.working_capital, 0.0);
    }

    #[test]
    fn test_opening_state_loan() {
        let mut inputs = AssumptionSet::default();
        inputs.financing_type = FinancingType::Loan;
        inputs.loan_amount = 250_000.0;
        let financing = Financing::from_assumptions(&inputs);
        let state = AnnualState::opening(&financing);
        assert_eq!(state.cash, 350_000.0);
        assert_eq!(state.loan_balance, 250_000.0);
        assert_eq!(state.cumulative_fcf, -350_000.0);
    }
}

//! Internal rate of return via bounded Newton-Raphson
//!
//! The derivative is a forward finite difference and the iteration count
//! is hard-capped; a run that fails to converge reports its last estimate
//! instead of failing, so the rest of the valuation is never blocked.

use serde::{Deserialize, Serialize};

use super::npv;

/// Newton-Raphson tuning knobs. The defaults are working values, not
/// validated truths; override them per run if a scenario needs tighter
/// convergence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrParams {
    /// Starting rate for the iteration
    pub initial_guess: f64,
    /// Forward-difference step for the derivative estimate
    pub derivative_step: f64,
    /// Absolute NPV below which the rate counts as a root
    pub npv_tolerance: f64,
    /// Hard iteration cap
    pub max_iterations: u32,
}

impl Default for IrrParams {
    fn default() -> Self {
        Self {
            initial_guess: 0.10,
            derivative_step: 0.001,
            npv_tolerance: 0.01,
            max_iterations: 20,
        }
    }
}

/// Outcome of the IRR search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IrrOutcome {
    /// NPV at this rate is within tolerance of zero
    Converged(f64),
    /// Best estimate after the iteration cap; not a verified root
    NotConverged(f64),
    /// No meaningful equity outlay, so the rate is not computed
    Undefined,
}

impl IrrOutcome {
    /// The rate estimate, if any was computed.
    pub fn rate(&self) -> Option<f64> {
        match self {
            IrrOutcome::Converged(r) | IrrOutcome::NotConverged(r) => Some(*r),
            IrrOutcome::Undefined => None,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, IrrOutcome::Converged(_))
    }
}

/// Skip the Newton step when the NPV surface is this flat.
const MIN_DERIVATIVE: f64 = 1e-9;

/// Rate bracket; keeps degenerate flows from driving the discount base
/// negative and producing NaN.
const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 10.0;

/// Find the rate at which the discounted cash flows repay the equity
/// outlay. `cashflows` are the operating-year free cash flows in order.
pub fn solve_irr(equity_invested: f64, cashflows: &[f64], params: &IrrParams) -> IrrOutcome {
    if equity_invested <= 0.0 {
        return IrrOutcome::Undefined;
    }

    let mut rate = params.initial_guess;
    for _ in 0..params.max_iterations {
        let value = npv(equity_invested, cashflows, rate);
        if value.abs() < params.npv_tolerance {
            return IrrOutcome::Converged(rate);
        }

        let shifted = npv(equity_invested, cashflows, rate + params.derivative_step);
        let derivative = (shifted - value) / params.derivative_step;
        if derivative.abs() > MIN_DERIVATIVE {
            rate = (rate - value / derivative).clamp(MIN_RATE, MAX_RATE);
        }
    }

    log::warn!(
        "IRR did not converge after {} iterations, last estimate {:.6}",
        params.max_iterations,
        rate
    );
    IrrOutcome::NotConverged(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_payoff_irr() {
        // $1000 out, $1100 back after one year: exactly 10%
        let outcome = solve_irr(1_000.0, &[1_100.0, 0.0, 0.0, 0.0, 0.0], &IrrParams::default());
        match outcome {
            IrrOutcome::Converged(rate) => assert_relative_eq!(rate, 0.10, epsilon = 1e-4),
            other => panic!("expected convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_converged_root_is_within_tolerance() {
        let equity = 225_000.0;
        let flows = [115_000.0, 125_000.0, 140_000.0, 155_000.0, 170_000.0];
        let params = IrrParams::default();
        let outcome = solve_irr(equity, &flows, &params);
        let rate = match outcome {
            IrrOutcome::Converged(rate) => rate,
            other => panic!("expected convergence, got {:?}", other),
        };
        assert!(npv(equity, &flows, rate).abs() < params.npv_tolerance);
    }

    #[test]
    fn test_non_positive_equity_is_undefined() {
        let flows = [100.0; 5];
        assert_eq!(solve_irr(0.0, &flows, &IrrParams::default()), IrrOutcome::Undefined);
        assert_eq!(
            solve_irr(-50_000.0, &flows, &IrrParams::default()),
            IrrOutcome::Undefined
        );
    }

    #[test]
    fn test_rootless_flows_report_non_convergence() {
        // Nothing but outflows: no rate makes NPV zero
        let outcome = solve_irr(600_000.0, &[-300_000.0; 5], &IrrParams::default());
        match outcome {
            IrrOutcome::NotConverged(rate) => assert!(rate.is_finite()),
            other => panic!("expected non-convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_iteration_cap_respected() {
        // A one-iteration budget cannot reach the root from the 10% seed
        let params = IrrParams {
            max_iterations: 1,
            ..IrrParams::default()
        };
        let outcome = solve_irr(1_000.0, &[2_000.0, 0.0, 0.0, 0.0, 0.0], &params);
        assert!(!outcome.is_converged());
        assert!(outcome.rate().is_some());
    }
}

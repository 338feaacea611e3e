//! Steady-state break-even analysis
//!
//! Works on year-1, non-inflated monthly figures. Deliveries and transfers
//! are blended into a single unit by volume-weighting their prices and
//! courier costs at the base monthly volumes.

use serde::{Deserialize, Serialize};

use crate::assumptions::AssumptionSet;

/// Break-even point for the steady-state month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenAnalysis {
    /// Rent, maintenance, electricity, staff, and overhead per month
    pub fixed_monthly_cost: f64,
    /// Volume-weighted revenue per blended unit
    pub revenue_per_unit: f64,
    /// Volume-weighted courier cost per blended unit
    pub variable_cost_per_unit: f64,
    /// Revenue per unit less variable cost per unit
    pub contribution_margin: f64,
    /// Monthly unit volume covering fixed costs; `None` when the
    /// contribution margin is not positive
    pub break_even_units: Option<f64>,
    /// Monthly revenue at the break-even volume
    pub break_even_revenue: Option<f64>,
}

impl BreakEvenAnalysis {
    pub fn from_assumptions(inputs: &AssumptionSet) -> Self {
        let fixed_monthly_cost = inputs.fixed_monthly_cost();

        let total_units = inputs.deliveries_per_month + inputs.p2p_transfers_per_month;
        let (revenue_per_unit, variable_cost_per_unit) = if total_units > 0.0 {
            let revenue = inputs.price_per_delivery * inputs.deliveries_per_month
                + inputs.price_per_transfer * inputs.p2p_transfers_per_month;
            let variable = inputs.courier_cost_per_delivery * inputs.deliveries_per_month
                + inputs.courier_cost_per_transfer * inputs.p2p_transfers_per_month;
            (revenue / total_units, variable / total_units)
        } else {
            (0.0, 0.0)
        };

        let contribution_margin = revenue_per_unit - variable_cost_per_unit;
        let break_even_units = if contribution_margin > 0.0 {
            Some(fixed_monthly_cost / contribution_margin)
        } else {
            None
        };
        let break_even_revenue = break_even_units.map(|units| units * revenue_per_unit);

        Self {
            fixed_monthly_cost,
            revenue_per_unit,
            variable_cost_per_unit,
            contribution_margin,
            break_even_units,
            break_even_revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_baseline_break_even() {
        let analysis = BreakEvenAnalysis::from_assumptions(&AssumptionSet::default());
        assert_relative_eq!(analysis.fixed_monthly_cost, 37_900.0, epsilon = 1e-9);

        // 2300 blended units: (3.5*2000 + 8*300) / 2300 and
        // (1.5*2000 + 4.5*300) / 2300
        assert_relative_eq!(analysis.revenue_per_unit, 9_400.0 / 2_300.0, epsilon = 1e-9);
        assert_relative_eq!(
            analysis.variable_cost_per_unit,
            4_350.0 / 2_300.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            analysis.contribution_margin,
            5_050.0 / 2_300.0,
            epsilon = 1e-9
        );

        let units = analysis.break_even_units.unwrap();
        assert_relative_eq!(units, 37_900.0 / (5_050.0 / 2_300.0), epsilon = 1e-6);
        assert_relative_eq!(
            analysis.break_even_revenue.unwrap(),
            units * analysis.revenue_per_unit,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_non_positive_margin_has_no_break_even() {
        let mut inputs = AssumptionSet::default();
        inputs.courier_cost_per_delivery = 10.0;
        inputs.courier_cost_per_transfer = 10.0;
        let analysis = BreakEvenAnalysis::from_assumptions(&inputs);
        assert!(analysis.contribution_margin < 0.0);
        assert!(analysis.break_even_units.is_none());
        assert!(analysis.break_even_revenue.is_none());
    }

    #[test]
    fn test_zero_volume_degenerates_to_zero() {
        let mut inputs = AssumptionSet::default();
        inputs.deliveries_per_month = 0.0;
        inputs.p2p_transfers_per_month = 0.0;
        let analysis = BreakEvenAnalysis::from_assumptions(&inputs);
        assert_eq!(analysis.revenue_per_unit, 0.0);
        assert_eq!(analysis.variable_cost_per_unit, 0.0);
        assert_eq!(analysis.contribution_margin, 0.0);
        assert!(analysis.break_even_units.is_none());
    }
}

//! Single entry point for a full model run
//!
//! Every presentation surface calls [`ModelRunner::run`]; nothing
//! re-derives a financial quantity downstream. The runner holds one
//! immutable assumption snapshot per run and owns no ambient state.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::AssumptionSet;
use crate::breakeven::BreakEvenAnalysis;
use crate::financing::Financing;
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::valuation::{self, IrrParams, ValuationResult};

/// Compartment utilization at the base monthly volumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationSummary {
    /// Subscribers against student locker compartments, percent
    pub subscriber_utilization_pct: f64,
    /// Monthly deliveries against commercial locker compartments, percent
    pub delivery_utilization_pct: f64,
    /// Monthly transfers against drop box compartments, percent
    pub transfer_utilization_pct: f64,
}

impl UtilizationSummary {
    fn from_assumptions(inputs: &AssumptionSet) -> Self {
        let pct = |volume: f64, units: u32, compartments: u32| {
            let capacity = units as f64 * compartments as f64;
            if capacity > 0.0 {
                volume / capacity * 100.0
            } else {
                0.0
            }
        };
        Self {
            subscriber_utilization_pct: pct(
                inputs.student_subscribers,
                inputs.num_student_lockers,
                inputs.compartments_per_student_locker,
            ),
            delivery_utilization_pct: pct(
                inputs.deliveries_per_month,
                inputs.num_commercial_lockers,
                inputs.compartments_per_commercial_locker,
            ),
            transfer_utilization_pct: pct(
                inputs.p2p_transfers_per_month,
                inputs.num_drop_boxes,
                inputs.compartments_per_drop_box,
            ),
        }
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelOutput {
    pub financing: Financing,
    pub projection: ProjectionResult,
    pub valuation: ValuationResult,
    pub break_even: BreakEvenAnalysis,
    pub utilization: UtilizationSummary,
}

/// Runs the full model for one assumption snapshot.
#[derive(Debug, Clone)]
pub struct ModelRunner {
    assumptions: AssumptionSet,
    irr_params: IrrParams,
}

impl ModelRunner {
    pub fn new(assumptions: AssumptionSet) -> Self {
        Self {
            assumptions,
            irr_params: IrrParams::default(),
        }
    }

    /// Override the IRR solver knobs for this runner.
    pub fn with_irr_params(mut self, params: IrrParams) -> Self {
        self.irr_params = params;
        self
    }

    pub fn assumptions(&self) -> &AssumptionSet {
        &self.assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut AssumptionSet {
        &mut self.assumptions
    }

    /// One full recomputation: financing, both projection passes,
    /// valuation, break-even, and utilization.
    pub fn run(&self) -> ModelOutput {
        log::debug!("running model for '{}'", self.assumptions.company_name);

        let engine = ProjectionEngine::new(self.assumptions.clone());
        let financing = engine.financing().clone();
        let projection = engine.project();
        let valuation = valuation::evaluate_with_params(
            &projection.annual,
            &financing,
            self.assumptions.discount_rate,
            &self.irr_params,
        );

        ModelOutput {
            break_even: BreakEvenAnalysis::from_assumptions(&self.assumptions),
            utilization: UtilizationSummary::from_assumptions(&self.assumptions),
            financing,
            projection,
            valuation,
        }
    }

    /// Evaluate many independent assumption sets in parallel. Each run is
    /// still a pure single-threaded function of its own snapshot.
    pub fn run_batch(sets: &[AssumptionSet]) -> Vec<ModelOutput> {
        sets.par_iter()
            .map(|inputs| ModelRunner::new(inputs.clone()).run())
            .collect()
    }
}

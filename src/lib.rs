//! Locker Model - Deterministic financial projection engine for parcel
//! locker and drop-box rental networks
//!
//! This library provides:
//! - Monthly (year 1) and annual (years 0-5) operating projections
//! - Equity/debt financing split with loan amortization
//! - Investment valuation (NPV, IRR, payback period)
//! - Steady-state break-even analysis
//! - JSON scenario persistence with default merging

pub mod assumptions;
pub mod breakeven;
pub mod financing;
pub mod projection;
pub mod scenario;
pub mod valuation;

// Re-export commonly used types
pub use assumptions::{AssumptionSet, FinancingType};
pub use breakeven::BreakEvenAnalysis;
pub use financing::{Financing, LoanYear};
pub use projection::{AnnualPeriod, MonthlyPeriod, ProjectionEngine, ProjectionResult};
pub use scenario::{ModelOutput, ModelRunner};
pub use valuation::{IrrOutcome, IrrParams, PaybackPeriod, ValuationResult};

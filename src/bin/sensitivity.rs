//! Delivery growth sensitivity sweep
//!
//! Runs the model across a range of monthly delivery growth rates and
//! reports how the valuation moves.
//!
//! Usage: cargo run --bin sensitivity -- --from 0 --to 10 --steps 11

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use locker_model::assumptions::load_scenario;
use locker_model::valuation::{IrrOutcome, PaybackPeriod};
use locker_model::{AssumptionSet, ModelRunner};

#[derive(Parser)]
#[command(about = "Sweep the delivery growth rate and report the valuation per step")]
struct Args {
    /// Base scenario JSON file; baseline assumptions when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Lowest growth rate, percent per month
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Highest growth rate, percent per month
    #[arg(long, default_value_t = 10.0)]
    to: f64,

    /// Number of evenly spaced steps
    #[arg(long, default_value_t = 11)]
    steps: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base = match &args.scenario {
        Some(path) => load_scenario(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => AssumptionSet::default(),
    };

    let steps = args.steps.max(1);
    let rates: Vec<f64> = (0..steps)
        .map(|i| {
            if steps == 1 {
                args.from
            } else {
                args.from + (args.to - args.from) * i as f64 / (steps - 1) as f64
            }
        })
        .collect();

    let sets: Vec<AssumptionSet> = rates
        .iter()
        .map(|&rate| {
            let mut inputs = base.clone();
            inputs.delivery_growth_rate = rate;
            inputs
        })
        .collect();

    let outputs = ModelRunner::run_batch(&sets);

    println!("Delivery growth sensitivity ({} steps):\n", steps);
    println!(
        "{:>10} {:>14} {:>12} {:>10} {:>14}",
        "Growth%", "NPV", "IRR", "Payback", "Y5 Revenue"
    );
    println!("{}", "-".repeat(64));
    for (rate, output) in rates.iter().zip(&outputs) {
        let irr = match output.valuation.irr {
            IrrOutcome::Converged(r) => format!("{:.1}%", r * 100.0),
            IrrOutcome::NotConverged(r) => format!("{:.1}%*", r * 100.0),
            IrrOutcome::Undefined => "n/a".to_string(),
        };
        let payback = match output.valuation.payback {
            PaybackPeriod::Years(years) => format!("{:.1}y", years),
            PaybackPeriod::NotReached => ">5y".to_string(),
            PaybackPeriod::Undefined => "n/a".to_string(),
        };
        let year5 = output
            .projection
            .annual
            .last()
            .map(|r| r.total_revenue)
            .unwrap_or(0.0);
        println!(
            "{:>10.1} {:>14.0} {:>12} {:>10} {:>14.0}",
            rate, output.valuation.npv, irr, payback, year5
        );
    }

    println!("\n* did not converge within the iteration cap");
    Ok(())
}

//! Compare saved scenarios side by side
//!
//! Usage: cargo run --bin compare_scenarios -- a.json b.json [c.json ...]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use locker_model::assumptions::load_scenario;
use locker_model::valuation::{IrrOutcome, PaybackPeriod};
use locker_model::ModelRunner;

#[derive(Parser)]
#[command(about = "Evaluate several saved scenarios and compare their valuations")]
struct Args {
    /// Scenario JSON files to compare
    #[arg(required = true)]
    scenarios: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut inputs = Vec::with_capacity(args.scenarios.len());
    for path in &args.scenarios {
        let loaded = load_scenario(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?;
        inputs.push(loaded);
    }

    let outputs = ModelRunner::run_batch(&inputs);

    println!(
        "{:<24} {:>14} {:>14} {:>12} {:>10} {:>14}",
        "Scenario", "Investment", "NPV", "IRR", "Payback", "5-Yr FCF"
    );
    println!("{}", "-".repeat(92));

    for (set, output) in inputs.iter().zip(&outputs) {
        let name = if set.company_name.is_empty() {
            "(unnamed)"
        } else {
            set.company_name.as_str()
        };
        let irr = match output.valuation.irr {
            IrrOutcome::Converged(rate) => format!("{:.1}%", rate * 100.0),
            IrrOutcome::NotConverged(rate) => format!("{:.1}%*", rate * 100.0),
            IrrOutcome::Undefined => "n/a".to_string(),
        };
        let payback = match output.valuation.payback {
            PaybackPeriod::Years(years) => format!("{:.1}y", years),
            PaybackPeriod::NotReached => ">5y".to_string(),
            PaybackPeriod::Undefined => "n/a".to_string(),
        };
        println!(
            "{:<24} {:>14.0} {:>14.0} {:>12} {:>10} {:>14.0}",
            name,
            output.financing.initial_investment,
            output.valuation.npv,
            irr,
            payback,
            output.valuation.five_year_fcf,
        );
    }

    println!("\n* did not converge within the iteration cap");
    Ok(())
}

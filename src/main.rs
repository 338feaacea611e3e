//! Locker Model CLI
//!
//! Runs the full projection for a saved scenario (or the baseline
//! assumptions), prints the monthly and annual tables with the valuation
//! and break-even summaries, and optionally dumps both period sequences
//! to CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use locker_model::assumptions::load_scenario;
use locker_model::valuation::{IrrOutcome, PaybackPeriod};
use locker_model::{AssumptionSet, ModelOutput, ModelRunner};

#[derive(Parser)]
#[command(name = "locker_model", about = "Parcel locker financial projections")]
struct Args {
    /// Scenario JSON file; baseline assumptions when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Directory for monthly_projection.csv and annual_projection.csv
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let inputs = match &args.scenario {
        Some(path) => load_scenario(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => AssumptionSet::default(),
    };

    println!("Locker Model v0.1.0");
    println!("===================\n");
    println!("Scenario: {}", inputs.company_name);

    let output = ModelRunner::new(inputs).run();
    print_financing(&output);
    print_monthly(&output);
    print_annual(&output);
    print_valuation(&output);
    print_break_even(&output);

    if let Some(dir) = &args.csv_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        write_csv(dir, &output)?;
    }

    Ok(())
}

fn print_financing(output: &ModelOutput) {
    let f = &output.financing;
    println!("\nFinancing:");
    println!("  Initial Investment: ${:>12.2}", f.initial_investment);
    println!("  Equity Invested:    ${:>12.2}", f.equity_invested);
    println!("  Loan Drawn:         ${:>12.2}", f.loan_drawn);
    println!("  Monthly Payment:    ${:>12.2}", f.monthly_payment);
    if !f.schedule.is_empty() {
        println!("\n  {:>4} {:>14} {:>12} {:>12} {:>14}", "Year", "Opening", "Interest", "Principal", "Closing");
        for row in &f.schedule {
            println!(
                "  {:>4} {:>14.2} {:>12.2} {:>12.2} {:>14.2}",
                row.year, row.opening_balance, row.interest, row.principal, row.closing_balance
            );
        }
    }
}

fn print_monthly(output: &ModelOutput) {
    println!("\nYear 1 by Month:");
    println!(
        "{:>5} {:>8} {:>8} {:>7} {:>12} {:>12} {:>12} {:>12} {:>8}",
        "Month", "Subs", "Deliv", "P2P", "Revenue", "EBITDA", "NetIncome", "Tax", "NetMgn%"
    );
    println!("{}", "-".repeat(92));
    for row in &output.projection.monthly {
        println!(
            "{:>5} {:>8.0} {:>8.0} {:>7.0} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>8.1}",
            row.month,
            row.subscribers,
            row.deliveries,
            row.transfers,
            row.total_revenue,
            row.ebitda,
            row.net_income,
            row.tax,
            row.net_margin_pct,
        );
    }
}

fn print_annual(output: &ModelOutput) {
    println!("\nFive-Year Projection:");
    println!(
        "{:>4} {:>13} {:>13} {:>13} {:>13} {:>13} {:>13} {:>12}",
        "Year", "Revenue", "NetIncome", "FCF", "CumFCF", "Cash", "LoanBal", "Equity"
    );
    println!("{}", "-".repeat(100));
    for row in &output.projection.annual {
        println!(
            "{:>4} {:>13.2} {:>13.2} {:>13.2} {:>13.2} {:>13.2} {:>13.2} {:>12.2}",
            row.year,
            row.total_revenue,
            row.net_income,
            row.free_cash_flow,
            row.cumulative_free_cash_flow,
            row.cash_balance,
            row.loan_balance,
            row.equity_balance,
        );
    }
}

fn print_valuation(output: &ModelOutput) {
    let v = &output.valuation;
    println!("\nValuation:");
    println!("  NPV:                ${:>12.2}", v.npv);
    match v.irr {
        IrrOutcome::Converged(rate) => println!("  IRR:                {:>12.2}%", rate * 100.0),
        IrrOutcome::NotConverged(rate) => {
            println!("  IRR:                {:>12.2}% (did not converge)", rate * 100.0)
        }
        IrrOutcome::Undefined => println!("  IRR:                {:>13}", "undefined"),
    }
    match v.payback {
        PaybackPeriod::Years(years) => println!("  Payback:            {:>10.2} yrs", years),
        PaybackPeriod::NotReached => println!("  Payback:            {:>13}", "not reached"),
        PaybackPeriod::Undefined => println!("  Payback:            {:>13}", "undefined"),
    }
    println!("  5-Year FCF:         ${:>12.2}", v.five_year_fcf);
    println!("  5-Year Net Income:  ${:>12.2}", v.five_year_net_income);
    println!("  5-Year Revenue:     ${:>12.2}", v.five_year_revenue);
    println!("  Avg Annual NI:      ${:>12.2}", v.average_annual_net_income);
    println!("  Simple ROI:         {:>12.1}%", v.simple_roi_pct);
}

fn print_break_even(output: &ModelOutput) {
    let b = &output.break_even;
    println!("\nBreak-Even (steady-state month):");
    println!("  Fixed Cost:         ${:>12.2}", b.fixed_monthly_cost);
    println!("  Revenue/Unit:       ${:>12.2}", b.revenue_per_unit);
    println!("  Variable/Unit:      ${:>12.2}", b.variable_cost_per_unit);
    println!("  Contribution:       ${:>12.2}", b.contribution_margin);
    match (b.break_even_units, b.break_even_revenue) {
        (Some(units), Some(revenue)) => {
            println!("  Break-Even Units:   {:>13.0}", units);
            println!("  Break-Even Revenue: ${:>12.2}", revenue);
        }
        _ => println!("  Break-Even:         {:>13}", "undefined"),
    }

    let u = &output.utilization;
    println!("\nUtilization at base volumes:");
    println!("  Student Lockers:    {:>12.1}%", u.subscriber_utilization_pct);
    println!("  Commercial Lockers: {:>12.1}%", u.delivery_utilization_pct);
    println!("  Drop Boxes:         {:>12.1}%", u.transfer_utilization_pct);
}

fn write_csv(dir: &std::path::Path, output: &ModelOutput) -> Result<()> {
    let monthly_path = dir.join("monthly_projection.csv");
    let mut writer = csv::Writer::from_path(&monthly_path)
        .with_context(|| format!("failed to create {}", monthly_path.display()))?;
    for row in &output.projection.monthly {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let annual_path = dir.join("annual_projection.csv");
    let mut writer = csv::Writer::from_path(&annual_path)
        .with_context(|| format!("failed to create {}", annual_path.display()))?;
    for row in &output.projection.annual {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("\nCSV written to {}", dir.display());
    Ok(())
}

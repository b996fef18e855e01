//! Net Worth Projector CLI
//!
//! Command-line interface for projecting plan snapshots, previewing loan
//! installments, and validating plans before projection.

use anyhow::Context;
use clap::{Parser, Subcommand};
use networth_projector::plan::{check_plan, load_plan};
use networth_projector::projection::{annual_installment, project};
use networth_projector::util::format_currency;
use networth_projector::export;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "networth_projector", version, about = "Project household net worth from a plan snapshot")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project a plan and print the year-by-year table
    Project {
        /// Path to the plan snapshot (JSON)
        plan: PathBuf,

        /// Write the full projection to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of years to print to the console
        #[arg(long, default_value_t = 20)]
        years: usize,
    },

    /// Preview the annual installment for a financed major expense
    Installment {
        /// Loan principal
        #[arg(long)]
        principal: f64,

        /// Annual interest rate in percent
        #[arg(long)]
        interest: f64,

        /// First installment year
        #[arg(long)]
        start_year: i32,

        /// Last installment year (inclusive)
        #[arg(long)]
        end_year: i32,
    },

    /// Run editor-side checks against a plan snapshot
    Validate {
        /// Path to the plan snapshot (JSON)
        plan: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Project { plan, output, years } => run_project(&plan, output.as_deref(), years),
        Command::Installment { principal, interest, start_year, end_year } => {
            run_installment(principal, interest, start_year, end_year)
        }
        Command::Validate { plan } => run_validate(&plan),
    }
}

fn run_project(plan_path: &std::path::Path, output: Option<&std::path::Path>, max_years: usize) -> anyhow::Result<()> {
    let plan = load_plan(plan_path)
        .with_context(|| format!("failed to load plan from {}", plan_path.display()))?;
    let result = project(&plan);

    println!("Projection ({} years):", result.years.len());
    println!("{:>6} {:>16} {:>16} {:>16} {:>16}", "Year", "Income", "Expense", "Savings", "Net Worth");
    println!("{}", "-".repeat(74));

    for (i, year) in result.years.iter().take(max_years).enumerate() {
        println!(
            "{:>6} {:>16} {:>16} {:>16} {:>16}",
            year,
            format_currency(result.income_total_at(i)),
            format_currency(result.expense_total_at(i)),
            format_currency(result.savings[i]),
            format_currency(result.net_worth[i]),
        );
    }
    if result.years.len() > max_years {
        println!("... ({} more years)", result.years.len() - max_years);
    }

    for (id, charge) in &result.one_time_expenses {
        println!("One-time expense {} fires in {}: {}", id, charge.year, format_currency(charge.amount));
    }
    for warning in &result.warnings {
        println!("Warning: {:?}", warning);
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Horizon: {} - {}", summary.start_year, summary.end_year);
    println!("  Final Net Worth: {}", format_currency(summary.final_net_worth));
    println!("  Peak Net Worth: {}", format_currency(summary.peak_net_worth));
    println!("  Lowest Net Worth: {}", format_currency(summary.lowest_net_worth));
    println!("  Total Saved: {}", format_currency(summary.total_saved));

    if let Some(path) = output {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        export::write_csv(&result, file).context("failed to write projection CSV")?;
        println!("\nFull results written to: {}", path.display());
    }

    Ok(())
}

fn run_installment(principal: f64, interest: f64, start_year: i32, end_year: i32) -> anyhow::Result<()> {
    anyhow::ensure!(end_year >= start_year, "end year must not precede start year");
    anyhow::ensure!(principal >= 0.0, "principal must not be negative");
    anyhow::ensure!(interest >= 0.0, "interest rate must not be negative");

    let payment = annual_installment(principal, interest, start_year, end_year);
    let years = end_year - start_year + 1;
    let total_paid = payment * years as f64;

    println!("Annual installment: {}", format_currency(payment));
    println!("Paid over {} years: {}", years, format_currency(total_paid));
    println!("Total interest: {}", format_currency(total_paid - principal));
    Ok(())
}

fn run_validate(plan_path: &std::path::Path) -> anyhow::Result<()> {
    let plan = load_plan(plan_path)
        .with_context(|| format!("failed to load plan from {}", plan_path.display()))?;

    let issues = check_plan(&plan);
    if issues.is_empty() {
        println!("Plan is clean: {} years, {} income streams, {} expense streams, {} assets",
            plan.horizon_len(),
            plan.income_streams.len(),
            plan.expense_streams.len(),
            plan.assets.len());
        return Ok(());
    }

    println!("{} issue(s) found:", issues.len());
    for issue in &issues {
        println!("  - {}", issue);
    }
    std::process::exit(1);
}

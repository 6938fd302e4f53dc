//! Livestock Returns CLI
//!
//! Command-line interface for the fattening-cycle return engine

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use livestock_returns::{
    config::parse_variations,
    cycle::load_scenarios,
    returns::{convert_annual_to_monthly_rate, solve_livestock_irr},
    sensitivity::evaluate_matrix_with,
    convert_monthly_to_annual_rate, EngineConfig, FatteningInputs, FatteningOutcome, MatrixMetric,
    ScenarioComparator, SensitivityMatrix,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "livestock_returns", version, about = "Return engine for cattle fattening cycles")]
struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Monthly IRR from raw cash-flow figures
    Irr {
        #[arg(long)]
        purchase_weight: f64,
        #[arg(long)]
        purchase_price: f64,
        #[arg(long)]
        monthly_cost: f64,
        #[arg(long)]
        sales_value: f64,
        #[arg(long)]
        months: f64,
    },
    /// Convert a monthly rate (%) to an effective annual rate (%)
    Annualize {
        #[arg(allow_negative_numbers = true)]
        rate_pct: f64,
        /// Treat the input as annual and convert to monthly instead
        #[arg(long)]
        inverse: bool,
    },
    /// Full profit model for one fattening cycle
    Scenario(FatteningArgs),
    /// Price sensitivity grid for one fattening cycle
    Matrix {
        #[command(flatten)]
        inputs: FatteningArgs,
        /// profit, monthly_irr, annual_irr or margin_pct
        #[arg(long, default_value = "annual_irr")]
        metric: MatrixMetric,
        /// Comma separated relative moves, e.g. "-0.1,-0.05,0,0.05,0.1"
        #[arg(long, allow_hyphen_values = true)]
        variations: Option<String>,
    },
    /// Rank the scenarios of a CSV file by annual IRR
    Compare {
        #[arg(long, default_value = livestock_returns::cycle::loader::DEFAULT_SCENARIOS_PATH)]
        csv: String,
    },
}

#[derive(Args)]
struct FatteningArgs {
    /// Live weight at purchase, kg
    #[arg(long, default_value_t = 200.0)]
    purchase_weight: f64,
    /// Purchase price per kg
    #[arg(long, default_value_t = 14.50)]
    purchase_price: f64,
    /// Live weight at slaughter, kg
    #[arg(long, default_value_t = 360.0)]
    slaughter_weight: f64,
    /// Carcass yield, %
    #[arg(long, default_value_t = 54.5)]
    carcass_yield: f64,
    /// Sale price per arroba
    #[arg(long, default_value_t = 300.0)]
    sale_price: f64,
    /// Average daily gain, kg/day
    #[arg(long, default_value_t = 0.65)]
    daily_gain: f64,
    /// Operating cost per head per month
    #[arg(long, default_value_t = 135.0)]
    monthly_cost: f64,
}

impl FatteningArgs {
    fn to_inputs(&self) -> Result<FatteningInputs> {
        let inputs = FatteningInputs {
            purchase_weight_kg: self.purchase_weight,
            purchase_price_per_kg: self.purchase_price,
            slaughter_weight_kg: self.slaughter_weight,
            carcass_yield_pct: self.carcass_yield,
            sale_price_per_arroba: self.sale_price,
            daily_gain_kg: self.daily_gain,
            monthly_cost: self.monthly_cost,
        };
        inputs.validate().context("invalid fattening inputs")?;
        Ok(inputs)
    }
}

#[derive(Serialize)]
struct ScenarioReport {
    inputs: FatteningInputs,
    outcome: FatteningOutcome,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = EngineConfig::from_env().context("reading engine configuration")?;

    match cli.command {
        Command::Irr {
            purchase_weight,
            purchase_price,
            monthly_cost,
            sales_value,
            months,
        } => {
            let solution = solve_livestock_irr(purchase_weight, purchase_price, monthly_cost, sales_value, months);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&solution)?);
            } else {
                println!("Monthly IRR: {:.4}%", solution.rate_pct);
                println!("Annual IRR:  {:.4}%", convert_monthly_to_annual_rate(solution.rate_pct));
                println!("Iterations:  {} ({:?})", solution.iterations, solution.termination);
            }
        }
        Command::Annualize { rate_pct, inverse } => {
            let converted = if inverse {
                convert_annual_to_monthly_rate(rate_pct)
            } else {
                convert_monthly_to_annual_rate(rate_pct)
            };
            if cli.json {
                println!("{}", serde_json::json!({ "input_pct": rate_pct, "converted_pct": converted }));
            } else if inverse {
                println!("{:.4}% per year = {:.4}% per month", rate_pct, converted);
            } else {
                println!("{:.4}% per month = {:.4}% per year", rate_pct, converted);
            }
        }
        Command::Scenario(args) => {
            let inputs = args.to_inputs()?;
            let outcome = inputs.evaluate_with(&config.solver);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ScenarioReport { inputs, outcome })?);
            } else {
                print_outcome(&outcome);
            }
        }
        Command::Matrix {
            inputs,
            metric,
            variations,
        } => {
            let inputs = inputs.to_inputs()?;
            let variations = match variations {
                Some(raw) => match parse_variations(&raw) {
                    Some(v) => v,
                    None => bail!("invalid --variations {:?}", raw),
                },
                None => config.variations.clone(),
            };
            let matrix = evaluate_matrix_with(&inputs, &variations, &variations, metric, &config.solver);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&matrix)?);
            } else {
                print_matrix(&matrix);
            }
        }
        Command::Compare { csv } => {
            let scenarios = load_scenarios(&csv).with_context(|| format!("loading scenarios from {}", csv))?;
            let comparison = ScenarioComparator::with_config(config).compare(&scenarios);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                println!("{:>4} {:<24} {:>10} {:>10} {:>12} {:>12}",
                    "Rank", "Scenario", "Months", "Profit", "Monthly IRR", "Annual IRR");
                println!("{}", "-".repeat(78));
                for (rank, result) in comparison.ranked.iter().enumerate() {
                    println!("{:>4} {:<24} {:>10.2} {:>10.2} {:>11.4}% {:>11.4}%",
                        rank + 1,
                        result.name,
                        result.outcome.permanence_months,
                        result.outcome.profit,
                        result.outcome.monthly_irr_pct,
                        result.outcome.annual_irr_pct,
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &FatteningOutcome) {
    println!("Fattening cycle");
    println!("===============\n");
    println!("  Weight gain:        {:.2} kg", outcome.weight_gain_kg);
    println!("  Time on feed:       {:.1} days ({:.2} months)", outcome.permanence_days, outcome.permanence_months);
    println!("  Carcass arrobas:    {:.2}", outcome.carcass_arrobas);
    println!();
    println!("  Purchase cost:      {:.2}", outcome.purchase_cost);
    println!("  Operating cost:     {:.2}", outcome.operating_cost);
    println!("  Total cost:         {:.2}", outcome.total_cost);
    println!("  Sale revenue:       {:.2}", outcome.sale_revenue);
    println!("  Profit:             {:.2}", outcome.profit);
    println!("  Margin:             {:.2}%", outcome.margin_pct);
    println!("  Return on cost:     {:.2}%", outcome.return_on_cost_pct);
    println!("  Break-even price:   {:.2} per arroba", outcome.break_even_price_per_arroba);
    println!();
    println!("  Monthly IRR:        {:.4}%", outcome.monthly_irr_pct);
    println!("  Annual IRR:         {:.4}%", outcome.annual_irr_pct);
    if !outcome.irr_converged {
        println!("  (IRR did not converge; last iterate shown)");
    }
}

fn print_matrix(matrix: &SensitivityMatrix) {
    println!("Sensitivity: {} (rows: purchase price, columns: sale price)\n", matrix.metric);

    print!("{:>10}", "");
    for col in &matrix.col_variations {
        print!(" {:>+11.1}%", col * 100.0);
    }
    println!();
    println!("{}", "-".repeat(10 + 13 * matrix.cols()));

    for (row, values) in matrix.row_variations.iter().zip(&matrix.cells) {
        print!("{:>+9.1}%", row * 100.0);
        for value in values {
            print!(" {:>12.4}", value);
        }
        println!();
    }

    println!("\nRange: {:.4} .. {:.4}", matrix.min, matrix.max);
}

//! Evaluate every scenario in a CSV file
//!
//! Supports JSON output for API integration via --json flag
//! Accepts config via environment variables:
//!   SCENARIOS_CSV (default data/scenarios.csv)
//!   HURDLE_ANNUAL_RATE (annual %, scenarios below it are flagged)
//!   IRR_INITIAL_GUESS, IRR_MAX_ITERATIONS, IRR_TOLERANCE, IRR_DERIVATIVE_FLOOR

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use livestock_returns::{
    cycle::{load_scenarios, loader::DEFAULT_SCENARIOS_PATH},
    returns::convert_annual_to_monthly_rate,
    EngineConfig, ScenarioComparator, ScenarioResult,
};
use serde::Serialize;
use std::env;
use std::time::Instant;

#[derive(Serialize)]
struct BatchReport {
    generated_at: DateTime<Utc>,
    source: String,
    scenario_count: usize,
    hurdle: Option<Hurdle>,
    summary: BatchSummary,
    results: Vec<ScenarioResult>,
    execution_time_ms: u64,
}

#[derive(Serialize)]
struct Hurdle {
    annual_pct: f64,
    monthly_pct: f64,
    below_hurdle: Vec<String>,
}

#[derive(Serialize)]
struct BatchSummary {
    best_scenario: Option<String>,
    best_annual_irr_pct: Option<f64>,
    profitable: usize,
    not_converged: usize,
    total_profit: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let start = Instant::now();

    let source = env::var("SCENARIOS_CSV").unwrap_or_else(|_| DEFAULT_SCENARIOS_PATH.to_string());

    let hurdle_annual: Option<f64> = env::var("HURDLE_ANNUAL_RATE")
        .ok()
        .and_then(|s| s.parse().ok());

    let config = EngineConfig::from_env().context("reading engine configuration")?;

    if !json_output {
        println!("Loading scenarios from {}...", source);
    }
    let scenarios = load_scenarios(&source).with_context(|| format!("loading {}", source))?;

    if !json_output {
        println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());
    }

    let comparison = ScenarioComparator::with_config(config).compare(&scenarios);

    let profitable = comparison.ranked.iter().filter(|r| r.outcome.profit > 0.0).count();
    let not_converged = comparison.ranked.iter().filter(|r| !r.outcome.irr_converged).count();
    let total_profit: f64 = comparison.ranked.iter().map(|r| r.outcome.profit).sum();

    let hurdle = hurdle_annual.map(|annual_pct| Hurdle {
        annual_pct,
        monthly_pct: convert_annual_to_monthly_rate(annual_pct),
        below_hurdle: comparison
            .ranked
            .iter()
            .filter(|r| r.outcome.annual_irr_pct < annual_pct)
            .map(|r| r.name.clone())
            .collect(),
    });

    let summary = BatchSummary {
        best_scenario: comparison.best().map(|r| r.name.clone()),
        best_annual_irr_pct: comparison.best().map(|r| r.outcome.annual_irr_pct),
        profitable,
        not_converged,
        total_profit,
    };

    if json_output {
        let report = BatchReport {
            generated_at: Utc::now(),
            source,
            scenario_count: comparison.ranked.len(),
            hurdle,
            summary,
            results: comparison.ranked,
            execution_time_ms: start.elapsed().as_millis() as u64,
        };
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    println!("\n{:<24} {:>8} {:>12} {:>10} {:>12} {:>12}",
        "Scenario", "Months", "Revenue", "Profit", "Monthly IRR", "Annual IRR");
    println!("{}", "-".repeat(84));
    for result in &comparison.ranked {
        println!("{:<24} {:>8.2} {:>12.2} {:>10.2} {:>11.4}% {:>11.4}%{}",
            result.name,
            result.outcome.permanence_months,
            result.outcome.sale_revenue,
            result.outcome.profit,
            result.outcome.monthly_irr_pct,
            result.outcome.annual_irr_pct,
            if result.outcome.irr_converged { "" } else { "  (not converged)" },
        );
    }

    println!("\n  Profitable:   {} of {}", summary.profitable, comparison.ranked.len());
    println!("  Total profit: {:.2}", summary.total_profit);

    if let (Some(name), Some(rate)) = (&summary.best_scenario, summary.best_annual_irr_pct) {
        println!("\n========================================");
        println!("  BEST SCENARIO: {} ({:.4}% per year)", name, rate);
        println!("========================================");
    }

    if let Some(h) = &hurdle {
        println!("\n  Hurdle {:.2}% per year ({:.4}% per month)", h.annual_pct, h.monthly_pct);
        if h.below_hurdle.is_empty() {
            println!("  All scenarios clear the hurdle");
        } else {
            println!("  Below hurdle: {}", h.below_hurdle.join(", "));
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

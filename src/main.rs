use clap::{Args, Parser, Subcommand};
use network_cost::io::dataset::{
    brazilian_capitals, candidate_facilities, city_names, select_cities, select_facilities,
    FACILITY_SAO_PAULO,
};
use network_cost::io::reporting::{
    export_breakdown, export_samples, export_sweep, format_brl, render_breakdown,
    render_comparison,
};
use network_cost::simulation::config::{CostParameters, SimulationConfig};
use network_cost::simulation::engine::MonteCarloEngine;
use network_cost::simulation::evaluator::evaluate_deterministic;
use network_cost::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "network-cost")]
#[command(about = "Distribution network cost evaluator for Brazilian state capitals")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price one network at average demand
    Evaluate {
        /// Served city (repeatable; default: all capitals)
        #[arg(long = "city")]
        cities: Vec<String>,
        /// Active distribution center (repeatable; default: CD São Paulo)
        #[arg(long = "facility")]
        facilities: Vec<String>,
        /// Write the cost breakdown as CSV
        #[arg(long)]
        export: Option<PathBuf>,
        #[command(flatten)]
        costs: CostArgs,
    },
    /// Compare the configured scenarios under random demand
    Simulate {
        /// Served city (repeatable; default: all capitals)
        #[arg(long = "city")]
        cities: Vec<String>,
        /// Target service level in percent (80.0 - 99.9)
        #[arg(long, default_value_t = 95.0)]
        service_level: f64,
        /// Monte Carlo trials per scenario
        #[arg(long, default_value_t = 200)]
        trials: usize,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Replenishment lead time, in periods
        #[arg(long)]
        lead_time: Option<f64>,
        /// Write the recommended scenario's raw samples as CSV
        #[arg(long)]
        export: Option<PathBuf>,
        /// Write the recommended scenario's cost vs. service level sweep as CSV
        #[arg(long)]
        sweep_export: Option<PathBuf>,
        #[command(flatten)]
        costs: CostArgs,
    },
}

/// Overrides for the default cost rates.
#[derive(Args, Debug)]
struct CostArgs {
    /// Fixed cost per active facility
    #[arg(long)]
    fixed_cost: Option<f64>,
    /// Transport cost per unit per km
    #[arg(long)]
    transport_rate: Option<f64>,
    /// Holding cost per unit
    #[arg(long)]
    holding_rate: Option<f64>,
    /// Cost per replenishment order
    #[arg(long)]
    order_cost: Option<f64>,
}

impl CostArgs {
    fn apply(&self, base: CostParameters) -> CostParameters {
        CostParameters {
            fixed_cost: self.fixed_cost.unwrap_or(base.fixed_cost),
            transport_rate: self.transport_rate.unwrap_or(base.transport_rate),
            holding_rate: self.holding_rate.unwrap_or(base.holding_rate),
            order_cost: self.order_cost.unwrap_or(base.order_cost),
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Evaluate {
            cities,
            facilities,
            export,
            costs,
        } => run_evaluate(cities, facilities, export, &costs),
        Command::Simulate {
            cities,
            service_level,
            trials,
            seed,
            lead_time,
            export,
            sweep_export,
            costs,
        } => {
            let base = SimulationConfig::default();
            let config = SimulationConfig {
                costs: costs.apply(base.costs.clone()),
                lead_time: lead_time.unwrap_or(base.lead_time),
                trials,
                service_level,
                seed,
                ..base
            };
            run_simulate(cities, config, export, sweep_export)
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_evaluate(
    cities: Vec<String>,
    facilities: Vec<String>,
    export: Option<PathBuf>,
    cost_args: &CostArgs,
) -> Result<()> {
    // 1. SELECT THE NETWORK
    let config = SimulationConfig::default();
    let all_cities = brazilian_capitals(config.demand_variability);
    let city_sel = if cities.is_empty() { city_names(&all_cities) } else { cities };
    let facility_sel = if facilities.is_empty() {
        vec![FACILITY_SAO_PAULO.to_string()]
    } else {
        facilities
    };
    let served = select_cities(&all_cities, &city_sel)?;
    let active = select_facilities(&candidate_facilities(), &facility_sel)?;
    let costs = cost_args.apply(config.costs);

    // 2. PRICE IT
    let breakdown = evaluate_deterministic(&served, &active, &costs)?;

    // 3. REPORT
    println!("=== Network Cost Summary ===");
    println!("Cities: {}", city_sel.join(", "));
    println!("Facilities: {}\n", facility_sel.join(", "));
    print!("{}", render_breakdown(&breakdown));

    if let Some(path) = export {
        export_breakdown(&path, &breakdown)?;
    }
    Ok(())
}

fn run_simulate(
    cities: Vec<String>,
    config: SimulationConfig,
    export: Option<PathBuf>,
    sweep_export: Option<PathBuf>,
) -> Result<()> {
    // 1. RESOLVE INPUTS
    config.validate()?;
    let all_cities = brazilian_capitals(config.demand_variability);
    let city_sel = if cities.is_empty() { city_names(&all_cities) } else { cities };
    let served = select_cities(&all_cities, &city_sel)?;

    // 2. RUN THE MONTE CARLO COMPARISON
    let mut engine = MonteCarloEngine::seeded(config, served)?;
    let scenarios = engine.configured_scenarios(&candidate_facilities())?;
    let comparison = engine.compare_scenarios(&scenarios)?;

    println!("=== Monte Carlo Scenario Comparison ===\n");
    print!("{}", render_comparison(&comparison));

    // 3. SENSITIVITY OF THE WINNER TO THE SERVICE LEVEL
    let best = comparison.best();
    // Results come back in scenario order.
    let winner = &scenarios[comparison.best_index()];
    let sweep = engine.sensitivity_sweep(winner)?;

    println!("\nCost vs. service level ({}):", winner.name);
    for point in &sweep {
        println!(
            "  {:>5.1}% (z = {:.3}): {}",
            point.service_level,
            point.z_score,
            format_brl(point.mean_cost)
        );
    }

    // 4. EXPORT RESULTS
    if let Some(path) = export {
        export_samples(&path, best)?;
    }
    if let Some(path) = sweep_export {
        export_sweep(&path, &sweep)?;
    }
    Ok(())
}

//! Headless runner: builds a configuration, drives the engine to completion
//! and prints the outcome.

mod args;
mod telemetry;

use anyhow::Result;
use clap::Parser;
use contagion_world::{RunOutcome, Simulation};
use std::thread;
use std::time::Duration;
use tracing::info;

fn main() -> Result<()> {
    let cli = args::Cli::parse();

    telemetry::init_telemetry(cli.log_format)?;

    let config = cli.simulation_config()?;
    let run = cli.run_config();

    info!(
        seed = config.seed,
        population = config.population.population_size,
        isolation_pct = config.population.isolation_pct,
        infected_pct = config.population.infected_pct,
        mortality = config.disease.mortality,
        recovery = config.disease.recovery,
        "Starting contagion simulation"
    );

    let mut simulation = Simulation::seeded(config)?;

    let delay = Duration::from_millis(run.tick_delay_ms);
    let outcome = simulation.run_with(run.max_ticks, |_, _| {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    });

    print_report(&outcome, cli.json)
}

fn print_report(outcome: &RunOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    println!("{}", outcome.summary);
    println!("Recovered: {}", outcome.census.recovered);
    if !outcome.terminated {
        println!(
            "Stopped after {} ticks with {} still infected",
            outcome.ticks, outcome.census.infected
        );
    }
    Ok(())
}

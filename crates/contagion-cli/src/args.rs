//! Command-line arguments.

use crate::telemetry::LogFormat;
use anyhow::{Context, Result};
use clap::Parser;
use contagion_core::{RunConfig, SamplingMode, SimulationConfig};
use std::path::PathBuf;

/// Headless epidemic simulation runner
#[derive(Parser, Debug)]
#[command(name = "contagion", version)]
pub struct Cli {
    /// Optional path to a JSON simulation config; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Random seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of entities
    #[arg(short = 'n', long)]
    pub population: Option<usize>,

    /// Isolation percentage (0-100)
    #[arg(short, long)]
    pub isolation: Option<f64>,

    /// Initially infected percentage (0-100)
    #[arg(long)]
    pub infected: Option<f64>,

    /// Daily death threshold (0-100)
    #[arg(long)]
    pub mortality: Option<u32>,

    /// Daily recovery threshold, cumulative with mortality (0-100)
    #[arg(long)]
    pub recovery: Option<u32>,

    /// Ticks that make up one day
    #[arg(long)]
    pub ticks_per_day: Option<u32>,

    /// Draw infection independently of isolation
    #[arg(long)]
    pub independent_sampling: bool,

    /// Stop after this many ticks even if the epidemic is still running
    #[arg(long)]
    pub max_ticks: Option<u64>,

    /// Pause between ticks in milliseconds
    #[arg(long, default_value_t = 0)]
    pub tick_delay_ms: u64,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Load the config file, if any, then apply flag overrides
    pub fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(size) = self.population {
            config.population.population_size = size;
        }
        if let Some(pct) = self.isolation {
            config.population.isolation_pct = pct;
        }
        if let Some(pct) = self.infected {
            config.population.infected_pct = pct;
        }
        if self.independent_sampling {
            config.population.sampling = SamplingMode::Independent;
        }
        if let Some(mortality) = self.mortality {
            config.disease.mortality = mortality;
        }
        if let Some(recovery) = self.recovery {
            config.disease.recovery = recovery;
        }
        if let Some(ticks) = self.ticks_per_day {
            config.disease.ticks_per_day = ticks;
        }

        Ok(config)
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            max_ticks: self.max_ticks,
            tick_delay_ms: self.tick_delay_ms,
        }
    }
}

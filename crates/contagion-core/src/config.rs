//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Arena configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Width of the arena
    pub width: f64,
    /// Height of the arena
    pub height: f64,
    /// Side length of each entity's square box
    pub entity_size: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1300.0,
            height: 650.0,
            entity_size: 25.0,
        }
    }
}

impl ArenaConfig {
    /// Number of placement slots along each axis, excluding the slot at 0
    pub fn placement_cells(&self) -> (i32, i32) {
        let columns = (self.width / self.entity_size).floor() as i32 - 1;
        let rows = (self.height / self.entity_size).floor() as i32 - 1;
        (columns, rows)
    }
}

/// How the initial isolation and infection flags are sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// One percentile draw per entity is compared against both thresholds,
    /// so isolation and infection are correlated
    #[default]
    Coupled,
    /// Infection gets a draw of its own
    Independent,
}

/// Initial population parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of entities
    pub population_size: usize,
    /// Isolation percentage (0.0 to 100.0)
    pub isolation_pct: f64,
    /// Initially infected percentage (0.0 to 100.0)
    pub infected_pct: f64,
    /// Sampling of the initial flags
    pub sampling: SamplingMode,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            isolation_pct: 0.0,
            infected_pct: 5.0,
            sampling: SamplingMode::Coupled,
        }
    }
}

/// Disease progression parameters.
///
/// Each infected entity draws a percentile in `1..=100` once a day, and both
/// thresholds are compared inclusively: a draw at or below `mortality` kills,
/// otherwise a draw at or below `recovery` cures. `mortality = 2` is therefore
/// a 2% daily death chance and `mortality = 100` is certain death. Reading
/// the thresholds with strict `<` would give each outcome one percent less.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseaseConfig {
    /// Daily death threshold (percent)
    pub mortality: u32,
    /// Daily recovery threshold (percent), cumulative with `mortality`
    pub recovery: u32,
    /// Ticks that make up one day
    pub ticks_per_day: u32,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        Self {
            mortality: 2,
            recovery: 15,
            ticks_per_day: 3,
        }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Arena configuration
    pub arena: ArenaConfig,
    /// Population configuration
    pub population: PopulationConfig,
    /// Disease configuration
    pub disease: DiseaseConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            arena: ArenaConfig::default(),
            population: PopulationConfig::default(),
            disease: DiseaseConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<()> {
        let disease = &self.disease;
        if disease.mortality > 100 {
            return Err(invalid(format!(
                "mortality must be within 0..=100, got {}",
                disease.mortality
            )));
        }
        if disease.recovery > 100 {
            return Err(invalid(format!(
                "recovery must be within 0..=100, got {}",
                disease.recovery
            )));
        }
        if disease.recovery < disease.mortality {
            return Err(invalid(format!(
                "recovery ({}) must not be below mortality ({})",
                disease.recovery, disease.mortality
            )));
        }
        if disease.ticks_per_day == 0 {
            return Err(invalid("ticks_per_day must be at least 1".to_string()));
        }

        let population = &self.population;
        if population.population_size == 0 {
            return Err(invalid("population_size must be at least 1".to_string()));
        }
        check_percentage("isolation_pct", population.isolation_pct)?;
        check_percentage("infected_pct", population.infected_pct)?;

        let arena = &self.arena;
        if !arena.entity_size.is_finite() || arena.entity_size <= 0.0 {
            return Err(invalid(format!(
                "entity_size must be positive, got {}",
                arena.entity_size
            )));
        }
        if !arena.width.is_finite() || !arena.height.is_finite() {
            return Err(invalid("arena dimensions must be finite".to_string()));
        }
        let (columns, rows) = arena.placement_cells();
        if columns < 1 || rows < 1 {
            return Err(invalid(format!(
                "arena {}x{} is too small for entities of size {}",
                arena.width, arena.height, arena.entity_size
            )));
        }

        Ok(())
    }
}

fn check_percentage(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(invalid(format!("{name} must be within 0..=100, got {value}")));
    }
    Ok(())
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig(message)
}

/// Controls for driving a simulation to completion
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Stop after this many ticks even if the epidemic is still running
    pub max_ticks: Option<u64>,
    /// Pause between ticks (milliseconds)
    pub tick_delay_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: None,
            tick_delay_ms: 0,
        }
    }
}

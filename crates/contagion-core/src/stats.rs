//! Population statistics reported by the engine.

use crate::HealthState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Entities still alive
    pub alive: usize,
    /// Entities that died
    pub dead: usize,
    /// Full days elapsed
    pub days: u64,
}

impl From<Summary> for (usize, usize, u64) {
    fn from(summary: Summary) -> Self {
        (summary.alive, summary.dead, summary.days)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Days til completion: {}", self.days)?;
        writeln!(f, "Alive: {}", self.alive)?;
        write!(f, "Dead: {}", self.dead)
    }
}

/// Head count per health state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub susceptible: usize,
    pub infected: usize,
    pub recovered: usize,
    pub dead: usize,
    /// Isolated entities, dead ones included
    pub isolated: usize,
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one entity
    pub fn record(&mut self, health: HealthState, isolated: bool) {
        match health {
            HealthState::Susceptible => self.susceptible += 1,
            HealthState::Infected => self.infected += 1,
            HealthState::Recovered => self.recovered += 1,
            HealthState::Dead => self.dead += 1,
        }
        if isolated {
            self.isolated += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered + self.dead
    }

    pub fn alive(&self) -> usize {
        self.total() - self.dead
    }
}

impl FromIterator<(HealthState, bool)> for Census {
    fn from_iter<I: IntoIterator<Item = (HealthState, bool)>>(iter: I) -> Self {
        let mut census = Census::new();
        for (health, isolated) in iter {
            census.record(health, isolated);
        }
        census
    }
}

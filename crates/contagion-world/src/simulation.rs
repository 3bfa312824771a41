//! Simulation engine: movement, contact, transmission and daily progression.

use crate::chance::{Chance, SeededChance};
use crate::entity::{DayOutcome, Entity};
use crate::population::seed_population;
use contagion_core::{
    ArenaConfig, Census, EntityId, EntitySnapshot, Error, Result, SimulationConfig, Summary,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// Elapsed simulated time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    /// Full days elapsed
    pub day: u64,
    /// Ticks into the current day
    pub tick_in_day: u32,
    /// Ticks since the start of the run
    pub total_ticks: u64,
}

/// A detected contact between two entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
    /// The entity that caught the infection, if any
    pub transmitted_to: Option<EntityId>,
}

/// What happened at a day boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: u64,
    pub deaths: usize,
    pub recoveries: usize,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Value of `Clock::total_ticks` after this tick
    pub tick: u64,
    pub contacts: usize,
    pub transmissions: usize,
    /// Set when this tick closed a day
    pub day_ended: Option<DayReport>,
}

/// Result of driving a simulation to completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub summary: Summary,
    pub census: Census,
    pub ticks: u64,
    /// False when the tick cap stopped the run before the epidemic ended
    pub terminated: bool,
}

/// Resolve a possible contact between two entities.
///
/// Only two non-isolated entities with overlapping boxes make contact. Both
/// reverse direction on both axes, and an infection carried by exactly one
/// of them passes to the other.
pub fn contact(a: &mut Entity, b: &mut Entity) -> Option<Contact> {
    if !a.can_contact() || !b.can_contact() || !a.overlaps(b) {
        return None;
    }

    a.bounce();
    b.bounce();

    let transmitted_to = match (a.is_infected(), b.is_infected()) {
        (true, false) if b.infect() => Some(b.id()),
        (false, true) if a.infect() => Some(a.id()),
        _ => None,
    };

    Some(Contact {
        a: a.id(),
        b: b.id(),
        transmitted_to,
    })
}

/// Hand-placed entities must be indexed by id, sized for the arena and start
/// inside it
fn check_entities(arena: &ArenaConfig, entities: &[Entity]) -> Result<()> {
    for (index, entity) in entities.iter().enumerate() {
        if entity.id() != EntityId(index) {
            return Err(Error::InvalidConfig(format!(
                "entity at index {index} has id {}",
                entity.id()
            )));
        }
        let bbox = entity.bounding_box();
        if bbox.size != arena.entity_size {
            return Err(Error::InvalidConfig(format!(
                "entity {} has size {}, arena expects {}",
                entity.id(),
                bbox.size,
                arena.entity_size
            )));
        }
        if !bbox.is_within(arena.width, arena.height) {
            return Err(Error::InvalidConfig(format!(
                "entity {} at ({}, {}) lies outside the {}x{} arena",
                entity.id(),
                bbox.left,
                bbox.top,
                arena.width,
                arena.height
            )));
        }
    }
    Ok(())
}

pub struct Simulation {
    config: SimulationConfig,
    entities: Vec<Entity>,
    clock: Clock,
    chance: Box<dyn Chance>,
}

impl Simulation {
    /// Validate the configuration and seed a population from `chance`
    pub fn new(config: SimulationConfig, mut chance: Box<dyn Chance>) -> Result<Self> {
        config.validate()?;
        let entities = seed_population(&config, chance.as_mut());

        let census: Census = entities.iter().map(|e| (e.health(), e.is_isolated())).collect();
        info!(
            event = "population_seeded",
            population = entities.len(),
            infected = census.infected,
            isolated = census.isolated,
            seed = config.seed,
            "Population created"
        );

        Ok(Self {
            config,
            entities,
            clock: Clock::default(),
            chance,
        })
    }

    /// Build a simulation drawing from a ChaCha8 generator seeded with `config.seed`
    pub fn seeded(config: SimulationConfig) -> Result<Self> {
        let chance = Box::new(SeededChance::new(config.seed));
        Self::new(config, chance)
    }

    /// Start from a hand-placed population.
    ///
    /// `population_size` in the configuration is replaced by the number of
    /// entities given.
    pub fn from_entities(
        mut config: SimulationConfig,
        entities: Vec<Entity>,
        chance: Box<dyn Chance>,
    ) -> Result<Self> {
        config.population.population_size = entities.len();
        config.validate()?;
        check_entities(&config.arena, &entities)?;

        Ok(Self {
            config,
            entities,
            clock: Clock::default(),
            chance,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self) -> TickReport {
        for entity in &mut self.entities {
            entity.advance();
            entity.reflect_at_bounds(&self.config.arena);
        }

        let mut report = TickReport::default();
        self.resolve_contacts(&mut report);

        // A bounce off a neighbour must not send a wall-crossing entity outward
        for entity in &mut self.entities {
            entity.reflect_at_bounds(&self.config.arena);
        }

        self.clock.total_ticks += 1;
        self.clock.tick_in_day += 1;
        report.tick = self.clock.total_ticks;

        if self.clock.tick_in_day >= self.config.disease.ticks_per_day {
            self.clock.tick_in_day = 0;
            self.clock.day += 1;
            report.day_ended = Some(self.progress_day());
        }

        report
    }

    /// Every unordered pair is checked exactly once
    fn resolve_contacts(&mut self, report: &mut TickReport) {
        let count = self.entities.len();
        for j in 1..count {
            let (head, tail) = self.entities.split_at_mut(j);
            let second = &mut tail[0];
            for first in head.iter_mut() {
                if let Some(hit) = contact(first, second) {
                    report.contacts += 1;
                    trace!(a = %hit.a, b = %hit.b, "Contact");
                    if let Some(target) = hit.transmitted_to {
                        report.transmissions += 1;
                        trace!(entity = %target, tick = self.clock.total_ticks, "Infection transmitted");
                    }
                }
            }
        }
    }

    fn progress_day(&mut self) -> DayReport {
        let mut report = DayReport {
            day: self.clock.day,
            deaths: 0,
            recoveries: 0,
        };

        for entity in &mut self.entities {
            match entity.progress_day(self.chance.as_mut(), &self.config.disease) {
                DayOutcome::Died => {
                    report.deaths += 1;
                    debug!(entity = %entity.id(), day = report.day, "Entity died");
                }
                DayOutcome::Recovered => report.recoveries += 1,
                DayOutcome::StillInfected | DayOutcome::Unaffected => {}
            }
        }

        let census = self.census();
        debug!(
            event = "day_summary",
            day = report.day,
            deaths = report.deaths,
            recoveries = report.recoveries,
            susceptible = census.susceptible,
            infected = census.infected,
            recovered = census.recovered,
            dead = census.dead,
            "Day complete"
        );

        report
    }

    /// False once everyone is dead or nobody is infected
    pub fn should_continue(&self) -> bool {
        let all_dead = self.entities.iter().all(|e| !e.is_alive());
        let none_infected = self.entities.iter().all(|e| !e.is_infected());
        !(all_dead || none_infected)
    }

    pub fn summary(&self) -> Summary {
        let census = self.census();
        Summary {
            alive: census.alive(),
            dead: census.dead,
            days: self.clock.day,
        }
    }

    pub fn census(&self) -> Census {
        self.entities
            .iter()
            .map(|e| (e.health(), e.is_isolated()))
            .collect()
    }

    /// State of every entity, in population order
    pub fn snapshot(&self) -> Vec<EntitySnapshot> {
        self.entities.iter().map(Entity::snapshot).collect()
    }

    /// Tick until the epidemic ends, or until `max_ticks` ticks have run
    pub fn run(&mut self, max_ticks: Option<u64>) -> RunOutcome {
        self.run_with(max_ticks, |_, _| {})
    }

    /// Like [`Simulation::run`], calling `on_tick` after every tick
    #[instrument(skip(self, on_tick), fields(population = self.entities.len()))]
    pub fn run_with<F>(&mut self, max_ticks: Option<u64>, mut on_tick: F) -> RunOutcome
    where
        F: FnMut(&Simulation, &TickReport),
    {
        info!("Starting simulation");
        let start = self.clock.total_ticks;

        let mut terminated = true;
        while self.should_continue() {
            if max_ticks.is_some_and(|cap| self.clock.total_ticks - start >= cap) {
                terminated = false;
                break;
            }
            let report = self.tick();
            on_tick(self, &report);
        }

        let outcome = RunOutcome {
            summary: self.summary(),
            census: self.census(),
            ticks: self.clock.total_ticks - start,
            terminated,
        };

        info!(
            event = "run_complete",
            days = outcome.summary.days,
            ticks = outcome.ticks,
            alive = outcome.summary.alive,
            dead = outcome.summary.dead,
            recovered = outcome.census.recovered,
            still_infected = outcome.census.infected,
            terminated = outcome.terminated,
            "Simulation finished"
        );

        outcome
    }
}

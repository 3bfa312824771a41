//! Initial population placement.

use crate::chance::Chance;
use crate::entity::Entity;
use contagion_core::{EntityId, Position, SamplingMode, SimulationConfig, Velocity};

/// Velocity components are integers in this range, scaled by `SPEED_STEP`
const SPEED_RANGE: i32 = 100;
const SPEED_STEP: f64 = 0.25;

/// Create the starting population.
///
/// Per entity the draws happen in a fixed order: the flag percentile, the
/// infection percentile (independent sampling only), the velocity (moving
/// entities only) and finally the lattice position.
pub fn seed_population(config: &SimulationConfig, chance: &mut dyn Chance) -> Vec<Entity> {
    let population = &config.population;
    let arena = &config.arena;
    let (columns, rows) = arena.placement_cells();

    (0..population.population_size)
        .map(|index| {
            let roll = chance.percentile() as f64;
            let isolated = roll < population.isolation_pct;
            let infected = match population.sampling {
                SamplingMode::Coupled => roll < population.infected_pct,
                SamplingMode::Independent => (chance.percentile() as f64) < population.infected_pct,
            };

            let velocity = if isolated {
                Velocity::ZERO
            } else {
                Velocity::new(random_speed(chance), random_speed(chance))
            };

            let position = Position::new(
                chance.uniform(1, columns) as f64 * arena.entity_size,
                chance.uniform(1, rows) as f64 * arena.entity_size,
            );

            let mut entity = Entity::new(EntityId(index), position, velocity, arena.entity_size);
            if isolated {
                entity = entity.with_isolation();
            }
            if infected {
                entity = entity.with_infection();
            }
            entity
        })
        .collect()
}

fn random_speed(chance: &mut dyn Chance) -> f64 {
    chance.uniform(-SPEED_RANGE, SPEED_RANGE) as f64 * SPEED_STEP
}

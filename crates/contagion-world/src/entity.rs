//! Entity state and its per-tick and per-day transitions.

use crate::chance::Chance;
use contagion_core::{
    ArenaConfig, BoundingBox, DiseaseConfig, EntityId, EntitySnapshot, HealthState, Position,
    Velocity,
};
use serde::{Deserialize, Serialize};

/// Result of one day's progression for a single entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOutcome {
    /// Not infected, nothing drawn
    Unaffected,
    StillInfected,
    Recovered,
    Died,
}

/// One individual in the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    position: Position,
    velocity: Velocity,
    size: f64,
    health: HealthState,
    isolated: bool,
}

impl Entity {
    /// A susceptible, moving entity
    pub fn new(id: EntityId, position: Position, velocity: Velocity, size: f64) -> Self {
        Self {
            id,
            position,
            velocity,
            size,
            health: HealthState::Susceptible,
            isolated: false,
        }
    }

    /// Mark as infected at creation
    pub fn with_infection(mut self) -> Self {
        self.health = HealthState::Infected;
        self
    }

    /// Mark as isolated at creation; isolated entities never move
    pub fn with_isolation(mut self) -> Self {
        self.isolated = true;
        self.velocity = Velocity::ZERO;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn health(&self) -> HealthState {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn is_infected(&self) -> bool {
        self.health.is_infected()
    }

    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    /// Whether this entity takes part in contacts at all
    pub fn can_contact(&self) -> bool {
        !self.isolated
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.position, self.size)
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.bounding_box().overlaps(&other.bounding_box())
    }

    /// Apply one tick of displacement
    pub fn advance(&mut self) {
        if self.velocity.is_zero() {
            return;
        }
        self.position = self.position.offset(self.velocity);
    }

    /// Point the velocity back into the arena on any axis where the box pokes
    /// past a wall. For an entity heading outward this is a sign flip; one
    /// already heading inward keeps its direction.
    /// Runs after [`Entity::advance`], so the correction takes effect next tick.
    pub fn reflect_at_bounds(&mut self, arena: &ArenaConfig) {
        let bbox = self.bounding_box();
        if bbox.left < 0.0 {
            self.velocity.dx = self.velocity.dx.abs();
        } else if bbox.right() > arena.width {
            self.velocity.dx = -self.velocity.dx.abs();
        }
        if bbox.top < 0.0 {
            self.velocity.dy = self.velocity.dy.abs();
        } else if bbox.bottom() > arena.height {
            self.velocity.dy = -self.velocity.dy.abs();
        }
    }

    /// Reverse direction on both axes after a collision
    pub fn bounce(&mut self) {
        self.velocity = self.velocity.reversed();
    }

    /// Infect a living entity. Recovered entities have no immunity.
    /// Returns true if the entity was not infected before.
    pub fn infect(&mut self) -> bool {
        match self.health {
            HealthState::Susceptible | HealthState::Recovered => {
                self.health = HealthState::Infected;
                true
            }
            HealthState::Infected | HealthState::Dead => false,
        }
    }

    /// Resolve one day of illness.
    ///
    /// Only infected entities draw. A percentile at or below `mortality` is
    /// fatal; otherwise one at or below `recovery` cures.
    pub fn progress_day(&mut self, chance: &mut dyn Chance, disease: &DiseaseConfig) -> DayOutcome {
        if !self.is_infected() {
            return DayOutcome::Unaffected;
        }

        let draw = chance.percentile();
        if draw <= disease.mortality {
            self.die();
            DayOutcome::Died
        } else if draw <= disease.recovery {
            self.health = HealthState::Recovered;
            DayOutcome::Recovered
        } else {
            DayOutcome::StillInfected
        }
    }

    fn die(&mut self) {
        self.health = HealthState::Dead;
        self.isolated = true;
        self.velocity = Velocity::ZERO;
    }

    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            position: self.position,
            health: self.health,
            isolated: self.isolated,
            alive: self.is_alive(),
            infected: self.is_infected(),
        }
    }
}

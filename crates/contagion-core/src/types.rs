//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an entity: its index in the population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub usize);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 2D position in the arena (top-left corner of the entity's box)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, velocity: Velocity) -> Self {
        Self {
            x: self.x + velocity.dx,
            y: self.y + velocity.dy,
        }
    }
}

/// Per-tick displacement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Flip the sign of both components
    pub fn reversed(&self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

/// Axis-aligned square box occupied by an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub size: f64,
}

impl BoundingBox {
    pub fn new(origin: Position, size: f64) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            size,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.size
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.size
    }

    /// Strict overlap test. Boxes sharing only an edge do not overlap, and an
    /// empty box never overlaps anything.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        if self.size <= 0.0 || other.size <= 0.0 {
            return false;
        }
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// True when the whole box lies within a `width` by `height` arena
    pub fn is_within(&self, width: f64, height: f64) -> bool {
        self.left >= 0.0 && self.top >= 0.0 && self.right() <= width && self.bottom() <= height
    }
}

/// Health of an individual.
///
/// `Recovered` is not immune: contact with an infected entity moves it back
/// to `Infected`. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthState {
    Susceptible,
    Infected,
    Recovered,
    Dead,
}

impl HealthState {
    pub fn is_alive(&self) -> bool {
        !matches!(self, HealthState::Dead)
    }

    pub fn is_infected(&self) -> bool {
        matches!(self, HealthState::Infected)
    }
}

/// Read-only view of one entity, handed to a renderer each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub position: Position,
    pub health: HealthState,
    pub isolated: bool,
    pub alive: bool,
    pub infected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64) -> BoundingBox {
        BoundingBox::new(Position::new(x, y), 25.0)
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = square(0.0, 0.0);

        assert!(a.overlaps(&square(10.0, 10.0)));
        assert!(a.overlaps(&square(24.9, 0.0)));
        // Touching edges is not a collision
        assert!(!a.overlaps(&square(25.0, 0.0)));
        assert!(!a.overlaps(&square(0.0, 25.0)));
        assert!(!a.overlaps(&square(100.0, 100.0)));
    }

    #[test]
    fn test_empty_box_never_overlaps() {
        let empty = BoundingBox::new(Position::new(5.0, 5.0), 0.0);
        assert!(!empty.overlaps(&square(0.0, 0.0)));
        assert!(!square(0.0, 0.0).overlaps(&empty));
    }

    #[test]
    fn test_containment() {
        assert!(square(0.0, 0.0).is_within(100.0, 100.0));
        assert!(square(75.0, 75.0).is_within(100.0, 100.0));

        assert!(!square(-1.0, 10.0).is_within(100.0, 100.0));
        assert!(!square(76.0, 10.0).is_within(100.0, 100.0));
        assert!(!square(10.0, -0.5).is_within(100.0, 100.0));
        assert!(!square(10.0, 80.0).is_within(100.0, 100.0));
    }

    #[test]
    fn test_velocity_helpers() {
        let v = Velocity::new(2.5, -4.0);
        assert_eq!(v.reversed(), Velocity::new(-2.5, 4.0));
        assert!(!v.is_zero());
        assert!(Velocity::ZERO.is_zero());

        let p = Position::new(1.0, 1.0).offset(v);
        assert_eq!(p, Position::new(3.5, -3.0));
    }

    #[test]
    fn test_health_state_flags() {
        assert!(HealthState::Infected.is_infected());
        assert!(HealthState::Recovered.is_alive());
        assert!(!HealthState::Dead.is_alive());
        assert!(!HealthState::Dead.is_infected());
    }
}

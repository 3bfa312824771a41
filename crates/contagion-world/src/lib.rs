//! Epidemic simulation engine.
//!
//! Entities move around a bounded arena, bounce off walls and each other, pass
//! infection on contact and, once a day, either die, recover or stay sick.

pub mod chance;
pub mod entity;
pub mod population;
pub mod simulation;

pub use chance::{Chance, ScriptedChance, SeededChance};
pub use entity::{DayOutcome, Entity};
pub use population::seed_population;
pub use simulation::{contact, Clock, Contact, DayReport, RunOutcome, Simulation, TickReport};

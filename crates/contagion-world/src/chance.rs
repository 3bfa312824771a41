//! Random draws used by the simulation.
//!
//! The engine never touches a global generator. Every draw goes through a
//! [`Chance`] so that runs can be replayed from a seed, or scripted outright.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Source of the integer draws the simulation needs
pub trait Chance {
    /// Uniform integer in `1..=100`
    fn percentile(&mut self) -> u32;

    /// Uniform integer in `low..=high`
    fn uniform(&mut self, low: i32, high: i32) -> i32;
}

/// Seeded generator backed by ChaCha8
#[derive(Debug, Clone)]
pub struct SeededChance {
    rng: ChaCha8Rng,
}

impl SeededChance {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Chance for SeededChance {
    fn percentile(&mut self) -> u32 {
        self.rng.gen_range(1..=100)
    }

    fn uniform(&mut self, low: i32, high: i32) -> i32 {
        self.rng.gen_range(low..=high)
    }
}

/// Replays fixed draws in order.
///
/// Once a queue runs dry, `percentile` keeps returning its fallback and
/// `uniform` returns the midpoint of the requested range.
#[derive(Debug, Clone)]
pub struct ScriptedChance {
    percentiles: VecDeque<u32>,
    uniforms: VecDeque<i32>,
    fallback: u32,
}

impl ScriptedChance {
    /// Always draw `value` as the percentile
    pub fn constant(value: u32) -> Self {
        Self {
            percentiles: VecDeque::new(),
            uniforms: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_percentiles(mut self, draws: impl IntoIterator<Item = u32>) -> Self {
        self.percentiles.extend(draws);
        self
    }

    pub fn with_uniforms(mut self, draws: impl IntoIterator<Item = i32>) -> Self {
        self.uniforms.extend(draws);
        self
    }
}

impl Chance for ScriptedChance {
    fn percentile(&mut self) -> u32 {
        self.percentiles.pop_front().unwrap_or(self.fallback)
    }

    fn uniform(&mut self, low: i32, high: i32) -> i32 {
        match self.uniforms.pop_front() {
            Some(value) => value.clamp(low, high),
            None => low + (high - low) / 2,
        }
    }
}

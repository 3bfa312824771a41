//! End-to-end scenarios driven through the public engine API.

use contagion_core::{EntityId, HealthState, Position, SimulationConfig, Velocity};
use contagion_world::{contact, Chance, DayOutcome, Entity, ScriptedChance, SeededChance, Simulation};
use std::cell::Cell;
use std::rc::Rc;

fn entity(id: usize, x: f64, y: f64, dx: f64, dy: f64) -> Entity {
    Entity::new(EntityId(id), Position::new(x, y), Velocity::new(dx, dy), 25.0)
}

fn config_with(mortality: u32, recovery: u32) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.disease.mortality = mortality;
    config.disease.recovery = recovery;
    config
}

/// Always draws 100 and counts percentile calls
struct CountingChance {
    percentiles: Rc<Cell<usize>>,
}

impl Chance for CountingChance {
    fn percentile(&mut self) -> u32 {
        self.percentiles.set(self.percentiles.get() + 1);
        100
    }

    fn uniform(&mut self, low: i32, _high: i32) -> i32 {
        low
    }
}

#[test]
fn test_same_seed_same_trajectory() {
    let config = SimulationConfig {
        seed: 1234,
        ..Default::default()
    };
    let mut first = Simulation::seeded(config.clone()).unwrap();
    let mut second = Simulation::seeded(config).unwrap();
    assert_eq!(first.snapshot(), second.snapshot());

    for _ in 0..120 {
        let a = first.tick();
        let b = second.tick();
        assert_eq!(a, b);
        assert_eq!(first.snapshot(), second.snapshot());
    }
    assert_eq!(first.summary(), second.summary());
}

#[test]
fn test_different_seeds_diverge() {
    let first = Simulation::seeded(SimulationConfig {
        seed: 1,
        ..Default::default()
    })
    .unwrap();
    let second = Simulation::seeded(SimulationConfig {
        seed: 2,
        ..Default::default()
    })
    .unwrap();

    assert_ne!(first.snapshot(), second.snapshot());
}

#[test]
fn test_wall_crossing_flips_horizontal_velocity() {
    let config = SimulationConfig::default();
    let width = config.arena.width;
    let mover = entity(0, 2.0, 300.0, -5.0, 0.0).with_infection();
    let mut sim =
        Simulation::from_entities(config, vec![mover], Box::new(ScriptedChance::constant(100)))
            .unwrap();

    sim.tick();
    let e = &sim.entities()[0];
    assert_eq!(e.position(), Position::new(-3.0, 300.0));
    assert_eq!(e.velocity(), Velocity::new(5.0, 0.0));
    assert!(e.bounding_box().right() > 0.0);

    sim.tick();
    let e = &sim.entities()[0];
    assert_eq!(e.position(), Position::new(2.0, 300.0));
    assert!(e.bounding_box().left >= 0.0 && e.bounding_box().right() <= width);
}

#[test]
fn test_right_wall_crossing() {
    let config = SimulationConfig::default();
    let width = config.arena.width;
    let mover = entity(0, width - 27.0, 300.0, 4.0, 0.0).with_infection();
    let mut sim =
        Simulation::from_entities(config, vec![mover], Box::new(ScriptedChance::constant(100)))
            .unwrap();

    sim.tick();
    let e = &sim.entities()[0];
    assert!(e.bounding_box().right() > width);
    assert!(e.bounding_box().left < width);
    assert_eq!(e.velocity(), Velocity::new(-4.0, 0.0));
}

#[test]
fn test_transmission_through_tick() {
    let entities = vec![
        entity(0, 300.0, 300.0, 1.0, 2.0).with_infection(),
        entity(1, 310.0, 305.0, -1.0, -2.0),
    ];
    let mut sim = Simulation::from_entities(
        SimulationConfig::default(),
        entities,
        Box::new(ScriptedChance::constant(100)),
    )
    .unwrap();

    let report = sim.tick();
    assert_eq!(report.contacts, 1);
    assert_eq!(report.transmissions, 1);
    assert!(sim.entities()[1].is_infected());
    assert_eq!(sim.entities()[0].velocity(), Velocity::new(-1.0, -2.0));
    assert_eq!(sim.entities()[1].velocity(), Velocity::new(1.0, 2.0));
}

#[test]
fn test_isolated_entity_blocks_contact() {
    let entities = vec![
        entity(0, 300.0, 300.0, 0.0, 0.0).with_isolation().with_infection(),
        entity(1, 310.0, 305.0, 1.0, 0.0),
    ];
    let mut sim = Simulation::from_entities(
        SimulationConfig::default(),
        entities,
        Box::new(ScriptedChance::constant(100)),
    )
    .unwrap();

    let report = sim.tick();
    assert_eq!(report.contacts, 0);
    assert!(!sim.entities()[1].is_infected());
    assert_eq!(sim.entities()[1].velocity(), Velocity::new(1.0, 0.0));
    assert_eq!(sim.entities()[0].position(), Position::new(300.0, 300.0));
}

#[test]
fn test_infected_pair_recovers_with_pinned_draw() {
    let entities = vec![
        entity(0, 300.0, 300.0, 1.0, 0.0).with_infection(),
        entity(1, 310.0, 300.0, -1.0, 0.0),
    ];
    let mut sim = Simulation::from_entities(
        config_with(0, 100),
        entities,
        Box::new(ScriptedChance::constant(50)),
    )
    .unwrap();

    sim.tick();
    assert!(sim.entities()[1].is_infected());

    let outcome = sim.run(None);
    assert!(outcome.terminated);
    assert_eq!(outcome.summary.days, 1);
    assert_eq!(outcome.summary.dead, 0);
    for e in sim.entities() {
        assert!(!e.is_infected());
        assert_eq!(e.health(), HealthState::Recovered);
    }
}

#[test]
fn test_recovered_entity_can_be_reinfected() {
    let disease = config_with(2, 15).disease;
    let mut survivor = entity(0, 300.0, 300.0, 1.0, 0.0).with_infection();
    let mut chance = ScriptedChance::constant(10);
    assert_eq!(survivor.progress_day(&mut chance, &disease), DayOutcome::Recovered);

    let mut carrier = entity(1, 310.0, 300.0, -1.0, 0.0).with_infection();
    let hit = contact(&mut survivor, &mut carrier).unwrap();

    assert_eq!(hit.transmitted_to, Some(EntityId(0)));
    assert_eq!(survivor.health(), HealthState::Infected);
}

#[test]
fn test_certain_death_ends_after_one_day() {
    let patient = entity(0, 300.0, 300.0, 2.0, -1.0).with_infection();
    let mut sim = Simulation::from_entities(
        config_with(100, 100),
        vec![patient],
        Box::new(SeededChance::new(99)),
    )
    .unwrap();
    assert!(sim.should_continue());

    sim.tick();
    sim.tick();
    assert!(sim.should_continue());
    let report = sim.tick();
    assert_eq!(report.day_ended.map(|d| d.deaths), Some(1));
    assert!(!sim.should_continue());

    let (alive, dead, days): (usize, usize, u64) = sim.summary().into();
    assert_eq!((alive, dead, days), (0, 1, 1));
}

#[test]
fn test_progression_runs_once_per_entity_per_day() {
    let percentiles = Rc::new(Cell::new(0));
    let chance = CountingChance {
        percentiles: Rc::clone(&percentiles),
    };

    let mut config = SimulationConfig::default();
    config.disease.ticks_per_day = 4;
    // Isolated and infected: no contacts, never resolves with draw 100
    let entities: Vec<Entity> = (0..5)
        .map(|i| {
            entity(i, 50.0 + 60.0 * i as f64, 100.0, 0.0, 0.0)
                .with_isolation()
                .with_infection()
        })
        .collect();
    let mut sim = Simulation::from_entities(config, entities, Box::new(chance)).unwrap();

    for day in 1..=3u64 {
        for tick in 1..=4 {
            let report = sim.tick();
            if tick < 4 {
                assert!(report.day_ended.is_none());
                assert_eq!(percentiles.get(), 5 * (day as usize - 1));
            } else {
                assert_eq!(report.day_ended.map(|d| d.day), Some(day));
            }
        }
        assert_eq!(sim.clock().day, day);
        assert_eq!(percentiles.get(), 5 * day as usize);
    }
}

#[test]
fn test_seeded_run_reaches_a_terminal_state() {
    let config = SimulationConfig {
        seed: 5,
        ..Default::default()
    };
    let mut sim = Simulation::seeded(config).unwrap();
    let outcome = sim.run(Some(100_000));

    assert!(outcome.terminated);
    assert!(!sim.should_continue());
    assert_eq!(outcome.summary.alive + outcome.summary.dead, 100);
    assert_eq!(outcome.census.infected, 0);
}

#[test]
fn test_snapshot_serializes_for_renderers() {
    let mut chance = SeededChance::new(8);
    let entities = contagion_world::seed_population(&SimulationConfig::default(), &mut chance);
    let sim = Simulation::from_entities(
        SimulationConfig::default(),
        entities,
        Box::new(SeededChance::new(8)),
    )
    .unwrap();

    let json = serde_json::to_string(&sim.snapshot()).unwrap();
    assert!(json.contains("\"health\""));
    assert!(json.contains("\"position\""));
}

//! Simulation engine for advancing a world through generations.

use crate::pattern::{random_soup, PatternKind};
use crate::world::World;
use life_core::{Result, RunConfig, Seed};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use tracing::{debug, info, instrument, trace};

/// A state seen recently, kept for cycle detection
struct HistoryEntry {
    generation: u64,
    hash: u64,
    world: World,
}

pub struct Simulation {
    world: World,
    config: RunConfig,
    generation: u64,
    peak_population: usize,
    history: VecDeque<HistoryEntry>,
}

impl Simulation {
    pub fn new(config: RunConfig) -> Result<Self> {
        config.validate()?;

        let mut world = World::from_config(&config.world)?;
        seed_world(&mut world, &config.seed)?;

        info!(
            rows = world.rows(),
            cols = world.cols(),
            toroidal = world.is_toroidal(),
            population = world.population(),
            "Created world"
        );

        let peak_population = world.population();

        Ok(Self {
            world,
            config,
            generation: 0,
            peak_population,
            history: VecDeque::new(),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Advance one generation
    pub fn step(&mut self) {
        self.world = self.world.next_generation();
        self.generation += 1;
        self.peak_population = self.peak_population.max(self.world.population());
        trace!(generation = self.generation, "Advanced generation");
    }

    /// Run the simulation without observing intermediate worlds
    pub fn run(&mut self) -> SimulationResult {
        self.run_with(|_, _| {})
    }

    /// Run the simulation, calling `observer` with the initial world and
    /// after every generation.
    #[instrument(skip(self, observer), fields(generations = self.config.generations))]
    pub fn run_with<F>(&mut self, mut observer: F) -> SimulationResult
    where
        F: FnMut(u64, &World),
    {
        info!("Starting simulation for {} generations", self.config.generations);

        observer(self.generation, &self.world);
        self.remember();

        let mut stop_reason = StopReason::Completed;

        while self.generation < self.config.generations {
            self.step();
            observer(self.generation, &self.world);

            let interval = self.config.metrics_interval;
            if interval > 0 && self.generation % interval == 0 {
                self.emit_population_metrics();
            }

            if self.config.stop_on_extinction && self.world.is_extinct() {
                stop_reason = StopReason::Extinct;
                break;
            }

            if let Some(period) = self.detect_cycle() {
                stop_reason = StopReason::Cycle { period };
                break;
            }

            self.remember();
        }

        let result = self.collect_results(stop_reason);
        self.emit_summary(&result);
        result
    }

    /// Record the current world in the cycle history
    fn remember(&mut self) {
        let capacity = self.config.cycle_history;
        if capacity == 0 {
            return;
        }

        if self.history.len() == capacity {
            self.history.pop_front();
        }

        self.history.push_back(HistoryEntry {
            generation: self.generation,
            hash: state_hash(&self.world),
            world: self.world.clone(),
        });
    }

    /// Period of the cycle the current world closes, if any
    fn detect_cycle(&self) -> Option<u64> {
        if self.history.is_empty() {
            return None;
        }

        let hash = state_hash(&self.world);
        let entry = self
            .history
            .iter()
            .rev()
            .find(|entry| entry.hash == hash && entry.world == self.world)?;

        let period = self.generation - entry.generation;
        debug!(generation = self.generation, period, "Detected cycle");
        Some(period)
    }

    fn emit_population_metrics(&self) {
        let population = self.world.population();
        let density = population as f64 / self.world.len() as f64;

        info!(
            event = "population_metrics",
            generation = self.generation,
            population = population,
            peak_population = self.peak_population,
            density = format!("{:.2}%", density * 100.0),
            "Population metrics snapshot"
        );
    }

    fn emit_summary(&self, result: &SimulationResult) {
        info!(
            event = "run_summary",
            generations = result.generations,
            final_population = result.final_population,
            peak_population = result.peak_population,
            stop_reason = ?result.stop_reason,
            "Simulation complete"
        );
    }

    fn collect_results(&self, stop_reason: StopReason) -> SimulationResult {
        SimulationResult {
            generations: self.generation,
            final_population: self.world.population(),
            peak_population: self.peak_population,
            stop_reason,
        }
    }
}

fn seed_world(world: &mut World, seed: &Seed) -> Result<()> {
    match seed {
        Seed::Cells { cells } => {
            for &(row, col) in cells {
                world.try_set(row, col, true)?;
            }
        }
        Seed::Pattern { name, row, col } => {
            let kind: PatternKind = name.parse()?;
            kind.place(world, *row, *col)?;
        }
        Seed::Random { seed, density } => {
            random_soup(world, *seed, *density)?;
        }
    }
    Ok(())
}

fn state_hash(world: &World) -> u64 {
    let mut hasher = DefaultHasher::new();
    world.hash(&mut hasher);
    hasher.finish()
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// All configured generations were advanced
    Completed,
    /// Every cell died
    Extinct,
    /// The world repeated a state seen `period` generations earlier
    Cycle { period: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub generations: u64,
    pub final_population: usize,
    pub peak_population: usize,
    pub stop_reason: StopReason,
}

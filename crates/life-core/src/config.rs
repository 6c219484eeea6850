//! Configuration types for the simulation.

use crate::{Error, Result, Topology};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Edge behavior
    pub topology: Topology,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            topology: Topology::Toroidal,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

/// Initial population of a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Seed {
    /// Explicit live cells as `(row, col)`
    Cells { cells: Vec<(usize, usize)> },
    /// A named pattern with its top-left corner at `(row, col)`
    Pattern { name: String, row: usize, col: usize },
    /// Independent random cells, reproducible from `seed`
    Random { seed: u64, density: f32 },
}

impl Default for Seed {
    fn default() -> Self {
        // Vertical triplet on the left edge.
        Seed::Cells {
            cells: vec![(2, 0), (3, 0), (4, 0)],
        }
    }
}

/// Simulation run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// World configuration
    pub world: WorldConfig,
    /// Initial population
    pub seed: Seed,
    /// Maximum number of generations to advance
    pub generations: u64,
    /// Stop as soon as every cell is dead
    pub stop_on_extinction: bool,
    /// Number of recent states remembered for cycle detection (0 disables)
    pub cycle_history: usize,
    /// Emit population metrics every N generations (0 disables)
    pub metrics_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            seed: Seed::default(),
            generations: 3,
            stop_on_extinction: false,
            cycle_history: 0,
            metrics_interval: 0,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;

        if let Seed::Random { density, .. } = &self.seed {
            if !(0.0..=1.0).contains(density) {
                return Err(Error::Validation(format!(
                    "Random seed density {} is outside [0, 1]",
                    density
                )));
            }
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

//! Seeding worlds with well-known patterns or random soup.

use crate::world::World;
use life_core::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Well-known starting patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Blinker,
    Toad,
    Beacon,
    Block,
    Glider,
    RPentomino,
}

impl PatternKind {
    pub const ALL: [PatternKind; 6] = [
        PatternKind::Blinker,
        PatternKind::Toad,
        PatternKind::Beacon,
        PatternKind::Block,
        PatternKind::Glider,
        PatternKind::RPentomino,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Blinker => "blinker",
            PatternKind::Toad => "toad",
            PatternKind::Beacon => "beacon",
            PatternKind::Block => "block",
            PatternKind::Glider => "glider",
            PatternKind::RPentomino => "r_pentomino",
        }
    }

    /// Live cells as `(row, col)` offsets from the top-left corner
    pub fn cells(&self) -> &'static [(usize, usize)] {
        match self {
            PatternKind::Blinker => &[(0, 0), (0, 1), (0, 2)],
            PatternKind::Toad => &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
            PatternKind::Beacon => &[
                (0, 0), (0, 1), (1, 0), (1, 1),
                (2, 2), (2, 3), (3, 2), (3, 3),
            ],
            PatternKind::Block => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            PatternKind::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
            PatternKind::RPentomino => &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
        }
    }

    /// Rows spanned by the pattern
    pub fn height(&self) -> usize {
        self.cells().iter().map(|&(row, _)| row + 1).max().unwrap_or(0)
    }

    /// Columns spanned by the pattern
    pub fn width(&self) -> usize {
        self.cells().iter().map(|&(_, col)| col + 1).max().unwrap_or(0)
    }

    /// Set the pattern's cells alive with its top-left corner at `(row, col)`.
    ///
    /// Fails without touching the world if any cell would land outside it.
    pub fn place(&self, world: &mut World, row: usize, col: usize) -> Result<()> {
        let targets: Vec<(usize, usize)> = self
            .cells()
            .iter()
            .map(|&(d_row, d_col)| (row.saturating_add(d_row), col.saturating_add(d_col)))
            .collect();

        for &(target_row, target_col) in &targets {
            world.check_bounds(target_row, target_col)?;
        }

        for (target_row, target_col) in targets {
            world.set(target_row, target_col, true);
        }

        debug!(pattern = self.name(), row, col, "Placed pattern");
        Ok(())
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PatternKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownPattern(s.to_string()))
    }
}

/// Set every cell alive independently with probability `density`.
///
/// The same `seed` always produces the same world. Returns the resulting
/// population.
pub fn random_soup(world: &mut World, seed: u64, density: f32) -> Result<usize> {
    if !(0.0..=1.0).contains(&density) {
        return Err(Error::Validation(format!(
            "Random seed density {} is outside [0, 1]",
            density
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for row in 0..world.rows() {
        for col in 0..world.cols() {
            let roll = rng.gen::<f32>();
            world.set(row, col, roll < density);
        }
    }

    let population = world.population();
    debug!(seed, density, population, "Seeded random soup");
    Ok(population)
}

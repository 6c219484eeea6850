//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Offsets `(d_row, d_col)` of the eight cells adjacent to a cell.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Signed grid coordinate. May lie one step outside the grid when it
/// names a neighbor candidate of an edge cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Apply toroidal wrapping for the given grid dimensions.
    ///
    /// Each axis is adjusted at most once, so this is only correct for
    /// coordinates within one grid length of the valid range. That holds
    /// for the fixed eight-neighbor offsets; a larger neighborhood radius
    /// needs true modulo wrapping (`((i % n) + n) % n`).
    pub fn wrap_once(&self, rows: i32, cols: i32) -> Self {
        Self {
            row: wrap_index_once(self.row, rows),
            col: wrap_index_once(self.col, cols),
        }
    }

    /// Returns the unsigned coordinate if it lies inside `rows x cols`.
    pub fn in_bounds(&self, rows: usize, cols: usize) -> Option<(usize, usize)> {
        let row = usize::try_from(self.row).ok()?;
        let col = usize::try_from(self.col).ok()?;
        (row < rows && col < cols).then_some((row, col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

fn wrap_index_once(index: i32, bound: i32) -> i32 {
    if index >= bound {
        index - bound
    } else if index < 0 {
        index + bound
    } else {
        index
    }
}

/// How coordinates outside the grid are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Cells beyond the edge are permanently dead.
    Bounded,
    /// Opposite edges are adjacent.
    #[default]
    Toroidal,
}

impl Topology {
    pub fn from_toroidal(is_toroidal: bool) -> Self {
        if is_toroidal {
            Topology::Toroidal
        } else {
            Topology::Bounded
        }
    }

    pub fn is_toroidal(&self) -> bool {
        matches!(self, Topology::Toroidal)
    }
}

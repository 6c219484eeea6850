//! 2D cell grid and the generation rule.

use life_core::{Error, Position, Result, Topology, WorldConfig, NEIGHBOR_OFFSETS};
use serde::Serialize;
use std::fmt;
use std::ops::Index;

/// One simulation snapshot: a dense row-major grid of live/dead cells.
///
/// Dimensions and topology are fixed at construction. Cell contents may be
/// changed with [`World::set`]; advancing produces a new `World` through
/// [`World::next_generation`] and leaves the receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct World {
    rows: usize,
    cols: usize,
    topology: Topology,
    cells: Vec<bool>,
}

impl World {
    /// Create an all-dead world.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or the grid is too large to
    /// address with signed neighbor coordinates.
    pub fn new(rows: usize, cols: usize, topology: Topology) -> Self {
        match Self::try_new(rows, cols, topology) {
            Ok(world) => world,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create an all-dead world, rejecting invalid dimensions.
    pub fn try_new(rows: usize, cols: usize, topology: Topology) -> Result<Self> {
        let addressable = i32::try_from(rows).is_ok() && i32::try_from(cols).is_ok();
        let size = rows.checked_mul(cols).filter(|&size| size > 0 && addressable);

        let Some(size) = size else {
            return Err(Error::InvalidDimensions { rows, cols });
        };

        Ok(Self {
            rows,
            cols,
            topology,
            cells: vec![false; size],
        })
    }

    /// Create a world from configuration
    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        Self::try_new(config.rows, config.cols, config.topology)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn is_toroidal(&self) -> bool {
        self.topology.is_toroidal()
    }

    /// Length of the cell sequence; always `rows * cols`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get cell state. No wrapping is applied.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.cell_index(row, col)]
    }

    /// Set cell state. No wrapping is applied.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let index = self.cell_index(row, col);
        self.cells[index] = alive;
    }

    /// Set cell state, returning an error instead of panicking when
    /// `(row, col)` is outside the grid.
    pub fn try_set(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        self.check_bounds(row, col)?;
        self.set(row, col, alive);
        Ok(())
    }

    pub fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// State of a neighbor candidate that may lie one step outside the grid.
    ///
    /// Toroidal worlds wrap each axis once; in bounded worlds anything
    /// beyond the edge is dead.
    pub fn resolve_neighbor(&self, pos: Position) -> bool {
        let pos = if self.is_toroidal() {
            pos.wrap_once(self.rows as i32, self.cols as i32)
        } else {
            pos
        };

        match pos.in_bounds(self.rows, self.cols) {
            Some((row, col)) => self.get(row, col),
            None => false,
        }
    }

    /// Number of live cells among the eight neighbors of `(row, col)`.
    pub fn alive_neighbors(&self, row: usize, col: usize) -> u8 {
        let center = Position::new(row as i32, col as i32);

        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(d_row, d_col)| self.resolve_neighbor(center.offset(d_row, d_col)))
            .count() as u8
    }

    /// Compute the successor world.
    ///
    /// Every neighbor count is taken from `self`, so the update is never
    /// order dependent.
    pub fn next_generation(&self) -> World {
        let mut next = World {
            rows: self.rows,
            cols: self.cols,
            topology: self.topology,
            cells: vec![false; self.cells.len()],
        };

        for row in 0..self.rows {
            for col in 0..self.cols {
                let neighbors = self.alive_neighbors(row, col);

                let alive = match (self.get(row, col), neighbors) {
                    (true, 2) | (true, 3) => true, // Survival
                    (false, 3) => true,            // Birth
                    _ => false,
                };

                if alive {
                    next.set(row, col, true);
                }
            }
        }

        next
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_extinct(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Iterator over all cells as `(row, col, alive)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &alive)| (i / self.cols, i % self.cols, alive))
    }

    /// Iterator over live cell coordinates in row-major order
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.iter()
            .filter(|&(_, _, alive)| alive)
            .map(|(row, col, _)| (row, col))
    }

    /// Text rendering: `1`/`0` per cell, space separated, one line per
    /// row, followed by a blank line.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn cell_index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) is outside the {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

impl Index<(usize, usize)> for World {
    type Output = bool;

    fn index(&self, (row, col): (usize, usize)) -> &bool {
        &self.cells[self.cell_index(row, col)]
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                f.write_str(if self.get(row, col) { "1 " } else { "0 " })?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn world_with(rows: usize, cols: usize, topology: Topology, cells: &[(usize, usize)]) -> World {
        let mut world = World::new(rows, cols, topology);
        for &(row, col) in cells {
            world.set(row, col, true);
        }
        world
    }

    #[test]
    fn test_world_creation() {
        let world = World::new(4, 6, Topology::Bounded);
        assert_eq!(world.rows(), 4);
        assert_eq!(world.cols(), 6);
        assert_eq!(world.len(), 24);
        assert!(!world.is_toroidal());
        assert!(world.is_extinct());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            World::try_new(0, 5, Topology::Toroidal),
            Err(Error::InvalidDimensions { rows: 0, cols: 5 })
        ));
        assert!(World::try_new(5, 0, Topology::Bounded).is_err());
        assert!(World::try_new(usize::MAX, 2, Topology::Bounded).is_err());
    }

    #[test]
    #[should_panic(expected = "Invalid dimensions")]
    fn test_new_panics_on_zero_rows() {
        World::new(0, 3, Topology::Bounded);
    }

    #[test]
    fn test_row_major_layout() {
        let mut world = World::new(3, 4, Topology::Bounded);
        world.set(1, 2, true);
        assert!(world.cells[6]);
        assert!(world[(1, 2)]);
        assert_eq!(world.live_cells().collect::<Vec<_>>(), vec![(1, 2)]);
    }

    #[test]
    #[should_panic(expected = "outside the 3x3 grid")]
    fn test_get_out_of_bounds_panics() {
        let world = World::new(3, 3, Topology::Toroidal);
        world.get(3, 0);
    }

    #[test]
    fn test_try_set_out_of_bounds() {
        let mut world = World::new(3, 3, Topology::Toroidal);
        assert!(matches!(
            world.try_set(0, 3, true),
            Err(Error::OutOfBounds { row: 0, col: 3, .. })
        ));
        assert!(world.is_extinct());
        assert!(world.try_set(2, 2, true).is_ok());
        assert!(world.get(2, 2));
    }

    #[test]
    fn test_single_cell_dies() {
        let world = world_with(3, 3, Topology::Bounded, &[(1, 1)]);
        assert!(world.next_generation().is_extinct());
    }

    #[test]
    fn test_blinker_oscillates() {
        let world = world_with(5, 5, Topology::Toroidal, &[(2, 1), (2, 2), (2, 3)]);

        let next = world.next_generation();
        assert_eq!(
            next.live_cells().collect::<Vec<_>>(),
            vec![(1, 2), (2, 2), (3, 2)]
        );

        let back = next.next_generation();
        assert_eq!(back, world);
    }

    #[test]
    fn test_block_is_still_life() {
        for topology in [Topology::Bounded, Topology::Toroidal] {
            let block = world_with(4, 4, topology, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
            assert_eq!(block.next_generation(), block);

            let block = world_with(6, 7, topology, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
            assert_eq!(block.next_generation(), block);
        }
    }

    #[test]
    fn test_toroidal_diagonal_wrap() {
        let (rows, cols) = (4, 5);

        let torus = world_with(rows, cols, Topology::Toroidal, &[(0, 0), (rows - 1, cols - 1)]);
        assert_eq!(torus.alive_neighbors(0, 0), 1);
        assert_eq!(torus.alive_neighbors(rows - 1, cols - 1), 1);

        let bounded = world_with(rows, cols, Topology::Bounded, &[(0, 0), (rows - 1, cols - 1)]);
        assert_eq!(bounded.alive_neighbors(0, 0), 0);
        assert_eq!(bounded.alive_neighbors(rows - 1, cols - 1), 0);
    }

    #[test]
    fn test_resolve_neighbor_outside_bounded_grid() {
        let world = world_with(3, 3, Topology::Bounded, &[(0, 0), (2, 2)]);
        assert!(!world.resolve_neighbor(Position::new(-1, -1)));
        assert!(!world.resolve_neighbor(Position::new(3, 3)));
        assert!(world.resolve_neighbor(Position::new(2, 2)));

        let torus = world_with(3, 3, Topology::Toroidal, &[(0, 0), (2, 2)]);
        assert!(torus.resolve_neighbor(Position::new(-1, -1)));
        assert!(torus.resolve_neighbor(Position::new(3, 3)));
    }

    #[test]
    fn test_alive_neighbors_full_grid() {
        let mut world = World::new(3, 3, Topology::Bounded);
        for row in 0..3 {
            for col in 0..3 {
                world.set(row, col, true);
            }
        }
        assert_eq!(world.alive_neighbors(1, 1), 8);
        assert_eq!(world.alive_neighbors(0, 0), 3);
        assert_eq!(world.alive_neighbors(0, 1), 5);
    }

    #[test]
    fn test_edge_triplet_on_torus() {
        // Vertical triplet on the left edge becomes a horizontal one that
        // wraps to the right edge.
        let world = world_with(10, 10, Topology::Toroidal, &[(2, 0), (3, 0), (4, 0)]);
        let next = world.next_generation();
        assert_eq!(
            next.live_cells().collect::<Vec<_>>(),
            vec![(3, 0), (3, 1), (3, 9)]
        );

        let bounded = world_with(10, 10, Topology::Bounded, &[(2, 0), (3, 0), (4, 0)]);
        assert_eq!(
            bounded.next_generation().live_cells().collect::<Vec<_>>(),
            vec![(3, 0), (3, 1)]
        );
    }

    #[test]
    fn test_render() {
        let world = world_with(2, 3, Topology::Bounded, &[(0, 1), (1, 0), (1, 2)]);
        assert_eq!(world.render(), "0 1 0 \n1 0 1 \n\n");
        assert_eq!(format!("{}", world), world.render());
    }

    #[test]
    fn test_population() {
        let world = world_with(5, 5, Topology::Toroidal, &[(0, 0), (4, 4), (2, 3)]);
        assert_eq!(world.population(), 3);
        assert!(!world.is_extinct());
        assert_eq!(world.iter().count(), 25);
    }

    proptest! {
        #[test]
        fn prop_dead_world_stays_dead(rows in 1usize..16, cols in 1usize..16, toroidal in any::<bool>()) {
            let world = World::new(rows, cols, Topology::from_toroidal(toroidal));
            prop_assert!(world.next_generation().is_extinct());
        }

        #[test]
        fn prop_receiver_unchanged_and_size_kept(
            rows in 1usize..12,
            cols in 1usize..12,
            toroidal in any::<bool>(),
            seed in proptest::collection::vec(any::<bool>(), 144),
            steps in 1usize..6,
        ) {
            let mut world = World::new(rows, cols, Topology::from_toroidal(toroidal));
            for (i, &alive) in seed.iter().take(rows * cols).enumerate() {
                world.set(i / cols, i % cols, alive);
            }
            let before = world.clone();

            let mut current = world.next_generation();
            prop_assert_eq!(&world, &before);

            for _ in 0..steps {
                prop_assert_eq!(current.len(), rows * cols);
                prop_assert_eq!(current.rows(), rows);
                prop_assert_eq!(current.cols(), cols);
                prop_assert_eq!(current.topology(), world.topology());
                current = current.next_generation();
            }
            prop_assert_eq!(current.len(), rows * cols);
        }

        #[test]
        fn prop_neighbor_count_in_range(
            rows in 1usize..8,
            cols in 1usize..8,
            toroidal in any::<bool>(),
            seed in proptest::collection::vec(any::<bool>(), 64),
        ) {
            let mut world = World::new(rows, cols, Topology::from_toroidal(toroidal));
            for (i, &alive) in seed.iter().take(rows * cols).enumerate() {
                world.set(i / cols, i % cols, alive);
            }
            for (row, col, _) in world.iter() {
                prop_assert!(world.alive_neighbors(row, col) <= 8);
            }
        }
    }
}

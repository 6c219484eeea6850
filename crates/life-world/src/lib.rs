//! World simulation engine.
//!
//! This module implements the 2D grid world where cells live and die
//! under Conway's rules, on either a bounded or a toroidal grid.

pub mod world;
pub mod pattern;
pub mod simulation;

pub use world::World;
pub use pattern::{random_soup, PatternKind};
pub use simulation::{Simulation, SimulationResult, StopReason};

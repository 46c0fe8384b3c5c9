//! Hexmerge Topology
//!
//! Geometry of the hexagonal merge board: cube coordinates, the hexagon of a
//! given radius, the six move directions, and the pixel layout a renderer
//! needs to draw the board.
//!
//! # Cube Coordinates
//!
//! Every cell is named by three integer axes `(x, y, z)` with `x + y + z = 0`.
//! A hexagon of radius `r` is every cell within `r - 1` steps of the origin,
//! `3r² - 3r + 1` cells in all.
//!
//! # Directions
//!
//! A move groups cells into rows by one axis and orders each row by another.
//! [`DIRECTION_TABLE`] is the single source of truth for that mapping.

mod coord;
mod direction;
mod error;
mod grid;
mod layout;

pub use coord::{Axis, CubeCoord};
pub use direction::{Direction, DirectionAxes, DIRECTION_TABLE};
pub use error::{Result, TopologyError};
pub use grid::{cell_count, contains, hexagon, Hexagon, MAX_RADIUS};
pub use layout::{HexLayout, Point};

/// Number of move directions on a hex board.
pub const DIRECTION_COUNT: usize = 6;

// Compile-time check that the table covers every direction
const _: () = assert!(DIRECTION_TABLE.len() == DIRECTION_COUNT);

//! Error types for hexmerge-topology.

use thiserror::Error;

/// Result type for hexmerge-topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors raised while building grids or parsing inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// A grid was requested with a radius outside `1..=MAX_RADIUS`.
    #[error("invalid grid radius {0}: must be between 1 and {max}", max = crate::grid::MAX_RADIUS)]
    InvalidRadius(u32),

    /// Three axes that do not sum to zero.
    #[error("coordinate ({x}, {y}, {z}) is off the hex lattice")]
    OffLattice { x: i32, y: i32, z: i32 },

    /// A move key that names no direction.
    #[error("unknown direction key: {0:?}")]
    UnknownDirection(String),
}

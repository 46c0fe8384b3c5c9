//! Error types for hexmerge-engine.

use hexmerge_topology::CubeCoord;
use thiserror::Error;

/// Result type for hexmerge-engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by board construction and reconciliation.
///
/// Game over is not an error; it is reported by
/// [`is_active_game`](crate::is_active_game).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A board was requested with a radius outside `1..=MAX_RADIUS`.
    #[error("invalid board radius {0}: must be between 1 and {max}", max = hexmerge_topology::MAX_RADIUS)]
    InvalidRadius(u32),

    /// An incoming cell names a position that is not on the board.
    #[error("coordinate {0} is not on the board")]
    UnknownCoordinate(CubeCoord),

    /// An incoming value that is neither empty nor a power of two.
    #[error("invalid value {value} at {coord}: must be 0 or a power of two")]
    InvalidValue { coord: CubeCoord, value: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_coordinate_display() {
        let err = EngineError::UnknownCoordinate(CubeCoord::new(5, -2));
        assert_eq!(err.to_string(), "coordinate (5, -2, -3) is not on the board");
    }

    #[test]
    fn invalid_radius_display() {
        assert_eq!(
            EngineError::InvalidRadius(0).to_string(),
            "invalid board radius 0: must be between 1 and 16384"
        );
    }
}

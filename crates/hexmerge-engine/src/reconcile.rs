//! Folding externally assigned values into the board.

use tracing::debug;

use crate::board::{Board, Cell};
use crate::error::{EngineError, Result};

/// Write each incoming `(coord, value)` into the board.
///
/// Every incoming cell overwrites the grid value at its coordinate and is
/// appended to the filled index with a new key, continuing upward from one
/// past the largest existing key. The most recently reconciled cell therefore
/// iterates first. A filled-index entry already at that coordinate is
/// replaced; an incoming `0` clears the position.
///
/// Fails with [`EngineError::UnknownCoordinate`] if a coordinate is not on the
/// board, or [`EngineError::InvalidValue`] if a value is not zero or a power
/// of two. On failure the input board is unaffected.
pub fn fold(new_cells: &[Cell], board: &Board) -> Result<Board> {
    let mut cells = board.cells().to_vec();
    let mut filled = board.filled().clone();
    let mut next = filled.next_key();

    for incoming in new_cells {
        let index = board
            .position_of(incoming.coord)
            .ok_or(EngineError::UnknownCoordinate(incoming.coord))?;
        if incoming.value != 0 && !incoming.value.is_power_of_two() {
            return Err(EngineError::InvalidValue {
                coord: incoming.coord,
                value: incoming.value,
            });
        }

        cells[index].value = incoming.value;
        filled.remove_coord(incoming.coord);
        if incoming.is_filled() {
            filled.insert(next, cells[index]);
            next = next.next();
        }
    }

    debug!(
        incoming = new_cells.len(),
        filled = filled.len(),
        "reconciled assigned values"
    );

    Ok(Board::from_parts(board.radius(), cells, filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::FilledKey;
    use hexmerge_topology::CubeCoord;

    #[test]
    fn fold_into_empty_board() {
        let board = Board::new(2).unwrap();
        let result = fold(&[Cell::new(CubeCoord::ORIGIN, 4)], &board).unwrap();

        assert_eq!(result.value_at(CubeCoord::ORIGIN), Some(4));
        assert_eq!(result.filled_count(), 1);
        assert_eq!(result.filled().len(), 1);
        assert_eq!(result.filled().key_of(CubeCoord::ORIGIN), Some(FilledKey(0)));
        for cell in result.cells() {
            if cell.coord != CubeCoord::ORIGIN {
                assert_eq!(cell.value, 0);
            }
        }
    }

    #[test]
    fn new_entries_key_above_existing() {
        let board = Board::new(2).unwrap();
        let first = fold(
            &[
                Cell::new(CubeCoord::new(1, -1), 2),
                Cell::new(CubeCoord::new(-1, 1), 2),
            ],
            &board,
        )
        .unwrap();
        let prior_max = first.filled().max_key().unwrap();

        let second = fold(&[Cell::new(CubeCoord::ORIGIN, 4)], &first).unwrap();
        assert_eq!(second.filled().len(), 3);
        let origin_key = second.filled().key_of(CubeCoord::ORIGIN).unwrap();
        assert!(origin_key > prior_max);

        // most recent first
        let first_entry = second.filled().iter().next().unwrap();
        assert_eq!(first_entry.1.coord, CubeCoord::ORIGIN);
    }

    #[test]
    fn later_cells_in_one_batch_iterate_first() {
        let board = Board::new(2).unwrap();
        let result = fold(
            &[
                Cell::new(CubeCoord::new(0, 1), 2),
                Cell::new(CubeCoord::new(0, -1), 2),
            ],
            &board,
        )
        .unwrap();
        let order: Vec<_> = result.filled().cells().map(|c| c.coord).collect();
        assert_eq!(order, vec![CubeCoord::new(0, -1), CubeCoord::new(0, 1)]);
    }

    #[test]
    fn unknown_coordinate_is_surfaced() {
        let board = Board::new(2).unwrap();
        let err = fold(&[Cell::new(CubeCoord::new(2, 0), 2)], &board).unwrap_err();
        assert_eq!(err, EngineError::UnknownCoordinate(CubeCoord::new(2, 0)));
    }

    #[test]
    fn non_power_of_two_is_rejected() {
        let board = Board::new(2).unwrap();
        let err = fold(&[Cell::new(CubeCoord::ORIGIN, 3)], &board).unwrap_err();
        assert!(matches!(err, EngineError::InvalidValue { value: 3, .. }));
    }

    #[test]
    fn overwrite_replaces_index_entry() {
        let board = Board::new(2).unwrap();
        let once = fold(&[Cell::new(CubeCoord::ORIGIN, 2)], &board).unwrap();
        let twice = fold(&[Cell::new(CubeCoord::ORIGIN, 8)], &once).unwrap();

        assert_eq!(twice.filled().len(), 1);
        assert_eq!(twice.value_at(CubeCoord::ORIGIN), Some(8));
        assert_eq!(twice.filled().key_of(CubeCoord::ORIGIN), Some(FilledKey(1)));
    }

    #[test]
    fn zero_clears_position() {
        let board = Board::new(2).unwrap();
        let once = fold(&[Cell::new(CubeCoord::ORIGIN, 2)], &board).unwrap();
        let cleared = fold(&[Cell::new(CubeCoord::ORIGIN, 0)], &once).unwrap();

        assert_eq!(cleared.value_at(CubeCoord::ORIGIN), Some(0));
        assert!(cleared.filled().is_empty());
    }
}

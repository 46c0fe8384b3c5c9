//! Game-over detection.
//!
//! The game is live while any row, in any of the six directions, has an empty
//! position or two order-adjacent filled cells of equal value. When no row
//! anywhere qualifies, no move can change the board.

use hexmerge_topology::Direction;

use crate::board::{Board, Cell};
use crate::merge::row_has_continuation;
use crate::rows::row_indices;

fn direction_is_open(direction: Direction, cells: &[Cell]) -> bool {
    row_indices(direction, cells).iter().any(|row| {
        let filled: Vec<u32> = row
            .iter()
            .map(|&index| cells[index].value)
            .filter(|&v| v > 0)
            .collect();
        row_has_continuation(&filled, row.len())
    })
}

/// Whether at least one move remains anywhere on the board.
pub fn is_active_game(board: &Board) -> bool {
    Direction::ALL
        .into_iter()
        .any(|direction| direction_is_open(direction, board.cells()))
}

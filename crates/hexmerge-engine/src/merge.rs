//! Shift-and-merge.
//!
//! A move slides every row toward the front of its order axis. Within a row
//! only the filled values take part: each value is compared with the next
//! filled value, an equal pair collapses into one cell of double value, and a
//! merged cell never merges again in the same move. So `[2, 2, 2]` becomes
//! `[4, 2, 0]`, never `[8]` or `[4, 4]`.
//!
//! A pair whose double does not fit a `u32` (two `2^31` cells) stays unmerged.

use hexmerge_topology::Direction;
use tracing::debug;

use crate::board::{Board, Cell, FilledIndex};
use crate::rows::row_indices;

/// Outcome of sliding one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMerge {
    /// New row values, same length as the input row.
    pub values: Vec<u32>,
    /// Whether the resulting row still has room or an adjacent equal pair.
    pub has_legal_continuation: bool,
}

/// Outcome of a move over the whole board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// The board after the move. The input board is left untouched.
    pub board: Board,
    /// OR of the per-row continuation flags for this direction only.
    pub has_legal_continuation: bool,
    /// Whether any cell's value differs from before the move.
    pub changed: bool,
}

/// The value two equal cells of `value` merge into, if it fits.
#[inline]
fn merged(value: u32) -> Option<u32> {
    value.checked_mul(2)
}

/// Whether a row whose filled values are `filled` (in order) still admits a move:
/// it has an empty position, or two adjacent filled values can merge.
pub(crate) fn row_has_continuation(filled: &[u32], row_len: usize) -> bool {
    filled.len() < row_len
        || filled
            .windows(2)
            .any(|pair| pair[0] == pair[1] && merged(pair[0]).is_some())
}

/// Slide and merge one row of values.
pub fn shift_and_merge_row(row: &[u32]) -> RowMerge {
    let filled: Vec<u32> = row.iter().copied().filter(|&v| v > 0).collect();

    let mut values = Vec::with_capacity(filled.len());
    let mut i = 0;
    while i < filled.len() {
        let pair = filled
            .get(i + 1)
            .filter(|&&next| next == filled[i])
            .and_then(|&next| merged(next));
        match pair {
            Some(doubled) => {
                values.push(doubled);
                i += 2;
            }
            None => {
                values.push(filled[i]);
                i += 1;
            }
        }
    }

    let has_legal_continuation = row_has_continuation(&values, row.len());
    values.resize(row.len(), 0);

    RowMerge {
        values,
        has_legal_continuation,
    }
}

/// Apply a move in `direction` to `board`.
pub fn play(direction: Direction, board: &Board) -> MoveResult {
    let before = board.cells();
    let mut cells = before.to_vec();
    let mut has_legal_continuation = false;

    for row in row_indices(direction, before) {
        let values: Vec<u32> = row.iter().map(|&index| before[index].value).collect();
        let merge = shift_and_merge_row(&values);
        has_legal_continuation |= merge.has_legal_continuation;
        for (&index, value) in row.iter().zip(merge.values) {
            cells[index].value = value;
        }
    }

    let changed = cells
        .iter()
        .zip(before)
        .any(|(after, before)| after.value != before.value);
    let filled = rekey(board.filled(), &cells);

    debug!(%direction, changed, has_legal_continuation, "applied move");

    MoveResult {
        board: Board::from_parts(board.radius(), cells, filled),
        has_legal_continuation,
        changed,
    }
}

/// Rebuild the filled index after a move.
///
/// A cell whose coordinate and value are unchanged in place keeps its old
/// key; every other filled cell gets a fresh key above all previous keys.
fn rekey(previous: &FilledIndex, cells: &[Cell]) -> FilledIndex {
    let mut next = previous.next_key();
    let entries = cells
        .iter()
        .filter(|cell| cell.is_filled())
        .map(|cell| {
            let kept = previous
                .iter()
                .find(|(_, old)| old == cell)
                .map(|(key, _)| *key);
            let key = kept.unwrap_or_else(|| {
                let fresh = next;
                next = next.next();
                fresh
            });
            (key, *cell)
        })
        .collect();
    FilledIndex::from_entries(entries)
}

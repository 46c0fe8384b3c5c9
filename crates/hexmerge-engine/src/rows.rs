//! Directional rows.
//!
//! Grouping is an explicit two-pass routine: partition every cell by its value
//! on the direction's group axis, then stable-sort each partition ascending on
//! the order axis. Partitions come out ascending by group value; only the
//! order *within* a row is meaningful to the merge.

use std::collections::BTreeMap;

use hexmerge_topology::Direction;

use crate::board::Cell;

/// Grid indices of each row for `direction`, each row in travel order.
pub(crate) fn row_indices(direction: Direction, cells: &[Cell]) -> Vec<Vec<usize>> {
    let axes = direction.axes();

    let mut partitions: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (index, cell) in cells.iter().enumerate() {
        partitions
            .entry(cell.coord.axis(axes.group))
            .or_default()
            .push(index);
    }

    partitions
        .into_values()
        .map(|mut row| {
            row.sort_by_key(|&index| cells[index].coord.axis(axes.order));
            row
        })
        .collect()
}

/// Split `cells` into the rows a move in `direction` slides along.
pub fn group_by_direction(direction: Direction, cells: &[Cell]) -> Vec<Vec<Cell>> {
    row_indices(direction, cells)
        .into_iter()
        .map(|row| row.into_iter().map(|index| cells[index]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use hexmerge_topology::CubeCoord;

    #[test]
    fn rows_cover_every_cell_once() {
        let board = Board::new(4).unwrap();
        for direction in Direction::ALL {
            let rows = group_by_direction(direction, board.cells());
            let total: usize = rows.iter().map(Vec::len).sum();
            assert_eq!(total, board.cells().len(), "{:?}", direction);
        }
    }

    #[test]
    fn radius_three_row_lengths() {
        let board = Board::new(3).unwrap();
        for direction in Direction::ALL {
            let lengths: Vec<_> = group_by_direction(direction, board.cells())
                .iter()
                .map(Vec::len)
                .collect();
            assert_eq!(lengths, vec![3, 4, 5, 4, 3], "{:?}", direction);
        }
    }

    #[test]
    fn rows_share_group_and_ascend_on_order() {
        let board = Board::new(5).unwrap();
        for direction in Direction::ALL {
            let axes = direction.axes();
            for row in group_by_direction(direction, board.cells()) {
                let group = row[0].coord.axis(axes.group);
                assert!(row.iter().all(|c| c.coord.axis(axes.group) == group));
                for pair in row.windows(2) {
                    assert!(pair[0].coord.axis(axes.order) < pair[1].coord.axis(axes.order));
                }
            }
        }
    }

    #[test]
    fn north_row_through_origin() {
        let board = Board::new(2).unwrap();
        let rows = group_by_direction(Direction::North, board.cells());
        let middle: Vec<_> = rows[1].iter().map(|c| c.coord).collect();
        // x = 0, ascending z
        assert_eq!(
            middle,
            vec![CubeCoord::new(0, 1), CubeCoord::ORIGIN, CubeCoord::new(0, -1)]
        );
    }

    #[test]
    fn opposite_directions_share_rows_in_reverse() {
        let board = Board::new(3).unwrap();
        let north = group_by_direction(Direction::North, board.cells());
        let south = group_by_direction(Direction::South, board.cells());
        for (n, s) in north.iter().zip(&south) {
            let mut reversed = s.clone();
            reversed.reverse();
            assert_eq!(n, &reversed);
        }
    }
}

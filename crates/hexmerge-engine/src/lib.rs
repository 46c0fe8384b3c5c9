//! Hexmerge Engine
//!
//! The merge rules of a 2048-style game on a hexagonal board.
//!
//! # Board
//!
//! A [`Board`] holds every position of the hexagon (the complete grid) and an
//! ordered index of the filled positions (the render-order log). Boards are
//! values: every operation takes a board by reference and returns a new one.
//!
//! # Moves
//!
//! [`play`] slides and merges every row for one direction. Equal adjacent
//! values merge pairwise, leftmost first, and a merged value does not merge
//! again in the same move.
//!
//! # Liveness
//!
//! [`is_active_game`] checks all six directions; the game is over when none of
//! them can change the board.
//!
//! # Reconciliation
//!
//! New values come from outside the engine. [`fold`] writes them into the
//! board and records them as the newest filled cells.

mod board;
mod error;
mod liveness;
mod merge;
mod reconcile;
mod rows;

pub use board::{Board, Cell, FilledIndex, FilledKey};
pub use error::{EngineError, Result};
pub use liveness::is_active_game;
pub use merge::{play, shift_and_merge_row, MoveResult, RowMerge};
pub use reconcile::fold;
pub use rows::group_by_direction;

pub use hexmerge_topology::{CubeCoord, Direction};

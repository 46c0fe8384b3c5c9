//! Renderer views of a session.
//!
//! The renderer draws two layers: a base layer with one outline per grid
//! position, and a game layer with one tile per filled cell, keyed and
//! ordered most-recent-first so new tiles can be told apart from ones that
//! stayed in place.

use hexmerge_engine::{Cell, FilledKey};
use hexmerge_topology::{HexLayout, Point};
use serde::Serialize;

use crate::session::{GameSession, GameStatus};

/// Which layer a cell is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Base,
    Game,
}

/// One positioned hexagon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    /// Filled-index key; absent on the base layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<FilledKey>,
    #[serde(flatten)]
    pub cell: Cell,
    /// Offset of the hexagon's bounding box.
    pub left: f64,
    pub top: f64,
    /// SVG path of the hexagon outline, relative to `left`/`top`.
    pub points: String,
    pub kind: CellKind,
}

impl CellView {
    fn place(layout: &HexLayout, outline: &str, cell: Cell, key: Option<FilledKey>) -> Self {
        let Point { x: left, y: top } = layout.position(cell.coord);
        Self {
            key,
            cell,
            left,
            top,
            points: outline.to_string(),
            kind: if key.is_some() {
                CellKind::Game
            } else {
                CellKind::Base
            },
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub game: u64,
    pub radius: u32,
    pub status: GameStatus,
    pub in_flight: bool,
    /// Width and height of one hexagon.
    pub hex_size: Point,
    /// Every grid position, in grid order.
    pub base: Vec<CellView>,
    /// Filled cells, most recent first.
    pub tiles: Vec<CellView>,
}

impl BoardView {
    pub fn capture(session: &GameSession) -> Self {
        let layout = session.layout();
        let outline = layout.outline_path();
        let board = session.board();

        let base = board
            .cells()
            .iter()
            .map(|&cell| CellView::place(layout, &outline, Cell::empty(cell.coord), None))
            .collect();
        let tiles = board
            .filled()
            .iter()
            .map(|&(key, cell)| CellView::place(layout, &outline, cell, Some(key)))
            .collect();

        Self {
            game: session.game(),
            radius: session.radius(),
            status: session.status(),
            in_flight: session.is_in_flight(),
            hex_size: layout.hex_size(),
            base,
            tiles,
        }
    }
}

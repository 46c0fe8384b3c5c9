//! Game session state machine.
//!
//! A session owns the board and everything the surrounding application tracks
//! around it: the radius, whether the game is over, and whether a value
//! request is in flight. Talking to the value collaborator is split in two so
//! the caller can await the request without holding the session:
//!
//! 1. [`GameSession::begin_move`] (or [`begin_new_game`](GameSession::begin_new_game))
//!    updates the board and hands back a [`PendingAssignment`];
//! 2. the caller sends it to a [`ValueSource`](crate::ValueSource);
//! 3. [`GameSession::complete`] folds the answer in and re-evaluates liveness.
//!
//! While a request is in flight further moves are dropped.

use hexmerge_engine::{fold, is_active_game, play, Board, Cell, Direction};
use hexmerge_topology::HexLayout;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::{AssignError, Result, SessionError};

/// Whether moves are still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// A value request waiting to be sent to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAssignment {
    /// Game the request belongs to.
    pub game: u64,
    pub radius: u32,
    /// Filled cells of the board, most recent first.
    pub filled: Vec<Cell>,
}

/// What became of a move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveStart {
    /// The game is over or a value request is in flight.
    Dropped,
    /// The move left every cell as it was; nothing to request.
    Unchanged,
    /// The board changed and new values are needed.
    Pending(PendingAssignment),
}

/// One game on one board.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    game: u64,
    board: Board,
    status: GameStatus,
    in_flight: bool,
    layout: HexLayout,
}

impl GameSession {
    /// An idle session with an empty board of `radius`.
    pub fn new(radius: u32, config: GameConfig) -> Result<Self> {
        check_radius(radius, &config)?;
        Ok(Self {
            game: 0,
            board: Board::new(radius)?,
            status: GameStatus::Playing,
            in_flight: false,
            layout: HexLayout::fit_width(config.layout_width, radius),
            config,
        })
    }

    pub fn radius(&self) -> u32 {
        self.board.radius()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Identifier of the current game. Increases with every new game.
    pub fn game(&self) -> u64 {
        self.game
    }

    /// Start over on an empty board of the same radius.
    ///
    /// The returned request carries no filled cells; its answer seeds the board.
    pub fn begin_new_game(&mut self) -> Result<PendingAssignment> {
        self.restart(self.radius())
    }

    /// Start over on an empty board of `radius`.
    pub fn restart(&mut self, radius: u32) -> Result<PendingAssignment> {
        check_radius(radius, &self.config)?;
        self.board = Board::new(radius)?;
        self.layout = HexLayout::fit_width(self.config.layout_width, radius);
        self.game += 1;
        self.status = GameStatus::Playing;
        self.in_flight = true;
        info!(game = self.game, radius, "new game");
        Ok(self.pending())
    }

    /// Apply a move in `direction`.
    pub fn begin_move(&mut self, direction: Direction) -> MoveStart {
        if self.status != GameStatus::Playing || self.in_flight {
            debug!(%direction, status = ?self.status, in_flight = self.in_flight, "move dropped");
            return MoveStart::Dropped;
        }

        let result = play(direction, &self.board);
        self.board = result.board;
        if !result.changed {
            return MoveStart::Unchanged;
        }

        self.refresh_status();
        self.in_flight = true;
        MoveStart::Pending(self.pending())
    }

    /// Finish the value request for `pending`.
    ///
    /// On success the cells are folded into the board. On failure the board
    /// keeps its merged state without new values and the failure is returned.
    /// Either way liveness is re-evaluated. A request from a replaced game is
    /// ignored and reported as stale.
    pub fn complete(
        &mut self,
        pending: &PendingAssignment,
        outcome: std::result::Result<Vec<Cell>, AssignError>,
    ) -> Result<()> {
        if pending.game != self.game {
            return Err(SessionError::StaleAssignment {
                game: pending.game,
                current: self.game,
            });
        }
        self.in_flight = false;

        let folded = match outcome {
            Ok(cells) => fold(&cells, &self.board).map_err(SessionError::from),
            Err(e) => {
                warn!(game = self.game, error = %e, "value request failed");
                Err(SessionError::CollaboratorFailure(e))
            }
        };

        let result = folded.map(|board| self.board = board);
        self.refresh_status();
        result
    }

    fn pending(&self) -> PendingAssignment {
        PendingAssignment {
            game: self.game,
            radius: self.radius(),
            filled: self.board.filled_cells(),
        }
    }

    fn refresh_status(&mut self) {
        let status = if is_active_game(&self.board) {
            GameStatus::Playing
        } else {
            GameStatus::GameOver
        };
        if status == GameStatus::GameOver && self.status != status {
            info!(game = self.game, radius = self.radius(), total = self.board.total(), "game over");
        }
        self.status = status;
    }
}

fn check_radius(radius: u32, config: &GameConfig) -> Result<()> {
    if config.accepts(radius) {
        Ok(())
    } else {
        Err(SessionError::RadiusOutOfRange {
            radius,
            min: config.min_radius,
            max: config.max_radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexmerge_engine::{CubeCoord, EngineError};

    fn session(radius: u32) -> GameSession {
        GameSession::new(radius, GameConfig::default()).unwrap()
    }

    fn seeded(cells: &[(i32, i32, u32)]) -> GameSession {
        let mut session = session(2);
        let pending = session.begin_new_game().unwrap();
        let cells = cells
            .iter()
            .map(|&(x, y, v)| Cell::new(CubeCoord::new(x, y), v))
            .collect();
        session.complete(&pending, Ok(cells)).unwrap();
        session
    }

    fn failure() -> AssignError {
        AssignError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)
    }

    #[test]
    fn radius_bounds() {
        assert!(matches!(
            GameSession::new(1, GameConfig::default()),
            Err(SessionError::RadiusOutOfRange { radius: 1, .. })
        ));
        assert!(GameSession::new(20, GameConfig::default()).is_ok());
    }

    #[test]
    fn new_game_requests_with_no_filled_cells() {
        let mut session = session(3);
        let pending = session.begin_new_game().unwrap();
        assert_eq!(pending.radius, 3);
        assert!(pending.filled.is_empty());
        assert!(session.is_in_flight());
    }

    #[test]
    fn moves_are_dropped_while_in_flight() {
        let mut session = session(2);
        session.begin_new_game().unwrap();
        assert_eq!(session.begin_move(Direction::North), MoveStart::Dropped);
    }

    #[test]
    fn changing_move_requests_values() {
        let mut session = seeded(&[(0, 0, 2), (1, -1, 2)]);
        match session.begin_move(Direction::SouthEast) {
            MoveStart::Pending(pending) => {
                assert_eq!(pending.filled, vec![Cell::new(CubeCoord::new(1, -1), 4)]);
            }
            other => panic!("expected a pending request, got {:?}", other),
        }
        assert!(session.is_in_flight());
        assert_eq!(session.board().value_at(CubeCoord::new(1, -1)), Some(4));
    }

    #[test]
    fn unchanged_move_sends_nothing() {
        let mut session = seeded(&[(0, 1, 2)]);
        assert_eq!(session.begin_move(Direction::North), MoveStart::Unchanged);
        assert!(!session.is_in_flight());
    }

    #[test]
    fn failed_request_keeps_merged_board() {
        let mut session = seeded(&[(0, 0, 2), (1, -1, 2)]);
        let MoveStart::Pending(pending) = session.begin_move(Direction::SouthEast) else {
            panic!("expected a pending request");
        };

        let err = session.complete(&pending, Err(failure())).unwrap_err();
        assert!(matches!(err, SessionError::CollaboratorFailure(_)));
        assert!(!session.is_in_flight());
        assert_eq!(session.board().filled_count(), 1);
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn fold_error_surfaces_and_unblocks() {
        let mut session = session(2);
        let pending = session.begin_new_game().unwrap();
        let err = session
            .complete(&pending, Ok(vec![Cell::new(CubeCoord::new(5, -5), 2)]))
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Engine(EngineError::UnknownCoordinate(_))
        ));
        assert!(!session.is_in_flight());
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn stale_answer_is_ignored() {
        let mut session = session(2);
        let old = session.begin_new_game().unwrap();
        let current = session.restart(3).unwrap();

        let err = session
            .complete(&old, Ok(vec![Cell::new(CubeCoord::ORIGIN, 2)]))
            .unwrap_err();
        assert!(matches!(err, SessionError::StaleAssignment { .. }));
        assert!(session.is_in_flight());
        assert_eq!(session.board().filled_count(), 0);

        session.complete(&current, Ok(vec![])).unwrap();
        assert!(!session.is_in_flight());
        assert_eq!(session.radius(), 3);
    }

    #[test]
    fn packed_board_ends_the_game() {
        let mut session = session(2);
        let pending = session.begin_new_game().unwrap();
        let cells = vec![
            Cell::new(CubeCoord::ORIGIN, 2),
            Cell::new(CubeCoord::new(1, -1), 4),
            Cell::new(CubeCoord::new(1, 0), 8),
            Cell::new(CubeCoord::new(0, 1), 4),
            Cell::new(CubeCoord::new(-1, 1), 8),
            Cell::new(CubeCoord::new(-1, 0), 4),
            Cell::new(CubeCoord::new(0, -1), 8),
        ];
        session.complete(&pending, Ok(cells)).unwrap();

        assert_eq!(session.status(), GameStatus::GameOver);
        assert_eq!(session.begin_move(Direction::North), MoveStart::Dropped);
    }

    #[test]
    fn restart_changes_radius_and_layout() {
        let mut session = session(2);
        let pending = session.restart(5).unwrap();
        assert_eq!(pending.radius, 5);
        assert_eq!(session.board().cells().len(), 61);
        assert_eq!(session.layout().grid_radius(), 5);
        assert!(matches!(
            session.restart(21),
            Err(SessionError::RadiusOutOfRange { .. })
        ));
        assert_eq!(session.radius(), 5);
    }
}

//! Hexmerge Server
//!
//! Game sessions, value assignment and an HTTP/WebSocket API around the
//! hexmerge engine.
//!
//! # Architecture
//!
//! - **Session**: Owns the board, the game status and the in-flight flag
//! - **Assign**: Asks a remote value server, or a local assigner, for new cells
//! - **View**: Positions every cell for a renderer
//! - **REST API / WebSocket**: Start games, play moves, fetch views
//!
//! # Usage
//!
//! ```ignore
//! let config = VisConfig::from_env()?;
//! let session = GameSession::new(config.radius, config.game)?;
//! let source = ValueSource::from_config(&config)?;
//!
//! let server = VisServer::new(session, source, LocalAssigner::new(config.seed));
//! server.new_game(None).await?;
//! server.serve(config.api_addr).await?;
//! ```

mod assign;
mod config;
mod error;
mod server;
mod session;
mod view;

pub use assign::{LocalAssigner, RemoteAssigner, ValueSource};
pub use config::{GameConfig, VisConfig};
pub use error::{AssignError, ConfigError, Result, SessionError};
pub use server::VisServer;
pub use session::{GameSession, GameStatus, MoveStart, PendingAssignment};
pub use view::{BoardView, CellKind, CellView};

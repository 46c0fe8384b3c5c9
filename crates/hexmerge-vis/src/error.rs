//! Error types for hexmerge-vis.

use axum::http::StatusCode;
use hexmerge_engine::EngineError;
use thiserror::Error;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Failure of a value request to the assignment collaborator.
#[derive(Debug, Error)]
pub enum AssignError {
    /// The request could not be sent, timed out, or the body did not decode.
    #[error("value request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The value server answered with a non-success status.
    #[error("value server answered {0}")]
    Status(reqwest::StatusCode),
}

/// Errors surfaced by a game session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The engine rejected a board or the collaborator's cells.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// The value request failed; the merged board was kept without new values.
    #[error("collaborator failure: {0}")]
    CollaboratorFailure(#[from] AssignError),

    /// A radius outside the configured bounds.
    #[error("radius {radius} is outside [{min}, {max}]")]
    RadiusOutOfRange { radius: u32, min: u32, max: u32 },

    /// The completed request belongs to a game that has since been replaced.
    #[error("value request for game {game} arrived after game {current} started")]
    StaleAssignment { game: u64, current: u64 },

    /// A move arrived while the game is over or a value request is in flight.
    #[error("move dropped")]
    MoveDropped,

    /// The task settling a value request panicked or was aborted.
    #[error("value task failed: {0}")]
    TaskFailed(String),
}

impl SessionError {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SessionError::RadiusOutOfRange { .. }
            | SessionError::Engine(EngineError::InvalidRadius(_)) => StatusCode::BAD_REQUEST,
            SessionError::MoveDropped | SessionError::StaleAssignment { .. } => {
                StatusCode::CONFLICT
            }
            SessionError::CollaboratorFailure(_) => StatusCode::BAD_GATEWAY,
            SessionError::Engine(_) | SessionError::TaskFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Values parsed but do not fit together.
    #[error("configuration error: {0}")]
    Validation(String),
}

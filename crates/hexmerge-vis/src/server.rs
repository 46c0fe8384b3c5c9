//! Axum web server with a WebSocket game channel.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use hexmerge_engine::{Cell, Direction};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::assign::{LocalAssigner, ValueSource};
use crate::error::SessionError;
use crate::session::{GameSession, GameStatus, MoveStart, PendingAssignment};
use crate::view::BoardView;

/// Shared application state.
pub struct AppState {
    session: RwLock<GameSession>,
    source: ValueSource,
    /// Answers `/api/values`, independent of `source`.
    assigner: LocalAssigner,
}

/// Game server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server around a session and its value source.
    pub fn new(session: GameSession, source: ValueSource, assigner: LocalAssigner) -> Self {
        Self {
            state: Arc::new(AppState {
                session: RwLock::new(session),
                source,
                assigner,
            }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/board", get(board_handler))
            .route("/api/new", post(new_game_handler))
            .route("/api/move", post(move_handler))
            .route("/api/values/{radius}", post(values_handler))
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Start a game, optionally at a new radius, and wait for its first values.
    pub async fn new_game(&self, radius: Option<u32>) -> Result<BoardView, SessionError> {
        start_game(&self.state, radius).await
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: SocketAddr) -> Result<(), std::io::Error> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("hexmerge server running on http://{}", addr);
        axum::serve(listener, self.router()).await
    }
}

/// Send `pending` to the value source and fold the answer in.
///
/// The request and the fold run on their own task, so a caller that goes
/// away mid-request cannot leave the session in flight. The session lock is
/// released while the request is out.
async fn settle(
    state: &Arc<AppState>,
    pending: PendingAssignment,
) -> Result<BoardView, SessionError> {
    let state = Arc::clone(state);
    let task = tokio::spawn(async move {
        let outcome = state.source.assign(pending.radius, &pending.filled).await;

        let mut session = state.session.write().await;
        session.complete(&pending, outcome)?;
        Ok::<_, SessionError>(BoardView::capture(&session))
    });

    task.await
        .map_err(|e| SessionError::TaskFailed(e.to_string()))?
}

async fn start_game(state: &Arc<AppState>, radius: Option<u32>) -> Result<BoardView, SessionError> {
    let pending = {
        let mut session = state.session.write().await;
        match radius {
            Some(radius) => session.restart(radius)?,
            None => session.begin_new_game()?,
        }
    };
    settle(state, pending).await
}

async fn make_move(state: &Arc<AppState>, direction: Direction) -> Result<MoveResponse, SessionError> {
    let started = {
        let mut session = state.session.write().await;
        let started = session.begin_move(direction);
        if let MoveStart::Unchanged = started {
            return Ok(MoveResponse {
                changed: false,
                board: BoardView::capture(&session),
            });
        }
        started
    };

    match started {
        MoveStart::Pending(pending) => Ok(MoveResponse {
            changed: true,
            board: settle(state, pending).await?,
        }),
        _ => {
            warn!(%direction, "move dropped");
            Err(SessionError::MoveDropped)
        }
    }
}

fn reject(err: SessionError) -> (StatusCode, String) {
    let status = err.status_code();
    if status.is_server_error() {
        warn!(error = %err, "request failed");
    } else {
        debug!(error = %err, "request rejected");
    }
    (status, err.to_string())
}

/// Server status response.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    game: u64,
    radius: u32,
    game_status: GameStatus,
    in_flight: bool,
    filled: usize,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let session = state.session.read().await;
    Json(StatusResponse {
        status: "ok",
        game: session.game(),
        radius: session.radius(),
        game_status: session.status(),
        in_flight: session.is_in_flight(),
        filled: session.board().filled_count(),
    })
}

async fn board_handler(State(state): State<Arc<AppState>>) -> Json<BoardView> {
    let session = state.session.read().await;
    Json(BoardView::capture(&session))
}

#[derive(Deserialize)]
struct NewGameRequest {
    radius: Option<u32>,
}

async fn new_game_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewGameRequest>,
) -> Result<Json<BoardView>, (StatusCode, String)> {
    start_game(&state, req.radius).await.map(Json).map_err(reject)
}

#[derive(Deserialize)]
struct MoveRequest {
    direction: Direction,
}

#[derive(Serialize)]
struct MoveResponse {
    changed: bool,
    board: BoardView,
}

async fn move_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, (StatusCode, String)> {
    make_move(&state, req.direction).await.map(Json).map_err(reject)
}

async fn values_handler(
    State(state): State<Arc<AppState>>,
    Path(radius): Path<u32>,
    Json(filled): Json<Vec<Cell>>,
) -> Result<Json<Vec<Cell>>, (StatusCode, String)> {
    let config = *state.session.read().await.config();
    if !config.accepts(radius) {
        return Err(reject(SessionError::RadiusOutOfRange {
            radius,
            min: config.min_radius,
            max: config.max_radius,
        }));
    }
    Ok(Json(state.assigner.assign(radius, &filled)))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    // Send the current board first
    let initial = {
        let session = state.session.read().await;
        WsResponse::Board(BoardView::capture(&session))
    };
    if send(&mut socket, &initial).await.is_err() {
        return;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let Some(cmd) = WsCommand::parse(text.as_str()) else {
                    debug!(input = %text.as_str(), "ignoring unbound input");
                    continue;
                };
                let response = handle_ws_command(&state, cmd).await;
                if send(&mut socket, &response).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

async fn send(socket: &mut WebSocket, response: &WsResponse) -> Result<(), axum::Error> {
    match serde_json::to_string(response) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(e) => {
            warn!(error = %e, "failed to encode response");
            Ok(())
        }
    }
}

/// Input accepted on the WebSocket: a direction key, `new`, `new:<radius>`
/// or `board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WsCommand {
    Move(Direction),
    NewGame(Option<u32>),
    GetBoard,
}

impl WsCommand {
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        match input {
            "board" => Some(Self::GetBoard),
            "new" => Some(Self::NewGame(None)),
            _ => match input.strip_prefix("new:") {
                Some(radius) => radius.trim().parse().ok().map(|r| Self::NewGame(Some(r))),
                None => input.parse().ok().map(Self::Move),
            },
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum WsResponse {
    #[serde(rename = "board")]
    Board(BoardView),
    #[serde(rename = "move")]
    Move(MoveResponse),
    #[serde(rename = "error")]
    Error { code: u16, message: String },
}

impl From<SessionError> for WsResponse {
    fn from(err: SessionError) -> Self {
        let (status, message) = reject(err);
        WsResponse::Error {
            code: status.as_u16(),
            message,
        }
    }
}

async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) -> WsResponse {
    match cmd {
        WsCommand::GetBoard => {
            let session = state.session.read().await;
            WsResponse::Board(BoardView::capture(&session))
        }
        WsCommand::NewGame(radius) => match start_game(state, radius).await {
            Ok(view) => WsResponse::Board(view),
            Err(e) => e.into(),
        },
        WsCommand::Move(direction) => match make_move(state, direction).await {
            Ok(response) => WsResponse::Move(response),
            Err(e) => e.into(),
        },
    }
}

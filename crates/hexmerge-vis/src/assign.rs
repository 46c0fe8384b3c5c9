//! Value assignment.
//!
//! The engine never invents values. After every changing move the session asks
//! a collaborator for new cells, sending the radius and the filled cells and
//! getting back a list of `{x, y, z, value}` objects to fold into the board.
//! The collaborator is either a remote value server or an in-process assigner.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use hexmerge_engine::{Cell, CubeCoord};
use hexmerge_topology::hexagon;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::config::VisConfig;
use crate::error::AssignError;

/// Where new values come from.
#[derive(Debug)]
pub enum ValueSource {
    Remote(RemoteAssigner),
    Local(LocalAssigner),
}

impl ValueSource {
    /// Remote when a value server URL is configured, local otherwise.
    pub fn from_config(config: &VisConfig) -> Result<Self, AssignError> {
        match &config.value_server_url {
            Some(url) => Ok(Self::Remote(RemoteAssigner::new(
                url.clone(),
                config.request_timeout,
            )?)),
            None => Ok(Self::Local(LocalAssigner::new(config.seed))),
        }
    }

    /// Ask for the cells to add to a board of `radius` holding `filled`.
    pub async fn assign(&self, radius: u32, filled: &[Cell]) -> Result<Vec<Cell>, AssignError> {
        match self {
            Self::Remote(remote) => remote.assign(radius, filled).await,
            Self::Local(local) => Ok(local.assign(radius, filled)),
        }
    }
}

/// JSON client for a remote value server.
///
/// Requests are `POST {base_url}/{radius}` with the filled cells as the body.
#[derive(Debug, Clone)]
pub struct RemoteAssigner {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteAssigner {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AssignError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, filled), fields(base_url = %self.base_url, filled = filled.len()))]
    pub async fn assign(&self, radius: u32, filled: &[Cell]) -> Result<Vec<Cell>, AssignError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), radius);

        let response = self.client.post(&url).json(filled).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssignError::Status(status));
        }

        let cells: Vec<Cell> = response.json().await?;
        debug!(assigned = cells.len(), "value server answered");
        Ok(cells)
    }
}

/// In-process assigner.
///
/// Places values on random empty positions: [`INITIAL_CELLS`](Self::INITIAL_CELLS)
/// for an empty board, [`CELLS_PER_MOVE`](Self::CELLS_PER_MOVE) otherwise. Each
/// value is 2, or 4 with probability [`FOUR_PROBABILITY`](Self::FOUR_PROBABILITY).
#[derive(Debug)]
pub struct LocalAssigner {
    rng: Mutex<StdRng>,
}

impl LocalAssigner {
    pub const INITIAL_CELLS: usize = 3;
    pub const CELLS_PER_MOVE: usize = 1;
    pub const FOUR_PROBABILITY: f64 = 0.1;

    /// Seeded assigner, or one seeded from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Cells to add to a board of `radius` whose filled cells are `filled`.
    ///
    /// Never returns an occupied position; returns nothing when the board is
    /// full or `radius` is zero.
    pub fn assign(&self, radius: u32, filled: &[Cell]) -> Vec<Cell> {
        let Ok(grid) = hexagon(radius) else {
            return Vec::new();
        };

        let occupied: HashSet<CubeCoord> = filled
            .iter()
            .filter(|cell| cell.is_filled())
            .map(|cell| cell.coord)
            .collect();
        let mut empty: Vec<CubeCoord> = grid
            .into_iter()
            .filter(|coord| !occupied.contains(coord))
            .collect();

        let wanted = if occupied.is_empty() {
            Self::INITIAL_CELLS
        } else {
            Self::CELLS_PER_MOVE
        };
        let count = wanted.min(empty.len());

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let (chosen, _) = empty.partial_shuffle(&mut *rng, count);
        let chosen = chosen.to_vec();

        chosen
            .into_iter()
            .map(|coord| {
                let value = if rng.gen_bool(Self::FOUR_PROBABILITY) { 4 } else { 2 };
                Cell::new(coord, value)
            })
            .collect()
    }
}

//! Runtime configuration from environment variables.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Board bounds shared by every session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Smallest radius a new game may use.
    pub min_radius: u32,
    /// Largest radius a new game may use.
    pub max_radius: u32,
    /// Pixel width the board layout is fitted to.
    pub layout_width: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_radius: 2,
            max_radius: 20,
            layout_width: 650.0,
        }
    }
}

impl GameConfig {
    /// Whether a game of `radius` may be started.
    pub fn accepts(&self, radius: u32) -> bool {
        (self.min_radius..=self.max_radius).contains(&radius)
    }
}

/// Configuration for the hexmerge-vis server.
#[derive(Debug, Clone)]
pub struct VisConfig {
    /// Address for the HTTP API.
    pub api_addr: SocketAddr,
    /// Radius of the first game.
    pub radius: u32,
    pub game: GameConfig,
    /// Base URL of the remote value server. Values are assigned locally when unset.
    pub value_server_url: Option<String>,
    /// Timeout for one remote value request.
    pub request_timeout: Duration,
    /// Seed for the local assigner. Entropy when unset.
    pub seed: Option<u64>,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            api_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            radius: 2,
            game: GameConfig::default(),
            value_server_url: None,
            request_timeout: Duration::from_millis(5000),
            seed: None,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            api_addr: parse_var(&lookup, "HEXMERGE_API_ADDR", defaults.api_addr)?,
            radius: parse_var(&lookup, "HEXMERGE_RADIUS", defaults.radius)?,
            game: GameConfig {
                min_radius: parse_var(&lookup, "HEXMERGE_MIN_RADIUS", defaults.game.min_radius)?,
                max_radius: parse_var(&lookup, "HEXMERGE_MAX_RADIUS", defaults.game.max_radius)?,
                layout_width: parse_var(
                    &lookup,
                    "HEXMERGE_LAYOUT_WIDTH",
                    defaults.game.layout_width,
                )?,
            },
            value_server_url: lookup("HEXMERGE_VALUE_SERVER_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            request_timeout: Duration::from_millis(parse_var(
                &lookup,
                "HEXMERGE_REQUEST_TIMEOUT_MS",
                5000u64,
            )?),
            seed: lookup("HEXMERGE_SEED")
                .map(|raw| parse_value("HEXMERGE_SEED", raw))
                .transpose()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the values fit together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.min_radius < 1 {
            return Err(ConfigError::Validation(
                "minimum radius must be at least 1".to_string(),
            ));
        }
        if self.game.min_radius > self.game.max_radius {
            return Err(ConfigError::Validation(format!(
                "minimum radius {} exceeds maximum radius {}",
                self.game.min_radius, self.game.max_radius
            )));
        }
        if self.game.max_radius > hexmerge_topology::MAX_RADIUS {
            return Err(ConfigError::Validation(format!(
                "maximum radius {} exceeds the grid limit {}",
                self.game.max_radius,
                hexmerge_topology::MAX_RADIUS
            )));
        }
        if !self.game.accepts(self.radius) {
            return Err(ConfigError::Validation(format!(
                "initial radius {} is outside [{}, {}]",
                self.radius, self.game.min_radius, self.game.max_radius
            )));
        }
        if !(self.game.layout_width.is_finite() && self.game.layout_width > 0.0) {
            return Err(ConfigError::Validation(
                "layout width must be a positive number".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "request timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => parse_value(key, raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let parsed = raw.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value: raw,
    })
}

//! Session configuration and construction errors.

use grid_defence_core::{ConfigError, PathError};
use serde::Deserialize;
use thiserror::Error;

/// Tunables that shape the waves of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Monsters in wave 1; wave `n` holds `n` times as many.
    pub base_wave_size: u32,
    /// Ticks between spawns in wave 1; wave `n` waits `1/n` as long, at least one tick.
    pub base_spawn_interval_ticks: u32,
    /// Seed driving the monster roster.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_wave_size: 10,
            base_spawn_interval_ticks: 32,
            seed: 0,
        }
    }
}

/// Errors raised while building a session or swapping its grid.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The supplied grid cannot host a game.
    #[error("invalid grid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The world refused the computed path.
    #[error("path rejected: {0}")]
    Path(#[from] PathError),
}

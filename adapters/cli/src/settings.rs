//! Optional TOML configuration for the headless driver.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use grid_defence_session::Config as SessionConfig;
use serde::Deserialize;

/// Contents of the configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Wave shape and seed forwarded to the session.
    pub(crate) session: SessionConfig,
    /// Cadence and stop conditions of the driver loop.
    pub(crate) driver: DriverSettings,
}

/// Driver loop tunables.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DriverSettings {
    /// Ticks per second; zero runs unthrottled.
    pub(crate) fps: f64,
    /// Ticks after which the driver stops.
    pub(crate) max_ticks: u64,
    /// Whether a cleared wave immediately starts the next one.
    pub(crate) auto_level_up: bool,
    /// Gold available before the first kill.
    pub(crate) starting_gold: u32,
    /// Monsters that may escape before the game is lost.
    pub(crate) starting_lives: u32,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            fps: 16.0,
            max_ticks: 10_000,
            auto_level_up: true,
            starting_gold: 100,
            starting_lives: 20,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid config toml")
    }
}

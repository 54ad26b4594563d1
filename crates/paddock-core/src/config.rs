//! Application configuration management.
//!
//! This module handles loading and saving the configuration, which covers
//! the supported season range, concurrency limits, the results cache lifetime
//! and the results site location.
//!
//! Configuration is stored at `~/.config/paddock/config.json`. A missing file
//! means defaults; `PADDOCK_*` environment variables override file values.

use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::DEFAULT_BASE_URL;

/// Application name used for the config directory path
const APP_NAME: &str = "paddock";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// First season with sprint races
pub const SPRINTS_INTRODUCED: u16 = 2021;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// First supported season (inclusive)
    pub first_year: u16,
    /// Last supported season (inclusive)
    pub last_year: u16,
    /// Seasons computed at the same time
    pub max_concurrent_seasons: usize,
    /// Event pages fetched at the same time within one season.
    /// Results are always filed in schedule order.
    pub event_fetch_concurrency: usize,
    /// Upper bound on one season's computation
    pub season_timeout_secs: u64,
    /// Lifetime of a computed multi-season result
    pub cache_ttl_minutes: i64,
    /// First season whose weekends may include a short-format race
    pub secondary_events_from: u16,
    pub base_url: String,
    /// Fail the whole season when one event's results cannot be fetched,
    /// instead of counting that event as empty
    pub abort_on_event_failure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_year: 2000,
            last_year: 2025,
            max_concurrent_seasons: 25,
            event_fetch_concurrency: 1,
            season_timeout_secs: 300,
            cache_ttl_minutes: 12 * 60,
            secondary_events_from: SPRINTS_INTRODUCED,
            base_url: DEFAULT_BASE_URL.to_string(),
            abort_on_event_failure: false,
        }
    }
}

impl Config {
    /// Load the config file (or defaults) and apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PADDOCK_BASE_URL") {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        if let Ok(year) = std::env::var("PADDOCK_LAST_YEAR") {
            match year.trim().parse() {
                Ok(year) => self.last_year = year,
                Err(_) => warn!(value = %year, "Ignoring invalid PADDOCK_LAST_YEAR"),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_year > self.last_year {
            bail!(
                "first_year ({}) is after last_year ({})",
                self.first_year,
                self.last_year
            );
        }
        if self.max_concurrent_seasons == 0 || self.event_fetch_concurrency == 0 {
            bail!("concurrency limits must be at least 1");
        }
        if self.season_timeout_secs == 0 {
            bail!("season_timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Every supported season, oldest first
    pub fn years(&self) -> Vec<u16> {
        (self.first_year..=self.last_year).collect()
    }
}

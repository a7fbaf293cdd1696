//! Engine configuration, stored as RON.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Delays used by the paced runner between narration lines. They never affect the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub action_delay_ms: u64,
    pub faint_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            action_delay_ms: 500,
            faint_delay_ms: 1000,
        }
    }
}

impl PacingConfig {
    /// No delays at all, for tests and non-interactive runs.
    pub fn instant() -> Self {
        Self {
            action_delay_ms: 0,
            faint_delay_ms: 0,
        }
    }

    pub fn action_delay(&self) -> Duration {
        Duration::from_millis(self.action_delay_ms)
    }

    pub fn faint_delay(&self) -> Duration {
        Duration::from_millis(self.faint_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many narration lines the rolling battle log keeps.
    pub log_capacity: usize,
    /// How many rentals the daily challenge offers.
    pub rental_pool_size: usize,
    pub pacing: PacingConfig,
    /// External dataset (JSON or RON). The bundled dataset is used when absent.
    pub dataset_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_capacity: 5,
            rental_pool_size: 6,
            pacing: PacingConfig::default(),
            dataset_path: None,
        }
    }
}

impl EngineConfig {
    /// Load the config from a RON file, or return the defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_ron_str(&contents)?;
        info!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

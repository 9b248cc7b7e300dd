//! Configuration file loading.
//!
//! The configuration lives in `~/.config/prepsets/config.toml`. Every field
//! is optional:
//!
//! ```toml
//! max_sets = 6
//! page_size = 5
//! min_load_delay_ms = 800
//! page_transition_ms = 500
//! sets_dir = "/home/me/interview/sets"
//! state_file = "/home/me/.config/prepsets/state.json"
//! ```

use prepsets_core::error::{PrepError, Result};
use prepsets_core::session::SessionSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::paths::PrepPaths;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub max_sets: u32,
    pub page_size: usize,
    pub min_load_delay_ms: u64,
    pub page_transition_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = SessionSettings::default();
        Self {
            max_sets: settings.max_topics,
            page_size: settings.page_size,
            min_load_delay_ms: settings.min_load_delay.as_millis() as u64,
            page_transition_ms: settings.page_transition_delay.as_millis() as u64,
            sets_dir: None,
            state_file: None,
        }
    }
}

impl AppConfig {
    /// Runtime settings for the session controller.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            max_topics: self.max_sets,
            page_size: self.page_size.max(1),
            min_load_delay: Duration::from_millis(self.min_load_delay_ms),
            page_transition_delay: Duration::from_millis(self.page_transition_ms),
        }
    }

    /// Directory holding `set{id}.json`, falling back to the platform data dir.
    pub fn resolve_sets_dir(&self) -> Result<PathBuf> {
        match &self.sets_dir {
            Some(dir) => Ok(dir.clone()),
            None => PrepPaths::sets_dir().map_err(|e| PrepError::config(e.to_string())),
        }
    }

    /// State file path, falling back to the platform config dir.
    pub fn resolve_state_file(&self) -> Result<PathBuf> {
        match &self.state_file {
            Some(path) => Ok(path.clone()),
            None => PrepPaths::state_file().map_err(|e| PrepError::config(e.to_string())),
        }
    }
}

/// Loads [`AppConfig`] from TOML.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the platform config file location.
    pub fn new() -> Result<Self> {
        let path = PrepPaths::config_file().map_err(|e| PrepError::config(e.to_string()))?;
        Ok(Self { path })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration.
    ///
    /// A missing or blank file yields the defaults. A file that is not valid
    /// TOML for [`AppConfig`] is a `Config` error.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", self.path);
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        toml::from_str(&content)
            .map_err(|e| PrepError::config(format!("{}: {}", self.path.display(), e)))
    }
}

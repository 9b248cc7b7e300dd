//! Platform paths for prepsets configuration, state and topic sets.
//!
//! ```text
//! ~/.config/prepsets/          # Config directory
//! ├── config.toml              # Application configuration
//! └── state.json               # Persisted session state (key-value)
//!
//! ~/.local/share/prepsets/     # Data directory
//! └── sets/                    # Topic sets: set1.json, set2.json, ...
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "prepsets";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
    /// Platform data directory could not be determined.
    DataDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
            PathError::DataDirNotFound => write!(f, "Cannot find data directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for prepsets.
pub struct PrepPaths;

impl PrepPaths {
    /// Returns the prepsets configuration directory (e.g. `~/.config/prepsets/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the prepsets data directory (e.g. `~/.local/share/prepsets/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::DataDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session state.
    pub fn state_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("state.json"))
    }

    /// Returns the default directory holding `set{id}.json` files.
    pub fn sets_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("sets"))
    }
}

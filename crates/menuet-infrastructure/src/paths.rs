//! Platform path resolution for Menuet's persisted state.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Menuet.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/menuet/            # Config directory (platform equivalent)
/// └── store.toml               # The whole key-value store, one TOML table
/// ```
pub struct MenuetPaths;

impl MenuetPaths {
    /// Returns the Menuet configuration directory
    /// (e.g. `~/.config/menuet/` on Linux).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("menuet"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path of the key-value store file.
    pub fn store_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("store.toml"))
    }
}

//! Unified path management for lookbook's on-disk state.
//!
//! All lookbook configuration and cache files live under platform-standard
//! directories resolved via the `dirs` crate, so locations are consistent
//! across Linux, macOS and Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for lookbook.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/lookbook/          # Config directory
/// └── config.toml              # Remote API configuration
///
/// ~/.local/share/lookbook/     # Data directory
/// └── cache/                   # Session mirror (one file per storage key)
///     ├── sessionId
///     └── sessionData
/// ```
pub struct LookbookPaths;

impl LookbookPaths {
    /// Returns the lookbook configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/lookbook/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("lookbook"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the lookbook session cache directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to cache directory (e.g., `~/.local/share/lookbook/cache/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn cache_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join("lookbook").join("cache"))
            .ok_or(PathError::HomeDirNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_under_config_root() {
        let dir = LookbookPaths::cache_dir().unwrap();
        assert!(dir.ends_with("lookbook/cache"));
    }

    #[test]
    fn test_config_file_name() {
        let file = LookbookPaths::config_file().unwrap();
        assert_eq!(file.file_name().unwrap(), "config.toml");
    }
}

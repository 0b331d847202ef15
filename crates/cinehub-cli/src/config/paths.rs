//! Config and log directory resolution.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise returns `~/.config/cinehub/config.toml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("cinehub")
        .join("config.toml"))
}

/// Resolves the directory the TUI writes its log file to.
///
/// - If `dir` is `Some`, returns `{dir}/logs`.
/// - Otherwise returns `~/.local/state/cinehub/logs`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_log_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("logs"));
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("state")
        .join("cinehub")
        .join("logs"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/cinehub-test");

        // Act
        let config = resolve_config_path(Some(&dir)).unwrap();
        let logs = resolve_log_dir(Some(&dir)).unwrap();

        // Assert
        assert_eq!(config, PathBuf::from("/tmp/cinehub-test/config.toml"));
        assert_eq!(logs, PathBuf::from("/tmp/cinehub-test/logs"));
    }

    #[test]
    fn test_resolve_default() {
        // Arrange & Act
        let config = resolve_config_path(None).unwrap();
        let logs = resolve_log_dir(None).unwrap();

        // Assert
        assert!(config.ends_with(".config/cinehub/config.toml"));
        assert!(logs.ends_with(".local/state/cinehub/logs"));
    }
}

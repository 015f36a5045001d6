//! Workspace configuration
//!
//! Configuration is stored in `.tether/config.toml`. The only setting
//! today is the default location of the status snapshot consumed by
//! `tether blocked`; the snapshot is how the external task store's
//! status lookup reaches this tool.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Workspace configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default path of the status snapshot file, relative to the
    /// workspace root unless absolute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration for a workspace, falling back to
    /// defaults when no config file exists
    pub fn for_workspace(workspace_root: &Path) -> Result<Self> {
        let config_path = Self::path(workspace_root);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))
    }

    /// Writes the configuration to the workspace
    pub fn save(&self, workspace_root: &Path) -> Result<()> {
        let config_path = Self::path(workspace_root);

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

        Ok(())
    }

    /// Resolves the status snapshot path against the workspace root
    pub fn statuses_path(&self, workspace_root: &Path) -> Option<PathBuf> {
        self.statuses.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                workspace_root.join(p)
            }
        })
    }

    fn path(workspace_root: &Path) -> PathBuf {
        workspace_root.join(".tether").join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".tether")).unwrap();

        let config = Config::for_workspace(dir.path()).unwrap();
        assert!(config.statuses.is_none());
    }

    #[test]
    fn save_and_reload() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".tether")).unwrap();

        let config = Config {
            statuses: Some(PathBuf::from("statuses.json")),
        };
        config.save(dir.path()).unwrap();

        let loaded = Config::for_workspace(dir.path()).unwrap();
        assert_eq!(loaded.statuses, Some(PathBuf::from("statuses.json")));
    }

    #[test]
    fn relative_statuses_resolve_against_root() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            statuses: Some(PathBuf::from("statuses.json")),
        };

        assert_eq!(
            config.statuses_path(dir.path()),
            Some(dir.path().join("statuses.json"))
        );
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".tether")).unwrap();
        fs::write(dir.path().join(".tether").join("config.toml"), "statuses = [").unwrap();

        assert!(Config::for_workspace(dir.path()).is_err());
    }
}

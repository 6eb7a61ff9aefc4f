//! Application configuration loaded from TOML.

use crate::error::{AppError, Result};
use eduranker_client::ClientConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration for the terminal front end.
///
/// Every section falls back to its defaults when absent from the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ranking backend location and transport settings.
    pub backend: ClientConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Returns the default config file path: `<config dir>/eduranker/config.toml`.
    pub fn default_config_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("eduranker").join("config.toml"),
            None => PathBuf::from("/tmp/eduranker-config/config.toml"),
        }
    }

    /// Resolve the configuration for this run.
    ///
    /// An explicit `path` must exist. Without one, the default path is used
    /// if present, else built-in defaults. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be loaded or the resulting
    /// backend configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    tracing::debug!(path = %default_path.display(), "loading default config");
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.backend.validate()?;
        Ok(config)
    }
}

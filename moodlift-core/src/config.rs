//! Configuration for the MoodLift service.
//!
//! Loaded from `~/.moodlift/config.toml` when present, with environment
//! variables taking precedence:
//! - `DATABASE_URL`: Postgres connection string
//! - `MOODLIFT_ASSETS_ROOT`: root directory of the asset bucket
//! - `MOODLIFT_LOG_LEVEL`: default log filter when RUST_LOG is unset

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Default asset bucket location, relative to the working directory
const DEFAULT_ASSETS_ROOT: &str = "assets";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Postgres connection string
    pub database_url: Option<String>,

    /// Root directory for the asset bucket
    pub assets_root: Option<PathBuf>,

    /// Default log filter (overridden by RUST_LOG)
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Config file path: ~/.moodlift/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".moodlift/config.toml")
    }

    /// Load config from the default path, then apply environment overrides.
    ///
    /// A missing config file is not an error; env vars alone are enough to
    /// run the service.
    pub fn load() -> Result<Self> {
        let mut config = match Self::read_file(&Self::config_path())? {
            Some(cfg) => cfg,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Parse a config file if it exists
    fn read_file(path: &PathBuf) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|e| CoreError::InvalidConfig {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Some(config))
    }

    /// Environment variables win over file values
    fn apply_env(&mut self) {
        if let Ok(url) = env::var("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Ok(root) = env::var("MOODLIFT_ASSETS_ROOT") {
            self.assets_root = Some(PathBuf::from(root));
        }
        if let Ok(level) = env::var("MOODLIFT_LOG_LEVEL") {
            self.log_level = Some(level);
        }
    }

    /// Database URL, failing with an actionable message when unset
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url.as_deref().ok_or_else(|| {
            CoreError::config(
                "DATABASE_URL not set. Set it in the environment or in ~/.moodlift/config.toml",
            )
        })
    }

    /// Asset bucket root, falling back to ./assets
    pub fn assets_root(&self) -> PathBuf {
        self.assets_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_ROOT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_database_url_is_config_error() {
        let config = AppConfig::default();
        let err = config.require_database_url().unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }));
    }

    #[test]
    fn assets_root_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.assets_root(), PathBuf::from("assets"));
    }

    #[test]
    fn parses_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
database_url = "postgres://localhost/moodlift"
assets_root = "/var/lib/moodlift/assets"
"#,
        )
        .unwrap();

        let config = AppConfig::read_file(&path).unwrap().unwrap();
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/moodlift")
        );
        assert_eq!(
            config.assets_root(),
            PathBuf::from("/var/lib/moodlift/assets")
        );
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database_url = [not toml").unwrap();

        let err = AppConfig::read_file(&path).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig { .. }));
    }
}

/// User configuration
///
/// Read from `config.toml` in the platform config directory
/// (e.g. ~/.config/launch-deck/config.toml). Every key is optional.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the launches API
    pub api_base_url: String,
    /// Fallback `tracing` filter when LAUNCH_DECK_LOG is unset
    pub log_level: String,
    /// Where downsized card images are kept
    pub image_cache_dir: Option<PathBuf>,
    /// Favourites database location
    pub database_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            log_level: "info".to_string(),
            image_cache_dir: None,
            database_path: None,
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("launch-deck");
        path.push("config.toml");
        Some(path)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load the user's config, falling back to defaults on any error.
    /// Runs before logging is set up, so problems go to stderr.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("launch-deck: {err}; using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::parse(
            r#"
            api_base_url = "http://localhost:3000/v3"
            database_path = "/tmp/favourites.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:3000/v3");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/favourites.db")));
        assert_eq!(config.image_cache_dir, None);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::parse("api_base_url = ").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("launch-deck-no-such-dir/config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}

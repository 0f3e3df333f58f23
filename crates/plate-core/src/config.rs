//! Configuration management for plate.
//!
//! Loads configuration from ${PLATE_HOME}/config.toml with sensible defaults.
//! Connection settings can be overridden from the environment.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::account::appwrite::DEFAULT_ENDPOINT;

/// Env var overriding `endpoint`.
pub const ENDPOINT_ENV: &str = "PLATE_ENDPOINT";
/// Env var overriding `project`.
pub const PROJECT_ENV: &str = "PLATE_PROJECT";
/// Env var holding a full log filter directive.
pub const LOG_ENV: &str = "PLATE_LOG";

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for plate configuration and data directories.
    //!
    //! PLATE_HOME resolution order:
    //! 1. PLATE_HOME environment variable (if set)
    //! 2. ~/.config/plate (default)

    use std::path::PathBuf;

    /// Returns the plate home directory.
    ///
    /// Checks PLATE_HOME env var first, falls back to ~/.config/plate
    /// (or `.plate` in the working directory when there is no home).
    pub fn plate_home() -> PathBuf {
        if let Ok(home) = std::env::var("PLATE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".plate"),
            |h| h.join(".config").join("plate"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        plate_home().join("config.toml")
    }

    /// Returns the path to the stored session credential.
    pub fn session_path() -> PathBuf {
        plate_home().join("session.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        plate_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Appwrite API endpoint (including `/v1`)
    pub endpoint: String,

    /// Appwrite project id
    pub project: String,

    /// Timeout for account requests in seconds (0 disables)
    pub request_timeout_secs: u32,

    /// Log filter used when `PLATE_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project: String::new(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;
    const DEFAULT_LOG_LEVEL: &str = "info";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Endpoint with precedence: env > config > default.
    ///
    /// # Errors
    /// Returns an error if the resolved endpoint is not a valid URL.
    pub fn effective_endpoint(&self) -> Result<String> {
        let endpoint = resolve_setting(std::env::var(ENDPOINT_ENV).ok(), &self.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        url::Url::parse(&endpoint).with_context(|| format!("Invalid endpoint URL: {endpoint}"))?;
        Ok(endpoint)
    }

    /// Project id with precedence: env > config.
    ///
    /// # Errors
    /// Returns an error if neither is set.
    pub fn effective_project(&self) -> Result<String> {
        resolve_setting(std::env::var(PROJECT_ENV).ok(), &self.project).with_context(|| {
            format!("No project configured. Set {PROJECT_ENV} or `project` in config.toml.")
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Log filter directive with precedence: env > config > default.
    pub fn effective_log_filter(&self) -> String {
        resolve_setting(std::env::var(LOG_ENV).ok(), &self.log_level)
            .unwrap_or_else(|| Self::DEFAULT_LOG_LEVEL.to_string())
    }
}

/// Picks the first non-blank value: env, then config.
fn resolve_setting(env_value: Option<String>, config_value: &str) -> Option<String> {
    env_value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| Some(config_value.trim()).filter(|v| !v.is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.project.is_empty());
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "project = \"food-app\"\nrequest_timeout_secs = 0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.project, "food-app");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "project = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.endpoint, defaults.endpoint);
        assert_eq!(config.project, defaults.project);
        assert_eq!(config.request_timeout_secs, defaults.request_timeout_secs);
        assert_eq!(config.log_level, defaults.log_level);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::init(&path).unwrap();
        assert!(path.exists());

        let err = Config::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_resolve_setting_precedence() {
        assert_eq!(
            resolve_setting(Some(" env ".to_string()), "cfg"),
            Some("env".to_string())
        );
        assert_eq!(
            resolve_setting(Some("  ".to_string()), "cfg"),
            Some("cfg".to_string())
        );
        assert_eq!(resolve_setting(None, " "), None);
    }
}

//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! One TOML file describes the whole deployment: where to serve, which
//! repository holds the menu document, who the admin is, and how long a
//! session lives. There is no layering; the server reads exactly one file.
//!
//! # File Locations
//!
//! Resolved in order:
//! 1. `--config <path>` if given
//! 2. `$CARTA_CONFIG` if set
//! 3. `~/.config/carta/config.toml`
//!
//! A server cannot run without its remote, so no file at all is an error
//! rather than a silent fall-through to defaults.
//!
//! # Environment Overrides
//!
//! Secrets can be kept out of the file:
//! - `CARTA_REPO_TOKEN` overrides `repository.token`
//! - `CARTA_ADMIN_PASSWORD` overrides `admin.password`
//!
//! # Example
//!
//! ```no_run
//! use carta::core::config::Config;
//!
//! let loaded = Config::load(None).unwrap();
//! println!("serving on {}:{}", loaded.config.server.host, loaded.config.server.port);
//! println!("config from {}", loaded.path.display());
//! ```

pub mod schema;

pub use schema::{AdminConfig, AuthConfig, Config, RepositoryConfig, ServerConfig};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::git::GatewayConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CARTA_CONFIG";

/// Environment override for `repository.token`.
pub const REPO_TOKEN_ENV: &str = "CARTA_REPO_TOKEN";

/// Environment override for `admin.password`.
pub const ADMIN_PASSWORD_ENV: &str = "CARTA_ADMIN_PASSWORD";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("no config file found: pass --config, set $CARTA_CONFIG, or create '{fallback}'")]
    NotFound { fallback: PathBuf },

    #[error("user config directory not found")]
    NoConfigDir,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded, validated configuration.
    pub config: Config,
    /// The file it came from.
    pub path: PathBuf,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// `explicit` is the `--config` flag value; when given, that file must
    /// exist and parse. Environment overrides are applied before
    /// validation, so a token supplied only via `CARTA_REPO_TOKEN` passes.
    ///
    /// # Errors
    ///
    /// Returns an error when no file can be found, or when the file exists
    /// but cannot be read, parsed, or validated.
    pub fn load(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let path = Self::resolve_path(explicit)?;
        let mut config = Self::read_config(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(ConfigLoadResult { config, path })
    }

    /// The fallback location, `~/.config/carta/config.toml`.
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("carta/config.toml"))
    }

    fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
            if !env_path.is_empty() {
                return Ok(PathBuf::from(env_path));
            }
        }

        let fallback = Self::default_config_path()?;
        if fallback.exists() {
            return Ok(fallback);
        }

        Err(ConfigError::NotFound { fallback })
    }

    fn read_config(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Pull secret values from the environment over the file's values.
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(REPO_TOKEN_ENV) {
            if !token.is_empty() {
                self.repository.token = Some(token);
            }
        }
        if let Ok(password) = std::env::var(ADMIN_PASSWORD_ENV) {
            if !password.is_empty() {
                self.admin.password = password;
            }
        }
    }

    /// Build the gateway configuration from the repository section.
    pub fn gateway_config(&self) -> GatewayConfig {
        let repo = &self.repository;
        GatewayConfig {
            url: repo.url.clone(),
            branch: repo.branch.clone(),
            username: repo.username.clone(),
            token: repo.token.clone().unwrap_or_default(),
            clone_dir: repo.clone_dir.clone(),
            file_path: PathBuf::from(&repo.file_path),
            network_timeout: Duration::from_secs(repo.network_timeout_secs),
            committer_name: repo.committer_name.clone(),
            committer_email: repo.committer_email.clone(),
        }
    }
}

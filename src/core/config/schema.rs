//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Sections
//!
//! - `[server]` - HTTP bind address and CORS origins (all defaulted)
//! - `[repository]` - the git remote the menu document lives in (required)
//! - `[admin]` - the single admin principal (required)
//! - `[auth]` - session lifetime (defaulted)
//!
//! # Validation
//!
//! Required sections surface missing keys as parse errors; value rules
//! (non-empty url, relative document path, positive timeouts) are checked
//! by `validate()` after parsing. Unknown fields are rejected everywhere.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Top-level configuration file.
///
/// # Example
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8080
/// allowed_origins = ["https://admin.example.com"]
///
/// [repository]
/// url = "https://github.com/acme/menu-data.git"
/// branch = "main"
/// token = "ghp_..."
/// clone_dir = "/var/lib/carta/repo"
/// file_path = "menu.json"
///
/// [admin]
/// username = "admin"
/// password = "change-me"
/// email = "admin@example.com"
///
/// [auth]
/// session_ttl_secs = 3600
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Backing git repository
    pub repository: RepositoryConfig,

    /// Admin principal
    pub admin: AdminConfig,

    /// Session settings
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.repository.validate()?;
        self.admin.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind host (default `0.0.0.0`)
    pub host: String,

    /// Bind port (default `8080`)
    pub port: u16,

    /// Exact origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "server.host cannot be empty".to_string(),
            ));
        }
        for origin in &self.allowed_origins {
            if origin.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "server.allowed_origins entries cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// The git remote holding the menu document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Remote URL (https or local path)
    pub url: String,

    /// Branch holding the document (default `main`)
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Username paired with the token for https remotes (default `git`)
    #[serde(default = "default_username")]
    pub username: String,

    /// Access token for https remotes. Overridden by `CARTA_REPO_TOKEN`.
    /// Local path remotes need none.
    #[serde(default)]
    pub token: Option<String>,

    /// Directory the repository is cloned into
    pub clone_dir: PathBuf,

    /// Document path relative to the repository root (default `menu.json`)
    #[serde(default = "default_file_path")]
    pub file_path: String,

    /// Deadline for clone/fetch/push, in seconds (default `30`)
    #[serde(default = "default_network_timeout_secs")]
    pub network_timeout_secs: u64,

    /// Committer name recorded on every commit (default `carta`)
    #[serde(default = "default_committer_name")]
    pub committer_name: String,

    /// Committer email recorded on every commit (default `carta@localhost`)
    #[serde(default = "default_committer_email")]
    pub committer_email: String,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_username() -> String {
    "git".to_string()
}

fn default_file_path() -> String {
    "menu.json".to_string()
}

fn default_network_timeout_secs() -> u64 {
    30
}

fn default_committer_name() -> String {
    "carta".to_string()
}

fn default_committer_email() -> String {
    "carta@localhost".to_string()
}

impl RepositoryConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "repository.url cannot be empty".to_string(),
            ));
        }
        if self.branch.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "repository.branch cannot be empty".to_string(),
            ));
        }
        if self.clone_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "repository.clone_dir cannot be empty".to_string(),
            ));
        }
        if self.file_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "repository.file_path cannot be empty".to_string(),
            ));
        }
        let file_path = Path::new(&self.file_path);
        if file_path.is_absolute() {
            return Err(ConfigError::InvalidValue(format!(
                "repository.file_path must be relative to the repository root, got '{}'",
                self.file_path
            )));
        }
        if file_path.components().any(|c| c == Component::ParentDir) {
            return Err(ConfigError::InvalidValue(format!(
                "repository.file_path cannot traverse outside the repository, got '{}'",
                self.file_path
            )));
        }
        if self.network_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "repository.network_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.committer_name.trim().is_empty() || self.committer_email.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "repository committer name and email cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// The single admin principal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Login name
    pub username: String,

    /// Login password. Overridden by `CARTA_ADMIN_PASSWORD`.
    pub password: String,

    /// Email reported back on login
    pub email: String,
}

impl AdminConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "admin.username cannot be empty".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(ConfigError::InvalidValue(
                "admin.password cannot be empty".to_string(),
            ));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(ConfigError::InvalidValue(format!(
                "admin.email must be an email address, got '{}'",
                self.email
            )));
        }
        Ok(())
    }
}

/// Session settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Seconds a bearer token stays valid (default `3600`)
    pub session_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: 3600,
        }
    }
}

impl AuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.session_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "auth.session_ttl_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

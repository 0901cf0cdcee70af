//! Configuration loading for the email service
//!
//! Configuration is loaded from:
//! 1. File named by EMAIL_SERVICE_CONFIG
//! 2. `.email-service.toml` in the current directory or any parent
//! 3. `<config dir>/email-service/config.toml`
//! 4. Default values
//!
//! EMAIL_DB_PATH and EMAIL_SERVICE_PORT override whatever the file says;
//! command-line flags are applied on top by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_SELF_ADDRESS;

/// Project-local config file name
pub const CONFIG_FILE_NAME: &str = ".email-service.toml";

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub mailbox: MailboxConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// SQLite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// Insert missing seed emails when the service starts
    #[serde(default = "default_true")]
    pub seed_on_startup: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailboxConfig {
    /// Sender used when a new email doesn't name one
    #[serde(default = "default_self_address")]
    pub self_address: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_db_path() -> PathBuf {
    PathBuf::from("emails.db")
}

fn default_true() -> bool {
    true
}

fn default_self_address() -> String {
    DEFAULT_SELF_ADDRESS.to_string()
}

impl ServerConfig {
    /// `host:port` for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            seed_on_startup: default_true(),
        }
    }
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            self_address: default_self_address(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the first file found, then apply env overrides
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os("EMAIL_SERVICE_CONFIG").map(PathBuf::from);

        let mut config = match explicit.or_else(|| find_config_file(CONFIG_FILE_NAME)) {
            Some(path) => {
                tracing::info!("Loading config from: {}", path.display());
                Self::load_from_path(&path)?
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply EMAIL_DB_PATH / EMAIL_SERVICE_PORT from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("EMAIL_DB_PATH").filter(|p| !p.is_empty()) {
            self.database.path = PathBuf::from(path);
        }

        if let Some(port) = lookup("EMAIL_SERVICE_PORT").filter(|p| !p.is_empty()) {
            self.server.port = port
                .parse()
                .with_context(|| format!("EMAIL_SERVICE_PORT is not a valid port: {}", port))?;
        }

        Ok(())
    }
}

/// Find a config file by walking up the directory tree, then checking global config.
fn find_config_file(filename: &str) -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let candidate = current.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    let global_path = dirs::config_dir()?.join("email-service").join("config.toml");
    global_path.exists().then_some(global_path)
}

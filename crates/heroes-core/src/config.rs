//! Configuration management for the superheroes directory.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/superheroes/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Record store settings
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from the XDG config path, falling back to defaults.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, falling back to defaults if it
    /// doesn't exist.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `PORT`: Override the listen port
    /// - `HOST`: Override the listen address
    /// - `DATABASE_URL`: Override the store connection string
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally `std::env::var`).
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if `PORT` or `HOST` can't be parsed.
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("PORT") {
            self.server.port = val.parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT".to_string(),
                reason: format!("'{val}' is not a valid port"),
            })?;
            tracing::debug!("Override server.port from env: {}", self.server.port);
        }

        if let Some(val) = lookup("HOST") {
            self.server.host = val.parse().map_err(|_| ConfigError::InvalidValue {
                field: "HOST".to_string(),
                reason: format!("'{val}' is not a valid IP address"),
            })?;
            tracing::debug!("Override server.host from env: {}", self.server.host);
        }

        if let Some(val) = lookup("DATABASE_URL") {
            if !val.trim().is_empty() {
                self.database.url = val;
                tracing::debug!("Override database.url from env");
            }
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/superheroes/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "superheroes", "superheroes")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to bind
    pub port: u16,
}

impl ServerConfig {
    /// Socket address to listen on.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 5000,
        }
    }
}

/// Record store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection string (`sqlite://path.db` or `sqlite::memory:`)
    pub url: String,
    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://superheroes.db".to_string(),
            max_connections: 5,
        }
    }
}

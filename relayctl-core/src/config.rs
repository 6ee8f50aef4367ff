//! Layered configuration for relayctl
//!
//! Priority (lowest to highest): built-in defaults, `~/.relayctl/config.toml`
//! (or an explicit path), environment variables. CLI flags are applied on top
//! by the binary.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Default bind address for the HTTP server
pub const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 3030);

/// Default pool size. Kept low; every request holds one connection briefly.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Session time zone applied to every pooled connection
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

const ENV_DATABASE_URL: &str = "DATABASE_URL";
const ENV_BIND: &str = "RELAYCTL_BIND";
const ENV_TIMEZONE: &str = "RELAYCTL_TIMEZONE";
const ENV_MAX_CONNECTIONS: &str = "RELAYCTL_MAX_CONNECTIONS";

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayctlConfig {
    pub server: ServerSection,
    pub database: DatabaseConfig,
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(DEFAULT_BIND),
            cors_permissive: false,
        }
    }
}

/// `[database]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    /// IANA zone name, e.g. `Asia/Kolkata`
    pub timezone: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            timezone: DEFAULT_TIMEZONE.to_owned(),
        }
    }
}

impl DatabaseConfig {
    /// Connection URL, or an actionable error when no source provided one.
    pub fn require_url(&self) -> Result<&str> {
        self.url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    /// Parsed session time zone.
    pub fn tz(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))
    }
}

impl RelayctlConfig {
    /// Config directory: `~/.relayctl`
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".relayctl"))
    }

    /// Default config file: `~/.relayctl/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load file and environment layers, then validate.
    ///
    /// An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Overlay environment variables using `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DATABASE_URL).filter(|v| !v.trim().is_empty()) {
            self.database.url = Some(url);
        }

        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid_env(ENV_BIND, format!("{e}")))?;
        }

        if let Some(tz) = lookup(ENV_TIMEZONE) {
            self.database.timezone = tz.trim().to_owned();
        }

        if let Some(max) = lookup(ENV_MAX_CONNECTIONS) {
            self.database.max_connections = max
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid_env(ENV_MAX_CONNECTIONS, format!("{e}")))?;
        }

        Ok(())
    }

    /// Check values that would otherwise fail at connect time.
    pub fn validate(&self) -> Result<()> {
        self.database.tz()?;
        if self.database.max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }
        Ok(())
    }
}

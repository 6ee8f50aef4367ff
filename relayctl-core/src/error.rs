/// Structured error types for relayctl-core.
///
/// Library consumers get `thiserror` enums; the CLI wraps them in `anyhow`.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading and validation failures
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Time zone name not present in the tz database
    #[error("Unknown time zone '{0}'")]
    UnknownTimezone(String),

    /// Environment variable present but unusable
    #[error("Invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },

    /// Pool size of zero
    #[error("max_connections must be at least 1")]
    ZeroConnections,

    /// No database URL from any source
    #[error(
        "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.relayctl/config.toml"
    )]
    MissingDatabaseUrl,
}

/// Result type alias for relayctl-core operations
pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// Create an invalid environment variable error
    pub fn invalid_env(var: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidEnv {
            var,
            reason: reason.into(),
        }
    }
}

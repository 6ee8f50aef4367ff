//! Configuration loading for the CLI
//!
//! `.env` files are read before the layered config so their variables take
//! part in the environment overlay.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use relayctl_core::RelayctlConfig;

/// Load environment variables from .env files.
///
/// Runs before tracing is initialized, so the files read are returned for
/// the caller to log.
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.relayctl/.env
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded = Vec::new();
    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    if let Some(env_file) = RelayctlConfig::config_dir().map(|dir| dir.join(".env")) {
        // dotenvy never overwrites variables that are already set
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded.push(env_file);
        }
    }

    loaded
}

/// Load the layered config, naming the file in any error.
pub fn load(explicit: Option<&Path>) -> Result<RelayctlConfig> {
    let shown = explicit
        .map(|p| p.display().to_string())
        .or_else(|| RelayctlConfig::default_path().map(|p| p.display().to_string()))
        .unwrap_or_else(|| "defaults".to_string());

    RelayctlConfig::load(explicit).with_context(|| format!("Failed to load config ({shown})"))
}

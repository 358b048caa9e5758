//! Application settings loaded from `keto.toml` and the environment.
//!
//! Every field is optional in the file. A missing file means defaults; a file
//! that exists but does not parse is an error, so a typo never silently
//! changes behavior.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "keto.toml";

/// Milliseconds between two onboarding analysis stages.
pub const DEFAULT_ANALYSIS_TICK_MS: u64 = 800;

/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// OS color-scheme signal used when no theme has been stored
    pub prefers_dark: bool,
    /// Replacement for the embedded plan/recipe catalog
    pub content_path: Option<PathBuf>,
    /// Pace of the onboarding analysis sequence
    pub analysis_tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prefers_dark: false,
            content_path: None,
            analysis_tick_ms: DEFAULT_ANALYSIS_TICK_MS,
        }
    }
}

/// Parses a configuration file.
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from {path:?}");
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {path:?}: {e}"),
    })
}

/// Loads the configuration the binary runs with.
///
/// Reads `KETO_CONFIG` (or `keto.toml`) when present, then applies the
/// `KETO_PREFERS_DARK` override.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("KETO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        debug!("No config file at {path}, using defaults");
        AppConfig::default()
    };

    if let Ok(value) = std::env::var("KETO_PREFERS_DARK") {
        config.prefers_dark = parse_flag(&value).ok_or_else(|| Error::Config {
            message: format!("KETO_PREFERS_DARK must be true/false, got '{value}'"),
        })?;
    }

    Ok(config)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "dark" => Some(true),
        "0" | "false" | "no" | "light" => Some(false),
        _ => None,
    }
}

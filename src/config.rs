//! Tool configuration loaded from `~/.config/scopegrab/config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional defaults the CLI falls back to when arguments are omitted.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Hostname or IP used when no hostname argument is given.
    #[serde(default)]
    pub default_hostname: Option<String>,
    /// Directory captures are saved into; the working directory if unset.
    #[serde(default)]
    pub save_path: Option<PathBuf>,
}

impl Config {
    /// Directory to write output files into.
    #[must_use]
    pub fn save_dir(&self) -> PathBuf {
        self.save_path.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Load the configuration from the platform config directory.
///
/// Returns defaults if the file doesn't exist (configuration is optional).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load() -> Result<Config> {
    load_from(&config_path())
}

fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
}

/// Return the path to the config file.
fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scopegrab")
        .join("config.toml")
}

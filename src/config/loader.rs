// Configuration loader
// Reads ~/.habu-assistant/config.toml, then applies HABU_* environment overrides

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::APP_DIR;
use super::settings::Config;

/// Default location of the config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR).join("config.toml"))
}

/// Load configuration from the default location. A missing file is not an
/// error; built-in defaults are used instead.
pub fn load_config() -> Result<Config> {
    match default_config_path() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::warn!("Could not determine home directory, using default configuration");
            finish(Config::default())
        }
    }
}

/// Load configuration from an explicit path
pub fn load_config_from(path: &Path) -> Result<Config> {
    let config = if path.exists() {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        config
    } else {
        tracing::debug!("No config file at {}, using defaults", path.display());
        Config::default()
    };

    finish(config)
}

fn finish(mut config: Config) -> Result<Config> {
    config.apply_env(|key| std::env::var(key).ok());
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

//! Config file commands.

use crate::config::{self, Config, ConfigError};
use crate::error::{Error, Result, ResultExt};

use super::mask_key;

/// Print the config location and effective settings, optionally writing defaults
pub fn cmd_config(init: bool) -> anyhow::Result<()> {
    let path = config::config_path()
        .ok_or_else(|| Error::Config(ConfigError::NoConfigDir))?;

    if init {
        if path.exists() {
            println!("Config already exists at {:?}, leaving it unchanged", path);
        } else {
            let saved = config::save(&Config::default())
                .with_context("writing default config")?;
            println!("✓ Wrote default config to {:?}", saved);
        }
        println!();
    }

    println!("Config file: {:?}{}", path, if path.exists() { "" } else { " (not found)" });
    println!();
    println!("{}", render_masked(&config::load())?);
    Ok(())
}

/// The config as TOML with API keys masked
fn render_masked(config: &Config) -> Result<String> {
    let mut shown = config.clone();
    shown.credentials.youtube_api_keys = config
        .api_keys()
        .iter()
        .map(|k| mask_key(k))
        .collect();
    toml::to_string_pretty(&shown)
        .map_err(|e| Error::Config(ConfigError::Serialize(e)))
}

//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\jukebox-resolver\config.toml
//! - macOS: ~/Library/Application Support/jukebox-resolver/config.toml
//! - Linux: ~/.config/jukebox-resolver/config.toml
//!
//! The config file is human-readable and editable. Settings are loaded once
//! per run; the CLI can override keys and the temp root on top of them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::resolve::ResolverConfig;
use crate::resolve::extractor::ExtractorConfig;
use crate::resolve::youtube::DEFAULT_BASE_URL;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Resolver settings
    pub resolver: ResolverSettings,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// YouTube Data API keys, tried in order as quotas run out
    pub youtube_api_keys: Vec<String>,
}

/// How inputs are resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Root for per-invocation working directories (default: system temp)
    pub temp_dir: Option<PathBuf>,

    /// Extraction tool executable
    pub extractor_program: String,

    /// Arguments placed before ours, e.g. `["-m", "yt_dlp"]`
    pub extractor_args: Vec<String>,

    /// Deadline for one tool run
    pub extractor_timeout_secs: u64,

    /// Deadline for one API request
    pub http_timeout_secs: u64,

    /// YouTube Data API root
    pub youtube_api_base: String,

    /// Inputs resolved at once in batch mode
    pub batch_concurrency: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            temp_dir: None,
            extractor_program: "yt-dlp".to_string(),
            extractor_args: Vec::new(),
            extractor_timeout_secs: 120,
            http_timeout_secs: 15,
            youtube_api_base: DEFAULT_BASE_URL.to_string(),
            batch_concurrency: 4,
        }
    }
}

impl Config {
    /// Tool settings with the temp root resolved.
    pub fn extractor_config(&self) -> ExtractorConfig {
        let settings = &self.resolver;
        let defaults = ExtractorConfig::default();
        ExtractorConfig {
            program: settings.extractor_program.clone(),
            program_args: settings.extractor_args.clone(),
            temp_root: settings.temp_dir.clone().unwrap_or(defaults.temp_root),
            timeout: Duration::from_secs(settings.extractor_timeout_secs),
        }
    }

    /// Everything the resolver service needs.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            extractor: self.extractor_config(),
            api_keys: self.api_keys(),
            api_base_url: self.resolver.youtube_api_base.clone(),
            http_timeout: Duration::from_secs(self.resolver.http_timeout_secs),
            batch_concurrency: self.resolver.batch_concurrency,
        }
    }

    /// Configured keys with blanks removed.
    pub fn api_keys(&self) -> Vec<String> {
        self.credentials
            .youtube_api_keys
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Replace the API keys, e.g. from the command line.
    ///
    /// Each entry may itself be a comma separated list.
    pub fn override_api_keys<S: AsRef<str>>(&mut self, keys: &[S]) {
        self.credentials.youtube_api_keys = keys
            .iter()
            .flat_map(|k| k.as_ref().split(','))
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("jukebox-resolver"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    load_with_keys::<&str>(&[])
}

/// Load configuration, replacing the stored API keys with `api_keys` when
/// any are given (e.g. `--api-key` or `YOUTUBE_API_KEYS`).
///
/// The missing-key warning reflects the keys actually in effect.
pub fn load_with_keys<S: AsRef<str>>(api_keys: &[S]) -> Config {
    let path = config_path();
    if path.is_none() {
        tracing::warn!("Could not determine config directory, using defaults");
    }
    let config = load_overridden(path.as_deref(), api_keys);
    if let Some(message) = keyless_warning(&config) {
        tracing::warn!("{}", message);
    }
    config
}

fn load_overridden<S: AsRef<str>>(path: Option<&Path>, api_keys: &[S]) -> Config {
    let mut config = path.map(load_from).unwrap_or_default();
    if !api_keys.is_empty() {
        config.override_api_keys(api_keys);
    }
    config
}

/// Load configuration from a specific file, falling back to defaults.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// The warning to log when no API key is in effect.
fn keyless_warning(config: &Config) -> Option<String> {
    config.api_keys().is_empty().then(|| {
        format!(
            "No YouTube API key configured; YouTube searches will use {} directly",
            config.resolver.extractor_program
        )
    })
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ecoscore/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The scoring backend has no default base URL. Leaving it unset yields a
//! client that fails every request with a config error; the app still runs.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::zip_lookup::DEFAULT_ZIP_LOOKUP_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EcoScoreConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub zip_lookup: ZipLookupConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ZipLookupConfig {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MapConfig {
    pub highlight_radius_m: Option<f64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SCORE_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_ZIP_LOOKUP_TIMEOUT_MS: u64 = 3_000;
pub const DEFAULT_HIGHLIGHT_RADIUS_M: f64 = 6_000.0;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// `None` leaves the score client unconfigured.
    pub score_base_url: Option<String>,
    pub score_timeout: Duration,
    pub zip_lookup_enabled: bool,
    pub zip_lookup_base_url: String,
    pub zip_lookup_timeout: Duration,
    pub highlight_radius_m: f64,
}

/// Overrides taken from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub skip_zip_check: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.ecoscore/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ecoscore").join("config.toml"))
}

/// Load config from `~/.ecoscore/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `EcoScoreConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<EcoScoreConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(EcoScoreConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<EcoScoreConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(EcoScoreConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: EcoScoreConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Eco-Score Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "http://localhost:8000"  # Or set ECOSCORE_BASE_URL env var
# timeout_ms = 30000

# [zip_lookup]
# enabled = true                      # false skips the existence check
# base_url = "https://api.zippopotam.us"
# timeout_ms = 3000

# [map]
# highlight_radius_m = 6000
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &EcoScoreConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &EcoScoreConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Backend URL: CLI → env → config (no default)
    let score_base_url = cli
        .base_url
        .clone()
        .or_else(|| env("ECOSCORE_BASE_URL"))
        .or_else(|| config.backend.base_url.clone())
        .filter(|url| !url.trim().is_empty());

    // Timeout: env → config → default
    let score_timeout_ms = env("ECOSCORE_TIMEOUT_MS")
        .and_then(|v| match v.parse::<u64>() {
            Ok(ms) => Some(ms),
            Err(e) => {
                warn!("Ignoring ECOSCORE_TIMEOUT_MS={v:?}: {e}");
                None
            }
        })
        .or(config.backend.timeout_ms)
        .unwrap_or(DEFAULT_SCORE_TIMEOUT_MS);

    // Lookup URL: env → config → default
    let zip_lookup_base_url = env("ZIP_LOOKUP_BASE_URL")
        .or_else(|| config.zip_lookup.base_url.clone())
        .unwrap_or_else(|| DEFAULT_ZIP_LOOKUP_BASE_URL.to_string());

    let zip_lookup_enabled = !cli.skip_zip_check && config.zip_lookup.enabled.unwrap_or(true);

    ResolvedConfig {
        score_base_url,
        score_timeout: Duration::from_millis(score_timeout_ms),
        zip_lookup_enabled,
        zip_lookup_base_url,
        zip_lookup_timeout: Duration::from_millis(
            config
                .zip_lookup
                .timeout_ms
                .unwrap_or(DEFAULT_ZIP_LOOKUP_TIMEOUT_MS),
        ),
        highlight_radius_m: config
            .map
            .highlight_radius_m
            .unwrap_or(DEFAULT_HIGHLIGHT_RADIUS_M),
    }
}

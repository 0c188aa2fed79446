//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chatterm/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::geometry::{
    DEFAULT_CHAT_HEIGHT, DEFAULT_CHAT_WIDTH, MIN_CHAT_HEIGHT, MIN_CHAT_WIDTH,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChattermConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub local_echo: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConnectionConfig {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WindowConfig {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub min_width: Option<i32>,
    pub min_height: Option<i32>,
    pub cell_width: Option<u16>,
    pub cell_height: Option<u16>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_URL: &str = "ws://127.0.0.1:8080";
pub const DEFAULT_CELL_WIDTH: u16 = 8;
pub const DEFAULT_CELL_HEIGHT: u16 = 16;
/// Upper bound for either cell dimension, in pixels.
pub const MAX_CELL_SIZE: u16 = 256;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub url: String,
    pub local_echo: bool,
    pub window_size: (i32, i32),
    pub min_window_size: (i32, i32),
    /// Pixel size of one terminal cell, used to map geometry onto the grid.
    pub cell_size: (u16, u16),
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&ChattermConfig::default(), None)
    }
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

/// Returns the path to `~/.chatterm/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chatterm").join("config.toml"))
}

/// Load config from `path`, or from `~/.chatterm/config.toml` when `None`.
///
/// A missing default file is generated and `ChattermConfig::default()`
/// returned. A missing explicit path is an error. A malformed file returns
/// `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<ChattermConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => {
                if !p.exists() {
                    info!("No config file found, generating default at {}", p.display());
                    generate_default_config(&p);
                    return Ok(ChattermConfig::default());
                }
                p
            }
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(ChattermConfig::default());
            }
        },
    };

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<ChattermConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# chatterm configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [connection]
# url = "ws://127.0.0.1:8080"        # Or set CHATTERM_URL env var

# [general]
# local_echo = false                 # Show your own lines if the relay doesn't echo them

# [window]
# width = 768                        # Initial chat window size, in pixels
# height = 600
# min_width = 400
# min_height = 300
# cell_width = 8                     # Pixels per terminal column
# cell_height = 16                   # Pixels per terminal row
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
pub fn resolve(config: &ChattermConfig, cli_url: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_url, std::env::var("CHATTERM_URL").ok())
}

fn resolve_with_env(
    config: &ChattermConfig,
    cli_url: Option<&str>,
    env_url: Option<String>,
) -> ResolvedConfig {
    // URL: CLI → env → config → default
    let url = cli_url
        .map(|s| s.to_string())
        .or(env_url)
        .or_else(|| config.connection.url.clone())
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    let window = &config.window;
    let min_window_size = (
        window.min_width.unwrap_or(MIN_CHAT_WIDTH).max(1),
        window.min_height.unwrap_or(MIN_CHAT_HEIGHT).max(1),
    );

    ResolvedConfig {
        url,
        local_echo: config.general.local_echo.unwrap_or(false),
        window_size: (
            window.width.unwrap_or(DEFAULT_CHAT_WIDTH),
            window.height.unwrap_or(DEFAULT_CHAT_HEIGHT),
        ),
        min_window_size,
        cell_size: (
            window
                .cell_width
                .unwrap_or(DEFAULT_CELL_WIDTH)
                .clamp(1, MAX_CELL_SIZE),
            window
                .cell_height
                .unwrap_or(DEFAULT_CELL_HEIGHT)
                .clamp(1, MAX_CELL_SIZE),
        ),
    }
}

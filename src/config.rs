//! Application configuration.
//!
//! Read from a JSON file; every field falls back to its default when absent.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "BRIDGE_DASH_CONFIG";

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "bridge_dash.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Initial map view.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapViewConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            latitude: 32.1574,
            longitude: -82.9071,
            zoom: 5.0,
        }
    }
}

/// Dashboard settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Bridge inventory CSV.
    pub csv_path: PathBuf,
    /// Directory holding the gallery photos.
    pub image_dir: PathBuf,
    pub map: MapViewConfig,
    /// RGB fill of the owner agency bars.
    pub bar_color: [u8; 3],
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("BridgesData.csv"),
            image_dir: PathBuf::from("assets"),
            map: MapViewConfig::default(),
            bar_color: [0, 128, 0],
            window_width: 1200.0,
            window_height: 900.0,
        }
    }
}

impl AppConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the config: explicit path, then the working-directory file,
    /// then built-in defaults.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::info!("Using config {}", path.display());
            return Self::from_file(&path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            log::info!("Using config {}", local.display());
            return Self::from_file(local);
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Resolve using [`CONFIG_ENV_VAR`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
    }
}

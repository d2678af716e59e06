//! Configuration loading and parsing

use anyhow::{Context, Result};
use ets2_telemetry_core::{HostInfo, TelemetryConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// Recorded host calls, one JSON object per line
    pub replay: Option<PathBuf>,
    #[serde(default = "default_game_id")]
    pub game_id: String,
    #[serde(default = "default_game_name")]
    pub game_name: String,
}

fn default_game_id() -> String {
    "eut2".to_string()
}

fn default_game_name() -> String {
    "Euro Truck Simulator 2 1.49".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            replay: None,
            game_id: default_game_id(),
            game_name: default_game_name(),
        }
    }
}

impl InputConfig {
    pub fn host(&self) -> HostInfo {
        HostInfo::new(&self.game_id, &self.game_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Snapshot file (JSON lines); stdout when absent
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub pretty: bool,
    /// Stop writing after this many snapshots
    pub max_snapshots: Option<usize>,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

//! Telemetry configuration types
//!
//! This module defines the tunables of the normalization engine. Everything
//! has a default matching the behavior dashboards expect, so an empty
//! configuration file is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which truck simulation the host is; selects H-shifter gear naming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameVariant {
    /// Euro Truck Simulator 2 (game id `eut2`)
    Ets2,
    /// American Truck Simulator (game id `ats`)
    Ats,
}

impl GameVariant {
    /// Variant for a host game id, `None` for unsupported games
    pub fn from_game_id(game_id: &str) -> Option<Self> {
        match game_id.to_ascii_lowercase().as_str() {
            "eut2" => Some(GameVariant::Ets2),
            "ats" => Some(GameVariant::Ats),
            _ => None,
        }
    }
}

/// RPM window used by the best-gear estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearTarget {
    /// Center of the window
    pub rpm: f64,
    /// Initial maximum distance from the center
    pub tolerance: f64,
}

/// Configuration for the telemetry engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Upper bound of one consumer wait in milliseconds (default: 10000ms)
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_ms: u64,

    /// Best-gear target RPM (default: 1300)
    #[serde(default = "default_target_rpm")]
    pub best_gear_rpm: f64,

    /// Best-gear initial tolerance in RPM (default: 1500)
    #[serde(default = "default_rpm_tolerance")]
    pub best_gear_tolerance: f64,

    /// Optional: force a gear-naming variant instead of deriving it from the game id
    #[serde(default)]
    pub variant: Option<GameVariant>,

    /// Reset a trailer slot when its configuration event arrives empty
    #[serde(default = "default_true")]
    pub clear_detached_trailers: bool,
}

fn default_wait_timeout() -> u64 {
    10_000
}

fn default_target_rpm() -> f64 {
    1300.0
}

fn default_rpm_tolerance() -> f64 {
    1500.0
}

fn default_true() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            wait_timeout_ms: default_wait_timeout(),
            best_gear_rpm: default_target_rpm(),
            best_gear_tolerance: default_rpm_tolerance(),
            variant: None,
            clear_detached_trailers: true,
        }
    }
}

impl TelemetryConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the consumer wait timeout
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Builder method: set the best-gear RPM window
    pub fn with_best_gear_window(mut self, rpm: f64, tolerance: f64) -> Self {
        self.best_gear_rpm = rpm;
        self.best_gear_tolerance = tolerance;
        self
    }

    /// Builder method: force a gear-naming variant
    pub fn with_variant(mut self, variant: GameVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Builder method: keep or reset trailer slots on empty configuration
    pub fn with_clear_detached_trailers(mut self, enabled: bool) -> Self {
        self.clear_detached_trailers = enabled;
        self
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn gear_target(&self) -> GearTarget {
        GearTarget {
            rpm: self.best_gear_rpm,
            tolerance: self.best_gear_tolerance,
        }
    }
}

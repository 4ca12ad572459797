use serde::{Deserialize, Serialize};

/// Data-driven configuration for the tower game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    /// Blocks in a fresh tower.
    pub block_count: u32,
    /// Blocks per row (for layout).
    pub row_width: u32,
    /// Lower bound of the instability added per pull.
    pub risk_min: f32,
    /// Upper bound (exclusive) of the instability added per pull.
    pub risk_max: f32,
    /// Instability at which the tower collapses.
    pub collapse_threshold: f32,
    /// Seconds the collapse (or the last-block finish) stays on screen
    /// before the result is reported.
    pub end_display_delay: f32,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            block_count: 18,
            row_width: 3,
            risk_min: 5.0,
            risk_max: 20.0,
            collapse_threshold: 100.0,
            end_display_delay: 3.0,
        }
    }
}

impl TowerConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("PARTYNIGHT_TOWER_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/tower.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }
}

use serde::{Deserialize, Serialize};

/// Data-driven configuration for the fishing game. Coordinates are in a
/// normalized 0..100 space; the visible pond spans `0..=100` horizontally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FishingConfig {
    /// Round length in seconds.
    pub round_secs: f32,
    /// Maximum fish alive at once.
    pub max_fish: usize,
    /// Seconds between spawn attempts.
    pub spawn_interval: f32,
    /// Seconds between motion steps.
    pub motion_interval: f32,
    /// Spawn x for fish entering from the left edge.
    pub spawn_left_x: f32,
    /// Spawn x for fish entering from the right edge.
    pub spawn_right_x: f32,
    /// Fish at or left of this x are gone.
    pub despawn_left_x: f32,
    /// Fish at or right of this x are gone.
    pub despawn_right_x: f32,
    /// Vertical swim band (top, inclusive).
    pub lane_top: f32,
    /// Vertical swim band (bottom, exclusive).
    pub lane_bottom: f32,
    /// Distance per motion step, lower bound.
    pub speed_min: f32,
    /// Distance per motion step, upper bound (exclusive).
    pub speed_max: f32,
    /// Catch band, exclusive lower edge.
    pub catch_band_min: f32,
    /// Catch band, exclusive upper edge.
    pub catch_band_max: f32,
}

impl Default for FishingConfig {
    fn default() -> Self {
        Self {
            round_secs: 60.0,
            max_fish: 5,
            spawn_interval: 1.5,
            motion_interval: 0.05,
            spawn_left_x: -10.0,
            spawn_right_x: 110.0,
            despawn_left_x: -20.0,
            despawn_right_x: 120.0,
            lane_top: 10.0,
            lane_bottom: 70.0,
            speed_min: 0.5,
            speed_max: 2.0,
            catch_band_min: 35.0,
            catch_band_max: 65.0,
        }
    }
}

impl FishingConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("PARTYNIGHT_FISHING_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/fishing.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }

    pub fn in_catch_band(&self, x: f32) -> bool {
        x > self.catch_band_min && x < self.catch_band_max
    }

    pub fn is_out_of_pond(&self, x: f32) -> bool {
        x <= self.despawn_left_x || x >= self.despawn_right_x
    }
}

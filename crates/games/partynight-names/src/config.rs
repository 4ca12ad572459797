use serde::{Deserialize, Serialize};

/// Data-driven configuration for the name game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NameGameConfig {
    /// Rounds before the winner is declared.
    pub round_count: u32,
}

impl Default for NameGameConfig {
    fn default() -> Self {
        Self { round_count: 5 }
    }
}

impl NameGameConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("PARTYNIGHT_NAMES_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/names.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }
}

use serde::{Deserialize, Serialize};

/// Data-driven configuration for the universal engine's modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UniversalConfig {
    /// "Get ready" countdown before mash taps count.
    pub mash_prep_secs: f32,
    /// Taps needed to win a mash race.
    pub mash_goal: i32,
    /// Seconds the mash winner is shown before the result is reported.
    pub mash_end_delay: f32,
    /// Reflex go-signal delay, lower bound.
    pub reflex_delay_min: f32,
    /// Reflex go-signal delay, upper bound (exclusive).
    pub reflex_delay_max: f32,
    pub reflex_end_delay: f32,
    /// Probability that a bomb draw explodes.
    pub bomb_chance: f64,
    /// Card pairs dealt in memory mode (capped by the symbol set).
    pub memory_pairs: usize,
    /// How long a matched pair stays revealed before it locks in.
    pub memory_match_reveal: f32,
    /// How long a mismatched pair stays face up.
    pub memory_mismatch_hide: f32,
}

impl Default for UniversalConfig {
    fn default() -> Self {
        Self {
            mash_prep_secs: 2.0,
            mash_goal: 50,
            mash_end_delay: 1.5,
            reflex_delay_min: 2.0,
            reflex_delay_max: 5.0,
            reflex_end_delay: 2.0,
            bomb_chance: 0.2,
            memory_pairs: 6,
            memory_match_reveal: 0.5,
            memory_mismatch_hide: 1.0,
        }
    }
}

impl UniversalConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("PARTYNIGHT_UNIVERSAL_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/universal.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: UniversalConfig = toml::from_str("mash_goal = 10\n").unwrap();
        assert_eq!(config.mash_goal, 10);
        assert_eq!(config.memory_pairs, 6);
        assert!((config.bomb_chance - 0.2).abs() < f64::EPSILON);
    }
}

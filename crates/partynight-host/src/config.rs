use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use partynight_core::rng::BoxedRng;
use partynight_core::words::WordService;
use partynight_gemini::{GeminiConfig, GeminiOracle};

/// Env var naming an alternative host config file.
pub const CONFIG_ENV: &str = "PARTYNIGHT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "partynight.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level host configuration, loaded from `partynight.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Drive every engine at this rate instead of its own `tick_rate`.
    pub tick_rate_override: Option<f32>,
    /// Remote word oracle. Absent means the word service runs offline.
    pub word_service: Option<GeminiConfig>,
}

impl HostConfig {
    /// Load from `PARTYNIGHT_CONFIG`, else `partynight.toml`. A missing
    /// default file yields defaults; a missing file named by the env var
    /// is an error.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Self::from_path(path);
        }
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if !path.exists() {
            tracing::info!("No {DEFAULT_CONFIG_PATH} found, using defaults");
            return Ok(Self::default());
        }
        Self::from_path(path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(rate) = self.tick_rate_override
            && !(rate.is_finite() && rate > 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "tick_rate_override must be > 0, got {rate}"
            )));
        }
        if let Some(ws) = &self.word_service {
            if ws.model.trim().is_empty() {
                return Err(ConfigError::Invalid("word_service.model is empty".to_string()));
            }
            if ws.timeout_secs == 0 {
                return Err(ConfigError::Invalid(
                    "word_service.timeout_secs must be > 0".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Build the shared word service. Falls back to offline whenever the
    /// remote oracle cannot be set up.
    pub fn word_service(&self, rng: BoxedRng) -> WordService {
        let Some(remote) = self.word_service.clone() else {
            tracing::info!("Word service running offline");
            return WordService::offline(rng);
        };
        let remote = remote.with_env_key();
        if !remote.is_usable() {
            tracing::warn!("word_service configured without an API key, running offline");
            return WordService::offline(rng);
        }
        match GeminiOracle::new(remote) {
            Ok(oracle) => {
                tracing::info!(model = %oracle.config().model, "Word service backed by Gemini");
                WordService::with_oracle(Arc::new(oracle), rng)
            },
            Err(e) => {
                tracing::warn!(error = %e, "Cannot build Gemini client, running offline");
                WordService::offline(rng)
            },
        }
    }
}

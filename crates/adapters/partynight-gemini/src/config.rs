use serde::{Deserialize, Serialize};

/// Environment variable the API key is read from when the config file
/// leaves it blank.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration for the Gemini word oracle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key. Empty means "take it from `GEMINI_API_KEY`".
    pub api_key: String,
    pub model: String,
    /// Base URL of the Generative Language API.
    pub endpoint: String,
    /// Per-request timeout. Requests are never retried.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 8,
        }
    }
}

impl GeminiConfig {
    /// Fill a blank `api_key` from the environment.
    pub fn with_env_key(mut self) -> Self {
        if self.api_key.is_empty()
            && let Ok(key) = std::env::var(API_KEY_ENV)
        {
            self.api_key = key.trim().to_string();
        }
        self
    }

    /// Whether there is a key to call the API with at all.
    pub fn is_usable(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use partynight_core::words::{WordOracle, WordServiceError};

use crate::config::GeminiConfig;

const LETTER_PROMPT: &str = "Generate a single random Persian letter (Farsi alphabet) for the \
                             game Esm-o-Famil. Only return the character, nothing else.";

/// Word oracle backed by the Gemini `generateContent` endpoint.
pub struct GeminiOracle {
    config: GeminiConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [OutPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct OutPart<'a> {
    text: &'a str,
}

/// Partial `generateContent` response.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<InPart>,
}

#[derive(Debug, Deserialize)]
struct InPart {
    text: Option<String>,
}

impl GeminiOracle {
    pub fn new(config: GeminiConfig) -> Result<Self, WordServiceError> {
        let client = reqwest::Client::builder()
            .user_agent("partynight-gemini/0.1")
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| WordServiceError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Single attempt; no retries.
    async fn generate(&self, prompt: &str) -> Result<String, WordServiceError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [OutPart { text: prompt }],
            }],
        };
        let resp = self
            .client
            .post(self.config.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| WordServiceError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(WordServiceError::Status(resp.status().as_u16()));
        }

        let raw = resp
            .text()
            .await
            .map_err(|e| WordServiceError::Transport(e.to_string()))?;
        response_text(&raw)
    }
}

#[async_trait]
impl WordOracle for GeminiOracle {
    async fn generate_letter(&self) -> Result<String, WordServiceError> {
        let text = self.generate(LETTER_PROMPT).await?;
        tracing::debug!(response = %text, "Gemini letter");
        Ok(text)
    }

    async fn belongs_to_category(
        &self,
        letter: char,
        category: &str,
        word: &str,
    ) -> Result<bool, WordServiceError> {
        let prompt = validation_prompt(letter, category, word);
        match self.generate(&prompt).await {
            Ok(text) => Ok(parse_verdict(&text)),
            // A reply with no text is a "no", not a failure.
            Err(WordServiceError::EmptyResponse) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn validation_prompt(letter: char, category: &str, word: &str) -> String {
    format!(
        "Check if the word \"{word}\" is a valid \"{category}\" in Persian (Farsi) that starts \
         with the letter \"{letter}\".\nAnswer strictly \"TRUE\" or \"FALSE\"."
    )
}

/// Concatenated text of the first candidate.
fn response_text(raw: &str) -> Result<String, WordServiceError> {
    let parsed: GenerateResponse =
        serde_json::from_str(raw).map_err(|e| WordServiceError::Malformed(e.to_string()))?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(WordServiceError::EmptyResponse);
    }
    Ok(text)
}

fn parse_verdict(text: &str) -> bool {
    text.trim().to_uppercase().contains("TRUE")
}

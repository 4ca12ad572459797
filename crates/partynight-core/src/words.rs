//! Letter generation and word checking for the name game.
//!
//! The remote oracle is optional. Without one, or whenever it misbehaves,
//! the service answers locally: a uniformly random alphabet letter, and a
//! permissive prefix/length check for words.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

use crate::rng::{BoxedRng, GameRng, StdGameRng};

/// The 32-letter Persian alphabet letters are drawn from.
pub const ALPHABET: [char; 32] = [
    'ا', 'ب', 'پ', 'ت', 'ث', 'ج', 'چ', 'ح', 'خ', 'د', 'ذ', 'ر', 'ز', 'ژ', 'س', 'ش', 'ص', 'ض',
    'ط', 'ظ', 'ع', 'غ', 'ف', 'ق', 'ک', 'گ', 'ل', 'م', 'ن', 'و', 'ه', 'ی',
];

/// Minimum length, in characters, of an acceptable word.
pub const MIN_WORD_LEN: usize = 2;

/// Failures a remote oracle can report. The service always recovers from
/// these locally.
#[derive(Debug, Error)]
pub enum WordServiceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("oracle returned HTTP {0}")]
    Status(u16),

    #[error("oracle returned no text")]
    EmptyResponse,

    #[error("malformed oracle response: {0}")]
    Malformed(String),
}

/// A remote generator/checker, typically a hosted language model.
#[async_trait]
pub trait WordOracle: Send + Sync {
    /// Ask for one random alphabet letter. The raw text is returned; the
    /// service decides whether it is usable.
    async fn generate_letter(&self) -> Result<String, WordServiceError>;

    /// Ask whether `word` genuinely belongs to `category`.
    async fn belongs_to_category(
        &self,
        letter: char,
        category: &str,
        word: &str,
    ) -> Result<bool, WordServiceError>;
}

/// Letter/word service consumed by the name game.
///
/// Safe to share across tasks; holds no per-call state beyond the fallback
/// RNG.
pub struct WordService {
    oracle: Option<Arc<dyn WordOracle>>,
    rng: Mutex<BoxedRng>,
}

impl WordService {
    /// Purely local service.
    pub fn offline(rng: BoxedRng) -> Self {
        Self {
            oracle: None,
            rng: Mutex::new(rng),
        }
    }

    /// Service backed by a remote oracle, with local fallback.
    pub fn with_oracle(oracle: Arc<dyn WordOracle>, rng: BoxedRng) -> Self {
        Self {
            oracle: Some(oracle),
            rng: Mutex::new(rng),
        }
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    /// One letter from [`ALPHABET`]. Never fails.
    pub async fn next_letter(&self) -> char {
        let Some(oracle) = &self.oracle else {
            return self.local_letter();
        };
        match oracle.generate_letter().await {
            Ok(text) => match accept_letter(&text) {
                Some(letter) => letter,
                None => {
                    tracing::warn!(response = %text, "Oracle letter rejected, using local letter");
                    self.local_letter()
                },
            },
            Err(e) => {
                tracing::warn!(error = %e, "Oracle letter request failed, using local letter");
                self.local_letter()
            },
        }
    }

    /// Whether `word` is an acceptable `category` answer for `letter`.
    ///
    /// Local checks always run first. The oracle is only consulted when
    /// they pass, and any oracle failure counts as acceptance.
    pub async fn validate_word(&self, letter: char, category: &str, word: &str) -> bool {
        if !passes_local_checks(letter, word) {
            return false;
        }
        let Some(oracle) = &self.oracle else {
            return true;
        };
        match oracle.belongs_to_category(letter, category, word).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!(error = %e, word, category, "Oracle check failed, accepting word");
                true
            },
        }
    }

    /// Draw from the local RNG without asking the oracle.
    pub fn local_letter(&self) -> char {
        // A poisoned lock only means another caller panicked mid-draw; the
        // RNG itself is still usable.
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        random_letter(rng.as_mut())
    }
}

impl Default for WordService {
    fn default() -> Self {
        Self::offline(Box::new(StdGameRng::from_entropy()))
    }
}

/// Uniform draw from [`ALPHABET`].
pub fn random_letter(rng: &mut dyn GameRng) -> char {
    ALPHABET[rng.pick_index(ALPHABET.len())]
}

/// Length and prefix checks that never need the network.
pub fn passes_local_checks(letter: char, word: &str) -> bool {
    word.chars().count() >= MIN_WORD_LEN && word.starts_with(letter)
}

/// A remote letter is usable only if it is exactly one alphabet character
/// once surrounding whitespace is stripped.
fn accept_letter(text: &str) -> Option<char> {
    let mut chars = text.trim().chars();
    let letter = chars.next()?;
    if chars.next().is_some() || !ALPHABET.contains(&letter) {
        return None;
    }
    Some(letter)
}

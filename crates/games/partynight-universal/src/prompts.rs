use serde::{Deserialize, Serialize};

use partynight_core::rng::GameRng;

pub const PROMPTS: [&str; 5] = [
    "یک جوک تعریف کن.",
    "صدای یک حیوان را تقلید کن.",
    "آخرین عکسی که گرفتی را نشان بده.",
    "پنج بار سریع بگو: چیپس چسب سس.",
    "یک آهنگ بخوان.",
];

/// Rotating party instruction. Has no winner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptState {
    pub prompt: String,
    /// Prompts shown so far, including the first.
    pub shown: u32,
}

impl PromptState {
    pub fn drawn(rng: &mut dyn GameRng) -> Self {
        let mut state = Self::default();
        state.redraw(rng);
        state
    }

    /// Replace the prompt with a uniform draw. Repeats are allowed.
    pub fn redraw(&mut self, rng: &mut dyn GameRng) {
        self.prompt = PROMPTS[rng.pick_index(PROMPTS.len())].to_string();
        self.shown += 1;
    }
}

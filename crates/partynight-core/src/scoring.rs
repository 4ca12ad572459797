use serde::{Deserialize, Serialize};

use crate::game_trait::{PlayerId, PlayerScore};
use crate::player::Player;

/// Per-player score map kept in roster order.
///
/// Roster order matters: ties for the lead resolve to whichever player
/// was seated first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    entries: Vec<PlayerScore>,
}

impl ScoreBoard {
    /// Every rostered player starts at zero.
    pub fn new(players: &[Player]) -> Self {
        Self {
            entries: players
                .iter()
                .map(|p| PlayerScore {
                    player_id: p.id,
                    score: 0,
                })
                .collect(),
        }
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.entries.iter().any(|e| e.player_id == player_id)
    }

    pub fn get(&self, player_id: PlayerId) -> Option<i32> {
        self.entries
            .iter()
            .find(|e| e.player_id == player_id)
            .map(|e| e.score)
    }

    /// Add `delta` to a rostered player's score and return the new total.
    /// Unknown ids are ignored.
    pub fn add(&mut self, player_id: PlayerId, delta: i32) -> Option<i32> {
        let entry = self.entries.iter_mut().find(|e| e.player_id == player_id)?;
        entry.score += delta;
        Some(entry.score)
    }

    /// Overwrite a rostered player's score.
    pub fn set(&mut self, player_id: PlayerId, score: i32) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.player_id == player_id) {
            entry.score = score;
        }
    }

    /// First-encountered maximum. `None` only for an empty roster.
    pub fn leader(&self) -> Option<PlayerId> {
        let mut best: Option<&PlayerScore> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.score > b.score) {
                best = Some(entry);
            }
        }
        best.map(|e| e.player_id)
    }

    pub fn entries(&self) -> &[PlayerScore] {
        &self.entries
    }

    pub fn to_vec(&self) -> Vec<PlayerScore> {
        self.entries.clone()
    }
}

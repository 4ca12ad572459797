use serde::{Deserialize, Serialize};

use crate::game_trait::PlayerId;

/// A player seated at the shared device for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    /// Character token picked at setup (an emoji in the stock character set).
    pub avatar: String,
    pub color: PlayerColor,
    pub score: i32,
}

impl Player {
    pub fn new(id: PlayerId, display_name: impl Into<String>) -> Self {
        let palette_index = (id as usize).saturating_sub(1) % PlayerColor::PALETTE.len();
        Self {
            id,
            display_name: display_name.into(),
            avatar: String::new(),
            color: PlayerColor::PALETTE[palette_index],
            score: 0,
        }
    }
}

/// Seat color. Renderers map these to their own theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Yellow,
    Pink,
    Orange,
    Amber,
    Slate,
    Green,
    Purple,
    Indigo,
}

impl Default for PlayerColor {
    fn default() -> Self {
        Self::PALETTE[0]
    }
}

impl PlayerColor {
    pub const PALETTE: &[PlayerColor] = &[
        PlayerColor::Yellow,
        PlayerColor::Pink,
        PlayerColor::Orange,
        PlayerColor::Amber,
        PlayerColor::Slate,
        PlayerColor::Green,
        PlayerColor::Purple,
        PlayerColor::Indigo,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starts_at_zero() {
        let p = Player::new(3, "Sara");
        assert_eq!(p.score, 0);
        assert_eq!(p.color, PlayerColor::Orange);
    }

    #[test]
    fn palette_wraps_for_large_ids() {
        let p = Player::new(9, "Nine");
        assert_eq!(p.color, PlayerColor::Yellow);
    }
}

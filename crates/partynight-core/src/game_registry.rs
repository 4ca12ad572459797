use serde::{Deserialize, Serialize};

/// Catalog identifier of a game (e.g. `"jenga"`, `"dice_roll"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub String);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which engine mounts for a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Tower,
    Fishing,
    NameGame,
    Universal,
}

/// Behavioral variant of the universal engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UniversalMode {
    Mash,
    Reflex,
    Luck(LuckVariant),
    Memory,
    Prompt,
}

/// Outcome distribution used by luck mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LuckVariant {
    /// Six-sided die.
    Die,
    Coin,
    /// Uniformly pick one seated player.
    Spin,
    /// Safe or eliminated, with a fixed elimination chance.
    Bomb,
}

impl LuckVariant {
    /// Map a catalog id onto its luck variant. Unknown ids fall back to
    /// [`LuckVariant::Bomb`].
    pub fn from_game_id(id: &str) -> Self {
        if id.contains("dice") || id.contains("ludo") || id.contains("snakes") {
            Self::Die
        } else if id.contains("coin") {
            Self::Coin
        } else if id.contains("spin") {
            Self::Spin
        } else {
            Self::Bomb
        }
    }
}

/// Static catalog entry handed to the host when a game is picked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDescriptor {
    pub id: GameId,
    pub name: String,
    pub min_players: u8,
    pub max_players: u8,
    pub kind: GameKind,
    /// Only meaningful for [`GameKind::Universal`].
    pub mode: Option<UniversalMode>,
    pub description: String,
    pub icon: String,
}

impl GameDescriptor {
    /// Whether `count` seats fall inside the declared bounds. Engines never
    /// re-check this; the host does before mounting.
    pub fn accepts_player_count(&self, count: usize) -> bool {
        count >= self.min_players as usize && count <= self.max_players as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luck_variant_follows_catalog_ids() {
        assert_eq!(LuckVariant::from_game_id("dice_roll"), LuckVariant::Die);
        assert_eq!(LuckVariant::from_game_id("ludo"), LuckVariant::Die);
        assert_eq!(LuckVariant::from_game_id("snakes"), LuckVariant::Die);
        assert_eq!(LuckVariant::from_game_id("coin_flip"), LuckVariant::Coin);
        assert_eq!(LuckVariant::from_game_id("spin_bottle"), LuckVariant::Spin);
        assert_eq!(LuckVariant::from_game_id("bomb_squad"), LuckVariant::Bomb);
        assert_eq!(LuckVariant::from_game_id("gol_pooch"), LuckVariant::Bomb);
    }

    #[test]
    fn player_count_bounds_are_inclusive() {
        let desc = GameDescriptor {
            id: GameId("esmfamil".to_string()),
            name: "Name game".to_string(),
            min_players: 2,
            max_players: 4,
            kind: GameKind::NameGame,
            mode: None,
            description: String::new(),
            icon: "📝".to_string(),
        };
        assert!(!desc.accepts_player_count(1));
        assert!(desc.accepts_player_count(2));
        assert!(desc.accepts_player_count(4));
        assert!(!desc.accepts_player_count(5));
    }
}

//! Chance draws. Luck mode never ends by itself.

use serde::{Deserialize, Serialize};

use partynight_core::feedback::Cue;
use partynight_core::game_registry::LuckVariant;
use partynight_core::game_trait::PlayerId;

use crate::{ModeCtx, UniversalPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinFace {
    Heads,
    Tails,
}

/// Result of one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LuckOutcome {
    Die(u8),
    Coin(CoinFace),
    /// The seated player the spinner landed on.
    Spin(PlayerId),
    Bomb { exploded: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckDraw {
    pub actor: PlayerId,
    pub outcome: LuckOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LuckState {
    pub variant: LuckVariant,
    pub last: Option<LuckDraw>,
    pub draws: u32,
}

impl LuckState {
    pub fn new(variant: LuckVariant) -> Self {
        Self {
            variant,
            last: None,
            draws: 0,
        }
    }

    pub(crate) fn act(&mut self, player_id: PlayerId, ctx: &mut ModeCtx<'_>) {
        if *ctx.phase != UniversalPhase::Playing || !ctx.scores.contains(player_id) {
            return;
        }
        ctx.feedback.cue(Cue::Pop);

        let outcome = match self.variant {
            LuckVariant::Die => LuckOutcome::Die(ctx.rng.next_u32_range(1, 6) as u8),
            LuckVariant::Coin => {
                if ctx.rng.next_f64() > 0.5 {
                    LuckOutcome::Coin(CoinFace::Heads)
                } else {
                    LuckOutcome::Coin(CoinFace::Tails)
                }
            },
            LuckVariant::Spin => {
                let idx = ctx.rng.pick_index(ctx.roster.len());
                LuckOutcome::Spin(ctx.roster[idx])
            },
            LuckVariant::Bomb => {
                let exploded = ctx.rng.next_f64() > 1.0 - ctx.config.bomb_chance;
                if exploded {
                    ctx.feedback.cue(Cue::Lose);
                }
                LuckOutcome::Bomb { exploded }
            },
        };

        tracing::debug!(player_id, ?outcome, "Luck draw");
        self.draws += 1;
        self.last = Some(LuckDraw {
            actor: player_id,
            outcome,
        });
    }
}

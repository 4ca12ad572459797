//! Tap race: first to the goal wins.

use serde::{Deserialize, Serialize};

use partynight_core::feedback::Cue;
use partynight_core::game_trait::{GameEvent, PlayerId};
use partynight_core::time::Countdown;

use crate::{ModeCtx, UniversalPhase};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MashState {
    pub goal: i32,
    prep: Countdown,
    pub winner: Option<PlayerId>,
}

impl MashState {
    pub fn new(goal: i32, prep_secs: f32) -> Self {
        Self {
            goal: goal.max(1),
            prep: Countdown::new(prep_secs),
            winner: None,
        }
    }

    pub(crate) fn tick(&mut self, dt: f32, ctx: &mut ModeCtx<'_>) {
        if *ctx.phase == UniversalPhase::Prep && self.prep.tick(dt) {
            *ctx.phase = UniversalPhase::Playing;
            tracing::info!(goal = self.goal, "Mash race started");
        }
    }

    /// Count one tap. Counters are per player, so the first update that
    /// reaches the goal wins outright.
    pub(crate) fn tap(&mut self, player_id: PlayerId, ctx: &mut ModeCtx<'_>) -> Vec<GameEvent> {
        if *ctx.phase != UniversalPhase::Playing {
            return Vec::new();
        }
        let Some(score) = ctx.scores.add(player_id, 1) else {
            return Vec::new();
        };
        ctx.feedback.cue(Cue::Click);

        if score >= self.goal {
            self.winner = Some(player_id);
            *ctx.phase = UniversalPhase::Ended;
            ctx.feedback.cue(Cue::Win);
            tracing::info!(player_id, "Mash goal reached");
            ctx.game_over.schedule(ctx.config.mash_end_delay, Some(player_id));
        }
        vec![GameEvent::ScoreUpdate { player_id, score }]
    }
}

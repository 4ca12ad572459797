//! Wait for the signal, then be first.

use serde::{Deserialize, Serialize};

use partynight_core::feedback::Cue;
use partynight_core::game_trait::PlayerId;
use partynight_core::rng::GameRng;
use partynight_core::time::Countdown;

use crate::config::UniversalConfig;
use crate::{ModeCtx, UniversalPhase};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflexState {
    /// The go signal. Acting before it flips is a false start.
    pub go: bool,
    delay: Countdown,
    pub winner: Option<PlayerId>,
    pub false_start: Option<PlayerId>,
}

impl ReflexState {
    pub fn armed(delay_secs: f32) -> Self {
        Self {
            go: false,
            delay: Countdown::new(delay_secs),
            winner: None,
            false_start: None,
        }
    }

    /// Arm with a random delay in `[reflex_delay_min, reflex_delay_max)`.
    pub fn random(config: &UniversalConfig, rng: &mut dyn GameRng) -> Self {
        let (min, max) = (config.reflex_delay_min, config.reflex_delay_max);
        let delay = if max > min {
            rng.next_f32_range(min, max)
        } else {
            min
        };
        Self::armed(delay)
    }

    pub(crate) fn tick(&mut self, dt: f32, ctx: &mut ModeCtx<'_>) {
        if *ctx.phase == UniversalPhase::Playing && !self.go && self.delay.tick(dt) {
            self.go = true;
            ctx.feedback.cue(Cue::Pop);
            tracing::debug!("Reflex signal is go");
        }
    }

    pub(crate) fn act(&mut self, player_id: PlayerId, ctx: &mut ModeCtx<'_>) {
        if *ctx.phase != UniversalPhase::Playing || !ctx.scores.contains(player_id) {
            return;
        }
        *ctx.phase = UniversalPhase::Ended;
        let end_delay = ctx.config.reflex_end_delay;

        if !self.go {
            // A false start ends the round with nobody credited.
            self.false_start = Some(player_id);
            ctx.feedback.cue(Cue::Lose);
            tracing::info!(player_id, "Reflex false start");
            ctx.game_over.schedule(end_delay, None);
            return;
        }

        self.winner = Some(player_id);
        ctx.feedback.cue(Cue::Win);
        tracing::info!(player_id, "Reflex won");
        ctx.game_over.schedule(end_delay, Some(player_id));
    }
}

pub mod config;

use serde::{Deserialize, Serialize};

use partynight_core::feedback::{Cue, SharedFeedback};
use partynight_core::game_trait::{
    GameEvent, GameMetadata, PartyGame, PlayerId, PlayerScore, decode_input,
};
use partynight_core::party_game_boilerplate;
use partynight_core::player::Player;
use partynight_core::rng::BoxedRng;
use partynight_core::scoring::ScoreBoard;
use partynight_core::time::GameOverLatch;

use config::TowerConfig;

/// Lifecycle of a tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TowerPhase {
    Playing,
    /// Instability hit the threshold. Nobody wins.
    Collapsed,
    /// Every block was pulled without a collapse.
    Exhausted,
}

/// Input from a tower player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TowerInput {
    Pull { block: u32 },
}

/// Serializable tower state for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerState {
    /// Block ids still standing, ascending. Row is `id / row_width`.
    pub blocks: Vec<u32>,
    pub row_width: u32,
    /// Accumulated risk in `[0, collapse_threshold]`.
    pub instability: f32,
    /// Index into the roster of the player whose turn it is.
    pub current_turn: usize,
    pub last_puller: Option<PlayerId>,
    pub phase: TowerPhase,
    pub scores: ScoreBoard,
    pub finished: bool,
}

/// The tower game.
pub struct TowerGame {
    state: TowerState,
    player_ids: Vec<PlayerId>,
    rng: BoxedRng,
    feedback: SharedFeedback,
    game_over: GameOverLatch,
    game_config: TowerConfig,
}

impl TowerGame {
    pub fn new(rng: BoxedRng, feedback: SharedFeedback) -> Self {
        Self::with_config(TowerConfig::load(), rng, feedback)
    }

    pub fn with_config(config: TowerConfig, rng: BoxedRng, feedback: SharedFeedback) -> Self {
        Self {
            state: fresh_state(&config, &[]),
            player_ids: Vec::new(),
            rng,
            feedback,
            game_over: GameOverLatch::default(),
            game_config: config,
        }
    }

    /// Player whose turn it is, if anyone is seated.
    pub fn current_player(&self) -> Option<PlayerId> {
        self.player_ids.get(self.state.current_turn).copied()
    }

    /// Pull `block` out of the tower on behalf of the current player.
    ///
    /// No-op once the tower is down or if the block is already gone.
    pub fn pull_block(&mut self, block: u32) -> Vec<GameEvent> {
        if self.state.phase != TowerPhase::Playing {
            return Vec::new();
        }
        let Some(puller) = self.current_player() else {
            return Vec::new();
        };
        let Ok(pos) = self.state.blocks.binary_search(&block) else {
            return Vec::new();
        };

        self.feedback.cue(Cue::Click);
        self.state.blocks.remove(pos);
        self.state.last_puller = Some(puller);

        let risk = self.draw_risk();
        let threshold = self.game_config.collapse_threshold;
        let instability = self.state.instability + risk;

        if instability >= threshold {
            self.state.instability = threshold;
            self.state.phase = TowerPhase::Collapsed;
            self.state.finished = true;
            self.feedback.cue(Cue::Lose);
            tracing::info!(puller, block, "Tower collapsed");
            self.game_over.schedule(self.game_config.end_display_delay, None);
            return Vec::new();
        }

        self.state.instability = instability;

        if self.state.blocks.is_empty() {
            // Last block out and still standing: the steady hand wins.
            self.state.phase = TowerPhase::Exhausted;
            self.state.finished = true;
            self.feedback.cue(Cue::Win);
            tracing::info!(puller, "Tower stripped without collapsing");
            self.game_over.schedule(self.game_config.end_display_delay, Some(puller));
            return Vec::new();
        }

        self.state.current_turn = (self.state.current_turn + 1) % self.player_ids.len();
        Vec::new()
    }

    fn draw_risk(&mut self) -> f32 {
        let (min, max) = (self.game_config.risk_min, self.game_config.risk_max);
        if max <= min {
            return min;
        }
        self.rng.next_f32_range(min, max)
    }
}

fn fresh_state(config: &TowerConfig, players: &[Player]) -> TowerState {
    TowerState {
        blocks: (0..config.block_count).collect(),
        row_width: config.row_width.max(1),
        instability: 0.0,
        current_turn: 0,
        last_puller: None,
        phase: TowerPhase::Playing,
        scores: ScoreBoard::new(players),
        finished: false,
    }
}

impl PartyGame for TowerGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Tower".to_string(),
            description: "Pull blocks carefully so the tower doesn't fall!".to_string(),
            min_players: 1,
            max_players: 4,
        }
    }

    fn tick_rate(&self) -> f32 {
        10.0
    }

    fn init(&mut self, players: &[Player]) -> Vec<GameEvent> {
        self.state = fresh_state(&self.game_config, players);
        self.player_ids = players.iter().map(|p| p.id).collect();
        self.game_over = GameOverLatch::default();
        Vec::new()
    }

    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        self.game_over.tick(dt).into_iter().collect()
    }

    fn apply_input(&mut self, player_id: PlayerId, input: &[u8]) -> Vec<GameEvent> {
        match decode_input::<TowerInput>(player_id, input) {
            Some(TowerInput::Pull { block }) => self.pull_block(block),
            None => Vec::new(),
        }
    }

    party_game_boilerplate!(state_type: TowerState);

    fn scores(&self) -> Vec<PlayerScore> {
        self.state.scores.to_vec()
    }
}

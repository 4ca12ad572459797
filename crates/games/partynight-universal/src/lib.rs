pub mod config;
pub mod luck;
pub mod mash;
pub mod memory;
pub mod prompts;
pub mod reflex;

use serde::{Deserialize, Serialize};

use partynight_core::feedback::{Feedback, SharedFeedback};
use partynight_core::game_registry::UniversalMode;
use partynight_core::game_trait::{
    GameEvent, GameMetadata, PartyGame, PlayerId, PlayerScore, decode_input,
};
use partynight_core::party_game_boilerplate;
use partynight_core::player::Player;
use partynight_core::rng::{BoxedRng, GameRng};
use partynight_core::scoring::ScoreBoard;
use partynight_core::time::GameOverLatch;

use config::UniversalConfig;
use luck::LuckState;
use mash::MashState;
use memory::MemoryState;
use prompts::PromptState;
use reflex::ReflexState;

/// Shared lifecycle of every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UniversalPhase {
    /// Countdown before input counts (mash only).
    Prep,
    Playing,
    Ended,
}

/// Input accepted by the universal engine. Inputs that do not belong to the
/// mounted mode are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UniversalInput {
    /// Mash tap.
    Tap,
    /// Reflex press or luck draw.
    Act,
    Flip { index: usize },
    NextPrompt,
    /// Leave the game screen.
    Back,
}

/// Per-mode state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModeState {
    Mash(MashState),
    Reflex(ReflexState),
    Luck(LuckState),
    Memory(MemoryState),
    Prompt(PromptState),
}

impl ModeState {
    /// Shape of a mode before `init`; draws nothing from the RNG.
    fn unmounted(mode: UniversalMode, config: &UniversalConfig) -> Self {
        match mode {
            UniversalMode::Mash => Self::Mash(MashState::new(config.mash_goal, config.mash_prep_secs)),
            UniversalMode::Reflex => Self::Reflex(ReflexState::armed(config.reflex_delay_max)),
            UniversalMode::Luck(variant) => Self::Luck(LuckState::new(variant)),
            UniversalMode::Memory => Self::Memory(MemoryState::default()),
            UniversalMode::Prompt => Self::Prompt(PromptState::default()),
        }
    }

    /// One-time setup at mount: deal, arm, or draw.
    fn setup(mode: UniversalMode, config: &UniversalConfig, rng: &mut dyn GameRng) -> Self {
        match mode {
            UniversalMode::Reflex => Self::Reflex(ReflexState::random(config, rng)),
            UniversalMode::Memory => Self::Memory(MemoryState::deal(config.memory_pairs, rng)),
            UniversalMode::Prompt => Self::Prompt(PromptState::drawn(rng)),
            UniversalMode::Mash | UniversalMode::Luck(_) => Self::unmounted(mode, config),
        }
    }
}

/// Serializable engine state for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniversalState {
    pub kind: UniversalMode,
    pub phase: UniversalPhase,
    pub mode: ModeState,
    /// Mash tap counts; zero for every other mode.
    pub scores: ScoreBoard,
    pub finished: bool,
}

/// Everything a mode handler may touch besides its own state.
pub(crate) struct ModeCtx<'a> {
    pub phase: &'a mut UniversalPhase,
    pub scores: &'a mut ScoreBoard,
    pub rng: &'a mut dyn GameRng,
    pub feedback: &'a dyn Feedback,
    pub game_over: &'a mut GameOverLatch,
    pub config: &'a UniversalConfig,
    pub roster: &'a [PlayerId],
}

/// One engine, five micro-games selected by [`UniversalMode`].
pub struct UniversalGame {
    state: UniversalState,
    player_ids: Vec<PlayerId>,
    rng: BoxedRng,
    feedback: SharedFeedback,
    game_over: GameOverLatch,
    game_config: UniversalConfig,
}

impl UniversalGame {
    pub fn new(mode: UniversalMode, rng: BoxedRng, feedback: SharedFeedback) -> Self {
        Self::with_config(mode, UniversalConfig::load(), rng, feedback)
    }

    pub fn with_config(
        mode: UniversalMode,
        config: UniversalConfig,
        rng: BoxedRng,
        feedback: SharedFeedback,
    ) -> Self {
        Self {
            state: UniversalState {
                kind: mode,
                phase: UniversalPhase::Prep,
                mode: ModeState::unmounted(mode, &config),
                scores: ScoreBoard::default(),
                finished: false,
            },
            player_ids: Vec::new(),
            rng,
            feedback,
            game_over: GameOverLatch::default(),
            game_config: config,
        }
    }

    /// Run `f` against the mode state with a context borrowed from the
    /// rest of the engine.
    fn with_mode<R>(&mut self, f: impl FnOnce(&mut ModeState, &mut ModeCtx<'_>) -> R) -> R {
        let Self {
            state,
            player_ids,
            rng,
            feedback,
            game_over,
            game_config,
        } = self;
        let mut ctx = ModeCtx {
            phase: &mut state.phase,
            scores: &mut state.scores,
            rng: rng.as_mut(),
            feedback: feedback.as_ref(),
            game_over,
            config: game_config,
            roster: player_ids,
        };
        let out = f(&mut state.mode, &mut ctx);
        state.finished = state.phase == UniversalPhase::Ended;
        out
    }

    fn handle(&mut self, player_id: PlayerId, input: UniversalInput) -> Vec<GameEvent> {
        if input == UniversalInput::Back {
            tracing::debug!(player_id, "Back requested");
            return vec![GameEvent::BackRequested];
        }
        self.with_mode(|mode, ctx| match (mode, input) {
            (ModeState::Mash(mash), UniversalInput::Tap) => mash.tap(player_id, ctx),
            (ModeState::Reflex(reflex), UniversalInput::Act) => {
                reflex.act(player_id, ctx);
                Vec::new()
            },
            (ModeState::Luck(luck), UniversalInput::Act) => {
                luck.act(player_id, ctx);
                Vec::new()
            },
            (ModeState::Memory(memory), UniversalInput::Flip { index }) => {
                memory.flip(index, ctx);
                Vec::new()
            },
            (ModeState::Prompt(prompt), UniversalInput::NextPrompt) => {
                if *ctx.phase == UniversalPhase::Playing {
                    prompt.redraw(ctx.rng);
                }
                Vec::new()
            },
            (_, input) => {
                tracing::debug!(player_id, ?input, "Input does not apply to this mode");
                Vec::new()
            },
        })
    }
}

impl PartyGame for UniversalGame {
    fn metadata(&self) -> GameMetadata {
        let (name, description) = match self.state.kind {
            UniversalMode::Mash => ("Mash", "Tap faster than everyone else."),
            UniversalMode::Reflex => ("Reflex", "Wait for green, then be first."),
            UniversalMode::Luck(_) => ("Luck", "Try your luck."),
            UniversalMode::Memory => ("Memory", "Find every matching pair."),
            UniversalMode::Prompt => ("Prompts", "Do what the card says."),
        };
        GameMetadata {
            name: name.to_string(),
            description: description.to_string(),
            min_players: 1,
            max_players: 4,
        }
    }

    fn init(&mut self, players: &[Player]) -> Vec<GameEvent> {
        self.player_ids = players.iter().map(|p| p.id).collect();
        self.game_over = GameOverLatch::default();
        self.state = UniversalState {
            kind: self.state.kind,
            phase: match self.state.kind {
                UniversalMode::Mash => UniversalPhase::Prep,
                _ => UniversalPhase::Playing,
            },
            mode: ModeState::setup(self.state.kind, &self.game_config, self.rng.as_mut()),
            scores: ScoreBoard::new(players),
            finished: false,
        };
        tracing::info!(mode = ?self.state.kind, players = players.len(), "Universal game mounted");
        Vec::new()
    }

    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = self.with_mode(|mode, ctx| match mode {
            ModeState::Mash(mash) => {
                mash.tick(dt, ctx);
                Vec::new()
            },
            ModeState::Reflex(reflex) => {
                reflex.tick(dt, ctx);
                Vec::new()
            },
            ModeState::Memory(memory) => memory.tick(dt, ctx),
            ModeState::Luck(_) | ModeState::Prompt(_) => Vec::new(),
        });
        events.extend(self.game_over.tick(dt));
        events
    }

    fn apply_input(&mut self, player_id: PlayerId, input: &[u8]) -> Vec<GameEvent> {
        match decode_input::<UniversalInput>(player_id, input) {
            Some(input) => self.handle(player_id, input),
            None => Vec::new(),
        }
    }

    party_game_boilerplate!(state_type: UniversalState);

    fn scores(&self) -> Vec<PlayerScore> {
        self.state.scores.to_vec()
    }
}

pub mod config;
pub mod fish;

use serde::{Deserialize, Serialize};

use partynight_core::feedback::{Cue, SharedFeedback};
use partynight_core::game_trait::{
    GameEvent, GameMetadata, PartyGame, PlayerId, PlayerScore, decode_input,
};
use partynight_core::party_game_boilerplate;
use partynight_core::player::Player;
use partynight_core::rng::BoxedRng;
use partynight_core::scoring::ScoreBoard;
use partynight_core::time::{GameOverLatch, Interval};

use config::FishingConfig;
use fish::Fish;

/// Input from a fishing player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FishingInput {
    /// Drop the hook.
    Cast,
}

/// Serializable pond state for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishingState {
    /// Seconds left on the clock.
    pub time_left: f32,
    pub fish: Vec<Fish>,
    pub next_fish_id: u32,
    pub scores: ScoreBoard,
    pub finished: bool,
}

/// The fishing game.
///
/// The spawner, the motion step and catch attempts all mutate `state.fish`
/// through `&mut self`, so each one runs to completion before the next.
pub struct FishingGame {
    state: FishingState,
    spawn_timer: Interval,
    motion_timer: Interval,
    rng: BoxedRng,
    feedback: SharedFeedback,
    game_over: GameOverLatch,
    game_config: FishingConfig,
}

impl FishingGame {
    pub fn new(rng: BoxedRng, feedback: SharedFeedback) -> Self {
        Self::with_config(FishingConfig::load(), rng, feedback)
    }

    pub fn with_config(config: FishingConfig, rng: BoxedRng, feedback: SharedFeedback) -> Self {
        Self {
            state: fresh_state(&config, &[]),
            spawn_timer: Interval::new(config.spawn_interval),
            motion_timer: Interval::new(config.motion_interval),
            rng,
            feedback,
            game_over: GameOverLatch::default(),
            game_config: config,
        }
    }

    /// Try to hook a fish for `player_id`.
    ///
    /// Takes the first fish (in spawn order) inside the catch band. A miss,
    /// an unknown player or a finished round changes nothing.
    pub fn attempt_catch(&mut self, player_id: PlayerId) -> Vec<GameEvent> {
        if self.state.finished
            || self.state.time_left <= 0.0
            || !self.state.scores.contains(player_id)
        {
            return Vec::new();
        }
        self.feedback.cue(Cue::Buzz);

        let Some(index) = self
            .state
            .fish
            .iter()
            .position(|f| self.game_config.in_catch_band(f.x))
        else {
            return Vec::new();
        };

        let caught = self.state.fish.remove(index);
        self.feedback.cue(Cue::Pop);
        let Some(score) = self.state.scores.add(player_id, caught.points) else {
            return Vec::new();
        };
        tracing::debug!(player_id, fish = caught.id, points = caught.points, "Fish caught");
        vec![GameEvent::ScoreUpdate { player_id, score }]
    }

    fn spawn_one(&mut self) {
        if self.state.fish.len() >= self.game_config.max_fish {
            return;
        }
        let id = self.state.next_fish_id;
        self.state.next_fish_id += 1;
        let fish = Fish::spawn(id, self.rng.as_mut(), &self.game_config);
        self.state.fish.push(fish);
    }

    fn swim_all(&mut self) {
        for fish in &mut self.state.fish {
            fish.swim();
        }
        let config = &self.game_config;
        self.state.fish.retain(|f| !config.is_out_of_pond(f.x));
    }

    fn finish(&mut self) -> Option<GameEvent> {
        self.state.finished = true;
        self.state.time_left = 0.0;
        let winner_id = self.state.scores.leader();
        tracing::info!(?winner_id, "Fishing round over");
        self.feedback.cue(Cue::Win);
        self.game_over.fire_now(winner_id)
    }
}

fn fresh_state(config: &FishingConfig, players: &[Player]) -> FishingState {
    FishingState {
        time_left: config.round_secs.max(0.0),
        fish: Vec::new(),
        next_fish_id: 0,
        scores: ScoreBoard::new(players),
        finished: false,
    }
}

impl PartyGame for FishingGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Fishing".to_string(),
            description: "Catch the most fish before time runs out.".to_string(),
            min_players: 1,
            max_players: 4,
        }
    }

    fn init(&mut self, players: &[Player]) -> Vec<GameEvent> {
        self.state = fresh_state(&self.game_config, players);
        self.spawn_timer = Interval::new(self.game_config.spawn_interval);
        self.motion_timer = Interval::new(self.game_config.motion_interval);
        self.game_over = GameOverLatch::default();
        Vec::new()
    }

    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.state.finished {
            return Vec::new();
        }
        if self.state.time_left <= 0.0 {
            return self.finish().into_iter().collect();
        }

        self.state.time_left = (self.state.time_left - dt).max(0.0);
        for _ in 0..self.spawn_timer.tick(dt) {
            self.spawn_one();
        }
        for _ in 0..self.motion_timer.tick(dt) {
            self.swim_all();
        }

        if self.state.time_left <= 0.0 {
            return self.finish().into_iter().collect();
        }
        Vec::new()
    }

    fn apply_input(&mut self, player_id: PlayerId, input: &[u8]) -> Vec<GameEvent> {
        match decode_input::<FishingInput>(player_id, input) {
            Some(FishingInput::Cast) => self.attempt_catch(player_id),
            None => Vec::new(),
        }
    }

    party_game_boilerplate!(state_type: FishingState);

    fn scores(&self) -> Vec<PlayerScore> {
        self.state.scores.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use partynight_core::feedback::silent;
    use partynight_core::rng::StdGameRng;
    use partynight_core::test_helpers::{
        RecordingFeedback, ScriptedRng, encode, game_overs, make_players, run_game_ticks,
    };

    use fish::{FishKind, Heading};

    fn seeded_game() -> FishingGame {
        FishingGame::with_config(
            FishingConfig::default(),
            Box::new(StdGameRng::seeded(17)),
            silent(),
        )
    }

    fn parked_fish(id: u32, x: f32, kind: FishKind) -> Fish {
        Fish {
            id,
            x,
            y: 40.0,
            kind,
            speed: 1.0,
            heading: Heading::Right,
            points: kind.points(),
        }
    }

    #[test]
    fn init_zeroes_every_seat() {
        let mut game = seeded_game();
        game.init(&make_players(4));
        assert_eq!(game.state.time_left, 60.0);
        assert!(game.state.fish.is_empty());
        assert!(game.scores().iter().all(|s| s.score == 0));
    }

    #[test]
    fn spawner_fires_every_interval() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        game.update(1.4);
        assert!(game.state.fish.is_empty());
        game.update(0.2);
        assert_eq!(game.state.fish.len(), 1);
        let fish = &game.state.fish[0];
        match fish.heading {
            Heading::Right => assert!(fish.x >= -10.0 && fish.x < 0.0),
            Heading::Left => assert!(fish.x <= 110.0 && fish.x > 100.0),
        }
        assert!(fish.y >= 10.0 && fish.y <= 70.0);
    }

    #[test]
    fn live_fish_are_capped() {
        let config = FishingConfig {
            // Keep fish parked so nothing swims away.
            speed_min: 0.0,
            speed_max: 0.0,
            ..FishingConfig::default()
        };
        let mut game = FishingGame::with_config(config, Box::new(StdGameRng::seeded(3)), silent());
        game.init(&make_players(1));
        run_game_ticks(&mut game, 300, 0.1);
        assert_eq!(game.state.fish.len(), 5);
    }

    #[test]
    fn motion_moves_and_culls_fish() {
        let mut game = seeded_game();
        game.init(&make_players(1));
        game.state.fish.push(parked_fish(0, 50.0, FishKind::Small));
        game.state.fish.push(parked_fish(1, 119.5, FishKind::Small));
        game.update(0.05);
        assert_eq!(game.state.fish.len(), 1);
        assert!((game.state.fish[0].x - 51.0).abs() < 1e-4);
    }

    #[test]
    fn catch_in_band_credits_exactly_one_fish() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        game.state.fish.push(parked_fish(0, 10.0, FishKind::Rare));
        game.state.fish.push(parked_fish(1, 40.0, FishKind::Large));
        game.state.fish.push(parked_fish(2, 60.0, FishKind::Medium));

        let events = game.attempt_catch(2);
        assert_eq!(events, vec![GameEvent::ScoreUpdate { player_id: 2, score: 30 }]);
        assert_eq!(game.state.fish.len(), 2);
        assert!(game.state.fish.iter().all(|f| f.id != 1));
        assert_eq!(game.state.scores.get(1), Some(0));
    }

    #[test]
    fn back_to_back_casts_cannot_share_a_fish() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        game.state.fish.push(parked_fish(0, 50.0, FishKind::Small));
        game.attempt_catch(1);
        assert!(game.attempt_catch(2).is_empty());
        assert_eq!(game.state.scores.get(1), Some(10));
        assert_eq!(game.state.scores.get(2), Some(0));
    }

    #[test]
    fn miss_is_a_noop_but_still_cues() {
        let feedback = RecordingFeedback::shared();
        let mut game = FishingGame::with_config(
            FishingConfig::default(),
            ScriptedRng::new().boxed(),
            Arc::clone(&feedback) as SharedFeedback,
        );
        game.init(&make_players(2));
        game.state.fish.push(parked_fish(0, 20.0, FishKind::Small));
        assert!(game.attempt_catch(1).is_empty());
        assert_eq!(game.state.fish.len(), 1);
        assert_eq!(feedback.count(Cue::Buzz), 1);
        assert_eq!(feedback.count(Cue::Pop), 0);
    }

    #[test]
    fn cast_from_stranger_is_ignored() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        game.state.fish.push(parked_fish(0, 50.0, FishKind::Small));
        assert!(game.attempt_catch(7).is_empty());
        assert_eq!(game.state.fish.len(), 1);
    }

    #[test]
    fn cast_via_input_bytes() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        game.state.fish.push(parked_fish(0, 50.0, FishKind::Medium));
        let events = game.apply_input(1, &encode(&FishingInput::Cast));
        assert_eq!(events, vec![GameEvent::ScoreUpdate { player_id: 1, score: 20 }]);
    }

    #[test]
    fn zero_clock_at_mount_ends_with_leader() {
        let config = FishingConfig {
            round_secs: 0.0,
            ..FishingConfig::default()
        };
        let mut game = FishingGame::with_config(config, ScriptedRng::new().boxed(), silent());
        game.init(&make_players(2));
        game.state.scores.set(1, 30);
        game.state.scores.set(2, 10);
        let events = game.update(0.0);
        assert_eq!(game_overs(&events), vec![Some(1)]);
        assert!(game.is_finished());
    }

    #[test]
    fn clock_runs_out_once() {
        let mut game = seeded_game();
        let players = make_players(3);
        game.init(&players);
        game.state.scores.set(3, 40);
        let events = run_game_ticks(&mut game, 610, 0.1);
        assert_eq!(game_overs(&events), vec![Some(3)]);
        partynight_core::test_helpers::contract_game_over_reported_once(&mut game, &events);
    }

    #[test]
    fn tie_goes_to_earlier_seat() {
        let config = FishingConfig {
            round_secs: 1.0,
            ..FishingConfig::default()
        };
        let mut game = FishingGame::with_config(config, ScriptedRng::new().boxed(), silent());
        game.init(&make_players(3));
        game.state.scores.set(2, 20);
        game.state.scores.set(3, 20);
        let events = game.update(1.0);
        assert_eq!(game_overs(&events), vec![Some(2)]);
    }

    #[test]
    fn nothing_moves_after_the_whistle() {
        let config = FishingConfig {
            round_secs: 0.5,
            ..FishingConfig::default()
        };
        let mut game = FishingGame::with_config(config, Box::new(StdGameRng::seeded(8)), silent());
        game.init(&make_players(1));
        game.update(0.5);
        game.state.fish.push(parked_fish(0, 50.0, FishKind::Small));
        run_game_ticks(&mut game, 40, 0.1);
        assert_eq!(game.state.fish.len(), 1);
        assert_eq!(game.state.fish[0].x, 50.0);
        assert!(game.attempt_catch(1).is_empty());
    }

    // ================================================================
    // Engine Contract Tests
    // ================================================================

    #[test]
    fn contract_init_creates_player_state() {
        let mut game = seeded_game();
        partynight_core::test_helpers::contract_init_creates_player_state(&mut game, 4);
    }

    #[test]
    fn contract_garbage_input_is_noop() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        partynight_core::test_helpers::contract_garbage_input_is_noop(&mut game, 1);
    }
}

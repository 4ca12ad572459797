pub mod feedback;
pub mod game_registry;
pub mod game_trait;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod time;
pub mod words;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use crate::feedback::{Cue, Feedback};
    use crate::game_trait::{GameEvent, PartyGame, PlayerId, RequestTicket, ServiceRequest};
    use crate::player::Player;
    use crate::rng::GameRng;

    /// Create `n` test players with sequential IDs starting at 1.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(i as PlayerId + 1, format!("Player{}", i + 1)))
            .collect()
    }

    /// RNG that replays scripted values. `next_u32_range` values are clamped
    /// into the requested range; `next_f64` values are clamped into
    /// `[0, 1)`. Once a queue runs dry it keeps returning the range minimum
    /// (or `0.0`).
    #[derive(Debug, Default)]
    pub struct ScriptedRng {
        ints: VecDeque<u32>,
        floats: VecDeque<f64>,
    }

    impl ScriptedRng {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_ints(mut self, values: impl IntoIterator<Item = u32>) -> Self {
            self.ints.extend(values);
            self
        }

        pub fn with_floats(mut self, values: impl IntoIterator<Item = f64>) -> Self {
            self.floats.extend(values);
            self
        }

        pub fn boxed(self) -> Box<dyn GameRng> {
            Box::new(self)
        }
    }

    impl GameRng for ScriptedRng {
        fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
            self.ints.pop_front().map_or(min, |v| v.clamp(min, max.max(min)))
        }

        fn next_f64(&mut self) -> f64 {
            self.floats
                .pop_front()
                .map_or(0.0, |v| v.clamp(0.0, 0.999_999))
        }
    }

    /// Feedback sink that records every cue for later assertions.
    #[derive(Debug, Default)]
    pub struct RecordingFeedback {
        cues: Mutex<Vec<Cue>>,
    }

    impl RecordingFeedback {
        pub fn shared() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn cues(&self) -> Vec<Cue> {
            self.cues.lock().map(|c| c.clone()).unwrap_or_default()
        }

        pub fn count(&self, cue: Cue) -> usize {
            self.cues().iter().filter(|&&c| c == cue).count()
        }
    }

    impl Feedback for RecordingFeedback {
        fn cue(&self, cue: Cue) {
            if let Ok(mut cues) = self.cues.lock() {
                cues.push(cue);
            }
        }
    }

    /// Run `n` updates of `dt` seconds, returning every event produced.
    pub fn run_game_ticks(game: &mut dyn PartyGame, n: usize, dt: f32) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt));
        }
        all_events
    }

    /// Encode an input the way a host would before `apply_input`.
    pub fn encode<T: serde::Serialize>(input: &T) -> Vec<u8> {
        rmp_serde::to_vec(input).expect("test input must encode")
    }

    /// All `GameOver` results in an event list.
    pub fn game_overs(events: &[GameEvent]) -> Vec<Option<PlayerId>> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameOver { winner_id } => Some(*winner_id),
                _ => None,
            })
            .collect()
    }

    /// The first service request in an event list.
    pub fn first_request(events: &[GameEvent]) -> Option<(RequestTicket, ServiceRequest)> {
        events.iter().find_map(|e| match e {
            GameEvent::ServiceRequest { ticket, request } => Some((*ticket, request.clone())),
            _ => None,
        })
    }

    // ================================================================
    // Engine Contract Tests
    // ================================================================
    // Every PartyGame implementation must pass these. Engine crates call
    // them from their own #[cfg(test)] modules with a concrete instance.

    /// After init() with N players, serialize_state() must return non-empty
    /// bytes and scores() must list every seat.
    pub fn contract_init_creates_player_state(game: &mut dyn PartyGame, player_count: usize) {
        let players = make_players(player_count);
        game.init(&players);
        assert!(
            !game.serialize_state().is_empty(),
            "serialize_state() must return non-empty bytes after init"
        );
        assert_eq!(
            game.scores().len(),
            player_count,
            "scores() must have one entry per seated player"
        );
    }

    /// Garbage input must be ignored without panicking or changing state.
    pub fn contract_garbage_input_is_noop(game: &mut dyn PartyGame, player_id: PlayerId) {
        let before = game.serialize_state();
        let events = game.apply_input(player_id, &[0xFF, 0xFE, 0x00, 0x01, 0xAB, 0xCD]);
        assert!(events.is_empty(), "garbage input must not produce events");
        assert_eq!(before, game.serialize_state(), "garbage input must not change state");
    }

    /// Once finished, an engine must never emit another GameOver.
    pub fn contract_game_over_reported_once(game: &mut dyn PartyGame, events_so_far: &[GameEvent]) {
        let mut overs = game_overs(events_so_far).len();
        overs += game_overs(&run_game_ticks(game, 200, 0.1)).len();
        assert!(overs <= 1, "GameOver must be emitted at most once, saw {overs}");
        assert!(game.is_finished(), "engine must be finished after GameOver");
    }

    /// A winner, when reported, must be one of the seated players.
    pub fn contract_winner_in_roster(events: &[GameEvent], players: &[Player]) {
        for winner in game_overs(events).into_iter().flatten() {
            assert!(
                players.iter().any(|p| p.id == winner),
                "winner {winner} is not in the roster"
            );
        }
    }
}

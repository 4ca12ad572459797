use serde::{Deserialize, Serialize};

/// Unique identifier for a player within one session.
pub type PlayerId = u64;

/// Correlates a [`ServiceRequest`] with the reply that answers it.
pub type RequestTicket = u64;

/// Core trait that every Partynight engine implements.
///
/// The host owns timers, input delivery and the word service; the engine
/// only holds its session state and reacts to discrete events. One engine
/// instance serves exactly one play-through.
pub trait PartyGame: Send {
    /// Game metadata for the selection screen.
    fn metadata(&self) -> GameMetadata;

    /// Mount the engine with the ordered roster and run one-time setup.
    fn init(&mut self, players: &[super::player::Player]) -> Vec<GameEvent>;

    /// Advance every internal timer by `dt` seconds.
    fn update(&mut self, dt: f32) -> Vec<GameEvent>;

    /// Apply one player action. Invalid or malformed actions are no-ops.
    fn apply_input(&mut self, player_id: PlayerId, input: &[u8]) -> Vec<GameEvent>;

    /// Deliver the answer to an earlier [`GameEvent::ServiceRequest`].
    /// Replies for tickets the engine no longer waits on are dropped.
    fn service_reply(&mut self, _ticket: RequestTicket, _reply: ServiceReply) -> Vec<GameEvent> {
        Vec::new()
    }

    /// Serialize the session state for a renderer.
    fn serialize_state(&self) -> Vec<u8>;

    /// Timer resolution in Hz the host should drive `update` at.
    fn tick_rate(&self) -> f32 {
        20.0
    }

    /// Whether the engine has reached its terminal phase.
    fn is_finished(&self) -> bool;

    /// Current per-player scores in roster order.
    fn scores(&self) -> Vec<PlayerScore>;
}

/// Game metadata for the selection screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub min_players: u8,
    pub max_players: u8,
}

/// Events emitted by an engine in response to input, timers or replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreUpdate {
        player_id: PlayerId,
        score: i32,
    },
    /// The engine needs the word service; answer via `service_reply`.
    ServiceRequest {
        ticket: RequestTicket,
        request: ServiceRequest,
    },
    /// Terminal result. Emitted at most once per engine.
    GameOver { winner_id: Option<PlayerId> },
    /// The player asked to leave the game screen.
    BackRequested,
}

/// Work an engine delegates to the word service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceRequest {
    NextLetter,
    ValidateWord {
        letter: char,
        category: String,
        word: String,
    },
}

/// Word service answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceReply {
    Letter(char),
    Verdict(bool),
}

/// Score entry for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player_id: PlayerId,
    pub score: i32,
}

/// Generates `serialize_state` and `is_finished` for an engine.
///
/// Requires the implementing struct to have a `state: $StateType` field and
/// `$StateType` to have a `finished: bool` field.
#[macro_export]
macro_rules! party_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
        }

        fn is_finished(&self) -> bool {
            self.state.finished
        }
    };
}

/// Decode a MessagePack input, logging and discarding anything malformed.
pub fn decode_input<T: serde::de::DeserializeOwned>(player_id: PlayerId, input: &[u8]) -> Option<T> {
    match rmp_serde::from_slice::<T>(input) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::debug!(player_id, error = %e, "Dropped malformed input");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    enum Probe {
        Poke { strength: u8 },
    }

    #[test]
    fn decode_input_accepts_valid_payload() {
        let data = rmp_serde::to_vec(&Probe::Poke { strength: 4 }).unwrap();
        assert_eq!(decode_input::<Probe>(1, &data), Some(Probe::Poke { strength: 4 }));
    }

    #[test]
    fn decode_input_drops_garbage() {
        assert_eq!(decode_input::<Probe>(1, &[0xFF, 0x00, 0xAB]), None);
    }
}

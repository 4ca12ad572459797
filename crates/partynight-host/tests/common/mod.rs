use std::sync::{Arc, Mutex};
use std::time::Duration;

use partynight_core::game_trait::{PartyGame, PlayerId};
use partynight_core::rng::StdGameRng;
use partynight_core::test_helpers::make_players;
use partynight_core::words::WordService;
use partynight_host::session::{
    EndGameCallback, GameSession, GameSessionConfig, SessionBroadcast, SessionEnd,
    spawn_game_session,
};

/// Every winner handed to `on_end_game`, in call order.
#[derive(Clone, Default)]
pub struct EndGameLog(Arc<Mutex<Vec<Option<PlayerId>>>>);

impl EndGameLog {
    pub fn callback(&self) -> EndGameCallback {
        let calls = Arc::clone(&self.0);
        Box::new(move |winner| calls.lock().unwrap().push(winner))
    }

    pub fn calls(&self) -> Vec<Option<PlayerId>> {
        self.0.lock().unwrap().clone()
    }
}

pub fn offline_words() -> Arc<WordService> {
    Arc::new(WordService::offline(Box::new(StdGameRng::seeded(99))))
}

/// Mount `game` with `players` seats and an offline word service.
pub fn start(game: Box<dyn PartyGame>, players: usize, log: &EndGameLog) -> GameSession {
    start_with_words(game, players, offline_words(), log)
}

pub fn start_with_words(
    game: Box<dyn PartyGame>,
    players: usize,
    words: Arc<WordService>,
    log: &EndGameLog,
) -> GameSession {
    spawn_game_session(
        game,
        GameSessionConfig {
            players: make_players(players),
            tick_rate_override: None,
        },
        words,
        log.callback(),
    )
}

/// Wait for the next state broadcast that satisfies `pred`.
pub async fn wait_for_state<T, F>(session: &mut GameSession, mut pred: F) -> T
where
    T: serde::de::DeserializeOwned,
    F: FnMut(&T) -> bool,
{
    let fut = async {
        loop {
            match session.broadcasts.recv().await {
                Some(SessionBroadcast::State(bytes)) => {
                    let state: T = rmp_serde::from_slice(&bytes).unwrap();
                    if pred(&state) {
                        return state;
                    }
                },
                Some(_) => {},
                None => panic!("session closed before the expected state"),
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(600), fut)
        .await
        .expect("timed out waiting for state")
}

/// Drain broadcasts until the session reports how it ended.
pub async fn wait_for_end(session: &mut GameSession) -> SessionEnd {
    loop {
        match session.broadcasts.recv().await {
            Some(SessionBroadcast::Ended(end)) => return end,
            Some(_) => {},
            None => panic!("session closed without an end broadcast"),
        }
    }
}

pub fn encode<T: serde::Serialize>(input: &T) -> Vec<u8> {
    rmp_serde::to_vec(input).unwrap()
}

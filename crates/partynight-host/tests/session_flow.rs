//! End-to-end session loop tests: engines mounted on the real tokio loop
//! with paused time, the offline word service and the end-game callback.

#[allow(dead_code)]
mod common;

use std::sync::Arc;

use async_trait::async_trait;

use partynight_core::feedback::silent;
use partynight_core::game_registry::{LuckVariant, UniversalMode};
use partynight_core::rng::StdGameRng;
use partynight_core::test_helpers::ScriptedRng;
use partynight_core::words::{ALPHABET, WordOracle, WordService, WordServiceError};
use partynight_host::session::{GameCommand, SessionBroadcast, SessionEnd};

use partynight_fishing::FishingGame;
use partynight_fishing::config::FishingConfig;
use partynight_names::config::NameGameConfig;
use partynight_names::{NameGame, NameGameInput, NameGameState, NamePhase};
use partynight_tower::config::TowerConfig;
use partynight_tower::{TowerGame, TowerInput};
use partynight_universal::config::UniversalConfig;
use partynight_universal::{UniversalGame, UniversalInput, UniversalState};

use common::{EndGameLog, encode, start, start_with_words, wait_for_end, wait_for_state};

#[tokio::test(start_paused = true)]
async fn tower_collapse_reports_no_winner_after_delay() {
    let log = EndGameLog::default();
    let game = TowerGame::with_config(
        TowerConfig {
            collapse_threshold: 1.0,
            ..TowerConfig::default()
        },
        Box::new(StdGameRng::seeded(3)),
        silent(),
    );
    let mut session = start(Box::new(game), 2, &log);

    let started = tokio::time::Instant::now();
    session
        .commands
        .send(GameCommand::Input {
            player_id: 1,
            data: encode(&TowerInput::Pull { block: 4 }),
        })
        .unwrap();

    assert_eq!(wait_for_end(&mut session).await, SessionEnd::Finished(None));
    // Display delay is 3 s of engine time; ticks run every 100 ms.
    assert!(started.elapsed() >= std::time::Duration::from_millis(2800));
    assert_eq!(session.task.await.unwrap(), SessionEnd::Finished(None));
    assert_eq!(log.calls(), vec![None]);
}

#[tokio::test(start_paused = true)]
async fn fishing_clock_runs_out_with_a_tie() {
    let log = EndGameLog::default();
    let game = FishingGame::with_config(
        FishingConfig {
            round_secs: 2.0,
            ..FishingConfig::default()
        },
        ScriptedRng::new().boxed(),
        silent(),
    );
    let mut session = start(Box::new(game), 3, &log);

    // Nobody catches anything: all tied at zero, first seat wins.
    assert_eq!(wait_for_end(&mut session).await, SessionEnd::Finished(Some(1)));
    assert_eq!(log.calls(), vec![Some(1)]);
}

#[tokio::test(start_paused = true)]
async fn name_game_round_with_offline_word_service() {
    let log = EndGameLog::default();
    let game = NameGame::with_config(
        NameGameConfig { round_count: 1 },
        Box::new(StdGameRng::seeded(8)),
        silent(),
    );
    let mut session = start(Box::new(game), 2, &log);

    let ready: NameGameState =
        wait_for_state(&mut session, |s: &NameGameState| s.phase == NamePhase::Ready).await;
    assert!(ALPHABET.contains(&ready.letter.unwrap()));

    session
        .commands
        .send(GameCommand::Input {
            player_id: 2,
            data: encode(&NameGameInput::Buzz),
        })
        .unwrap();

    // Word that cannot start with the round's letter: offline check says no.
    session
        .commands
        .send(GameCommand::Input {
            player_id: 2,
            data: encode(&NameGameInput::SubmitAnswer {
                word: "x".to_string(),
            }),
        })
        .unwrap();
    let advised: NameGameState =
        wait_for_state(&mut session, |s: &NameGameState| s.advisory.is_some()).await;
    assert_eq!(advised.advisory, Some(false));
    assert_eq!(advised.claimant, Some(2));

    session
        .commands
        .send(GameCommand::Input {
            player_id: 1,
            data: encode(&NameGameInput::Confirm { correct: true }),
        })
        .unwrap();

    let mut scores = Vec::new();
    let end = loop {
        match session.broadcasts.recv().await.unwrap() {
            SessionBroadcast::Score { player_id, score } => scores.push((player_id, score)),
            SessionBroadcast::Ended(end) => break end,
            SessionBroadcast::State(_) => {},
        }
    };
    assert_eq!(scores, vec![(2, 10)]);
    assert_eq!(end, SessionEnd::Finished(Some(2)));
    assert_eq!(log.calls(), vec![Some(2)]);
}

/// Oracle whose every call panics inside the service task.
struct PanickingOracle;

#[async_trait]
impl WordOracle for PanickingOracle {
    async fn generate_letter(&self) -> Result<String, WordServiceError> {
        panic!("letter oracle crashed")
    }

    async fn belongs_to_category(
        &self,
        _letter: char,
        _category: &str,
        _word: &str,
    ) -> Result<bool, WordServiceError> {
        panic!("category oracle crashed")
    }
}

#[tokio::test(start_paused = true)]
async fn crashed_word_service_task_is_answered_locally() {
    let log = EndGameLog::default();
    let words = Arc::new(WordService::with_oracle(
        Arc::new(PanickingOracle),
        Box::new(StdGameRng::seeded(5)),
    ));
    let game = NameGame::with_config(
        NameGameConfig { round_count: 1 },
        Box::new(StdGameRng::seeded(8)),
        silent(),
    );
    let mut session = start_with_words(Box::new(game), 2, words, &log);

    let ready: NameGameState =
        wait_for_state(&mut session, |s: &NameGameState| s.phase == NamePhase::Ready).await;
    let letter = ready.letter.unwrap();
    assert!(ALPHABET.contains(&letter));

    session
        .commands
        .send(GameCommand::Input {
            player_id: 1,
            data: encode(&NameGameInput::Buzz),
        })
        .unwrap();
    session
        .commands
        .send(GameCommand::Input {
            player_id: 1,
            data: encode(&NameGameInput::SubmitAnswer {
                word: format!("{letter}ار"),
            }),
        })
        .unwrap();

    // The crashed check falls back to the local prefix/length rule.
    let advised: NameGameState =
        wait_for_state(&mut session, |s: &NameGameState| s.advisory.is_some()).await;
    assert_eq!(advised.advisory, Some(true));
    assert_eq!(advised.phase, NamePhase::Validating);

    session
        .commands
        .send(GameCommand::Input {
            player_id: 2,
            data: encode(&NameGameInput::Confirm { correct: true }),
        })
        .unwrap();
    assert_eq!(wait_for_end(&mut session).await, SessionEnd::Finished(Some(1)));
    assert_eq!(log.calls(), vec![Some(1)]);
}

#[tokio::test(start_paused = true)]
async fn back_leaves_without_a_result() {
    let log = EndGameLog::default();
    let game = UniversalGame::with_config(
        UniversalMode::Luck(LuckVariant::Die),
        UniversalConfig::default(),
        Box::new(StdGameRng::seeded(5)),
        silent(),
    );
    let mut session = start(Box::new(game), 2, &log);
    for input in [UniversalInput::Act, UniversalInput::Back] {
        session
            .commands
            .send(GameCommand::Input {
                player_id: 1,
                data: encode(&input),
            })
            .unwrap();
    }
    assert_eq!(wait_for_end(&mut session).await, SessionEnd::Back);
    assert!(log.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn mash_race_through_the_loop() {
    let log = EndGameLog::default();
    let game = UniversalGame::with_config(
        UniversalMode::Mash,
        UniversalConfig {
            mash_goal: 3,
            ..UniversalConfig::default()
        },
        Box::new(StdGameRng::seeded(5)),
        silent(),
    );
    let mut session = start(Box::new(game), 2, &log);
    wait_for_state(&mut session, |s: &UniversalState| {
        s.phase == partynight_universal::UniversalPhase::Playing
    })
    .await;

    for player_id in [1, 2, 2, 1, 2, 1] {
        session
            .commands
            .send(GameCommand::Input {
                player_id,
                data: encode(&UniversalInput::Tap),
            })
            .unwrap();
    }
    assert_eq!(wait_for_end(&mut session).await, SessionEnd::Finished(Some(2)));
    assert_eq!(log.calls(), vec![Some(2)]);
}

#[tokio::test(start_paused = true)]
async fn stop_ends_without_callback() {
    let log = EndGameLog::default();
    let game = UniversalGame::with_config(
        UniversalMode::Prompt,
        UniversalConfig::default(),
        Box::new(StdGameRng::seeded(5)),
        silent(),
    );
    let mut session = start(Box::new(game), 1, &log);
    session.commands.send(GameCommand::Stop).unwrap();
    assert_eq!(wait_for_end(&mut session).await, SessionEnd::Stopped);
    assert!(log.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_sender_stops_the_session() {
    let log = EndGameLog::default();
    let game = UniversalGame::with_config(
        UniversalMode::Memory,
        UniversalConfig::default(),
        Box::new(StdGameRng::seeded(5)),
        silent(),
    );
    let session = start(Box::new(game), 1, &log);
    drop(session.commands);
    assert_eq!(session.task.await.unwrap(), SessionEnd::Stopped);
    assert!(log.calls().is_empty());
}

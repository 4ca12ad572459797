use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle, JoinSet};

use partynight_core::game_trait::{
    GameEvent, PartyGame, PlayerId, RequestTicket, ServiceReply, ServiceRequest,
};
use partynight_core::player::Player;
use partynight_core::words::{WordService, passes_local_checks};

/// Commands sent from the input side to the session loop.
#[derive(Debug)]
pub enum GameCommand {
    Input { player_id: PlayerId, data: Vec<u8> },
    Stop,
}

/// Why a session loop exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The engine reported its result.
    Finished(Option<PlayerId>),
    /// The player asked to leave the game screen.
    Back,
    /// Stopped by the host, or every command sender was dropped.
    Stopped,
}

/// Updates sent from the session loop to whoever renders it.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionBroadcast {
    Score { player_id: PlayerId, score: i32 },
    /// Serialized engine state, sent whenever it changes.
    State(Vec<u8>),
    Ended(SessionEnd),
}

/// Receives the winner exactly once, when the engine finishes.
pub type EndGameCallback = Box<dyn FnOnce(Option<PlayerId>) + Send>;

/// Configuration for one mounted engine.
pub struct GameSessionConfig {
    pub players: Vec<Player>,
    /// Overrides the engine's own tick rate.
    pub tick_rate_override: Option<f32>,
}

/// Handles returned by [`spawn_game_session`].
pub struct GameSession {
    pub commands: mpsc::UnboundedSender<GameCommand>,
    pub broadcasts: mpsc::UnboundedReceiver<SessionBroadcast>,
    pub task: JoinHandle<SessionEnd>,
}

/// Mount `game` and drive it on a tokio task until it finishes, the player
/// backs out, or the host stops it.
pub fn spawn_game_session(
    mut game: Box<dyn PartyGame>,
    config: GameSessionConfig,
    words: Arc<WordService>,
    on_end_game: EndGameCallback,
) -> GameSession {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (broadcast_tx, broadcast_rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(async move {
        let end = run_session(&mut *game, config, words, cmd_rx, &broadcast_tx).await;
        if let SessionEnd::Finished(winner_id) = end {
            on_end_game(winner_id);
        }
        let _ = broadcast_tx.send(SessionBroadcast::Ended(end));
        end
    });

    GameSession {
        commands: cmd_tx,
        broadcasts: broadcast_rx,
        task,
    }
}

/// Tick, input and word-service loop for a single engine.
async fn run_session(
    game: &mut dyn PartyGame,
    config: GameSessionConfig,
    words: Arc<WordService>,
    mut cmd_rx: mpsc::UnboundedReceiver<GameCommand>,
    broadcast_tx: &mpsc::UnboundedSender<SessionBroadcast>,
) -> SessionEnd {
    let roster: Vec<PlayerId> = config.players.iter().map(|p| p.id).collect();
    let mut services = ServiceCalls::new();
    let mut last_state: Vec<u8> = Vec::new();

    let metadata = game.metadata();
    tracing::info!(game = %metadata.name, players = roster.len(), "Session started");

    let events = game.init(&config.players);
    let mut outcome = handle_events(events, &roster, &words, &mut services, broadcast_tx);
    publish_state(game, &mut last_state, broadcast_tx);

    let tick_rate = config
        .tick_rate_override
        .unwrap_or_else(|| game.tick_rate())
        .max(0.1);
    let dt = 1.0 / tick_rate;
    let mut interval = tokio::time::interval(Duration::from_secs_f32(dt));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let end = loop {
        if let Some(end) = outcome {
            break end;
        }

        let events = tokio::select! {
            _ = interval.tick() => game.update(dt),
            cmd = cmd_rx.recv() => match cmd {
                Some(GameCommand::Input { player_id, data }) => game.apply_input(player_id, &data),
                Some(GameCommand::Stop) | None => break SessionEnd::Stopped,
            },
            Some((ticket, reply)) = services.next(&words), if !services.is_empty() => {
                game.service_reply(ticket, reply)
            },
        };

        outcome = handle_events(events, &roster, &words, &mut services, broadcast_tx);
        publish_state(game, &mut last_state, broadcast_tx);
    };

    // Nothing in flight may reach a torn-down engine.
    services.abort_all();
    tracing::info!(game = %metadata.name, ?end, "Session ended");
    end
}

/// Route engine events. Returns the session result once the engine asks to
/// be unmounted.
fn handle_events(
    events: Vec<GameEvent>,
    roster: &[PlayerId],
    words: &Arc<WordService>,
    services: &mut ServiceCalls,
    broadcast_tx: &mpsc::UnboundedSender<SessionBroadcast>,
) -> Option<SessionEnd> {
    for event in events {
        match event {
            GameEvent::ScoreUpdate { player_id, score } => {
                let _ = broadcast_tx.send(SessionBroadcast::Score { player_id, score });
            },
            GameEvent::ServiceRequest { ticket, request } => {
                services.spawn(words, ticket, request);
            },
            GameEvent::GameOver { winner_id } => {
                let winner_id = winner_id.filter(|id| {
                    let seated = roster.contains(id);
                    if !seated {
                        tracing::warn!(winner_id = id, "Engine reported an unseated winner");
                    }
                    seated
                });
                return Some(SessionEnd::Finished(winner_id));
            },
            GameEvent::BackRequested => return Some(SessionEnd::Back),
        }
    }
    None
}

/// In-flight word-service calls. Each task's request is kept until it
/// finishes so a task that dies can still be answered.
struct ServiceCalls {
    tasks: JoinSet<(RequestTicket, ServiceReply)>,
    pending: HashMap<task::Id, (RequestTicket, ServiceRequest)>,
}

impl ServiceCalls {
    fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
            pending: HashMap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn spawn(&mut self, words: &Arc<WordService>, ticket: RequestTicket, request: ServiceRequest) {
        let words = Arc::clone(words);
        let kept = request.clone();
        let handle = self
            .tasks
            .spawn(async move { (ticket, answer(&words, request).await) });
        self.pending.insert(handle.id(), (ticket, kept));
    }

    /// Next finished call. A panicked task is answered from local checks.
    async fn next(&mut self, words: &WordService) -> Option<(RequestTicket, ServiceReply)> {
        match self.tasks.join_next_with_id().await? {
            Ok((id, answered)) => {
                self.pending.remove(&id);
                Some(answered)
            },
            Err(e) => {
                let (ticket, request) = self.pending.remove(&e.id())?;
                tracing::warn!(error = %e, ticket, "Word service task failed, answering locally");
                Some((ticket, local_answer(words, &request)))
            },
        }
    }

    fn abort_all(&mut self) {
        self.tasks.abort_all();
        self.pending.clear();
    }
}

/// Reply built without the oracle.
fn local_answer(words: &WordService, request: &ServiceRequest) -> ServiceReply {
    match request {
        ServiceRequest::NextLetter => ServiceReply::Letter(words.local_letter()),
        ServiceRequest::ValidateWord { letter, word, .. } => {
            ServiceReply::Verdict(passes_local_checks(*letter, word))
        },
    }
}

async fn answer(words: &WordService, request: ServiceRequest) -> ServiceReply {
    match request {
        ServiceRequest::NextLetter => ServiceReply::Letter(words.next_letter().await),
        ServiceRequest::ValidateWord {
            letter,
            category,
            word,
        } => ServiceReply::Verdict(words.validate_word(letter, &category, &word).await),
    }
}

fn publish_state(
    game: &dyn PartyGame,
    last_state: &mut Vec<u8>,
    broadcast_tx: &mpsc::UnboundedSender<SessionBroadcast>,
) {
    let state = game.serialize_state();
    if state != *last_state {
        let _ = broadcast_tx.send(SessionBroadcast::State(state.clone()));
        *last_state = state;
    }
}

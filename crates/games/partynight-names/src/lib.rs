pub mod categories;
pub mod config;
pub mod scoring;

use serde::{Deserialize, Serialize};

use partynight_core::feedback::{Cue, SharedFeedback};
use partynight_core::game_trait::{
    GameEvent, GameMetadata, PartyGame, PlayerId, PlayerScore, RequestTicket, ServiceReply,
    ServiceRequest, decode_input,
};
use partynight_core::party_game_boilerplate;
use partynight_core::player::Player;
use partynight_core::rng::BoxedRng;
use partynight_core::scoring::ScoreBoard;
use partynight_core::time::GameOverLatch;

use categories::CATEGORIES;
use config::NameGameConfig;

/// Round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamePhase {
    /// Waiting for the word service to hand out a letter.
    Loading,
    /// Letter and category are up; first buzz wins the claim.
    Ready,
    /// A claimant is answering; the referee decides.
    Validating,
    Finished,
}

/// Input from a player or the referee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameGameInput {
    Buzz,
    /// The claimant types the word they said, for an advisory check.
    SubmitAnswer { word: String },
    /// Referee verdict on the current claim.
    Confirm { correct: bool },
}

/// Serializable round state for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameGameState {
    /// Zero-based round index.
    pub round: u32,
    pub round_count: u32,
    pub phase: NamePhase,
    pub letter: Option<char>,
    pub category: String,
    pub claimant: Option<PlayerId>,
    pub answer: Option<String>,
    /// Word service opinion on `answer`, shown to the referee.
    pub advisory: Option<bool>,
    pub scores: ScoreBoard,
    pub finished: bool,
}

/// The letter-and-category buzzer game.
pub struct NameGame {
    state: NameGameState,
    pending_letter: Option<RequestTicket>,
    pending_verdict: Option<RequestTicket>,
    next_ticket: RequestTicket,
    rng: BoxedRng,
    feedback: SharedFeedback,
    game_over: GameOverLatch,
    game_config: NameGameConfig,
}

impl NameGame {
    pub fn new(rng: BoxedRng, feedback: SharedFeedback) -> Self {
        Self::with_config(NameGameConfig::load(), rng, feedback)
    }

    pub fn with_config(config: NameGameConfig, rng: BoxedRng, feedback: SharedFeedback) -> Self {
        Self {
            state: fresh_state(&config, &[]),
            pending_letter: None,
            pending_verdict: None,
            next_ticket: 1,
            rng,
            feedback,
            game_over: GameOverLatch::default(),
            game_config: config,
        }
    }

    /// Claim the round. Only the first buzz while `Ready` counts.
    pub fn buzz(&mut self, player_id: PlayerId) -> Vec<GameEvent> {
        if self.state.phase != NamePhase::Ready || !self.state.scores.contains(player_id) {
            return Vec::new();
        }
        self.feedback.cue(Cue::Buzz);
        self.state.claimant = Some(player_id);
        self.state.phase = NamePhase::Validating;
        tracing::debug!(player_id, round = self.state.round, "Buzz accepted");
        Vec::new()
    }

    /// Claimant's spoken answer, checked by the word service for the
    /// referee's benefit. One submission per claim.
    pub fn submit_answer(&mut self, player_id: PlayerId, word: String) -> Vec<GameEvent> {
        if self.state.phase != NamePhase::Validating
            || self.state.claimant != Some(player_id)
            || self.state.answer.is_some()
        {
            return Vec::new();
        }
        let Some(letter) = self.state.letter else {
            return Vec::new();
        };
        let ticket = self.issue_ticket();
        self.pending_verdict = Some(ticket);
        self.state.answer = Some(word.clone());
        vec![GameEvent::ServiceRequest {
            ticket,
            request: ServiceRequest::ValidateWord {
                letter,
                category: self.state.category.clone(),
                word,
            },
        }]
    }

    /// Referee verdict. Scores the claimant and moves on.
    pub fn confirm(&mut self, correct: bool) -> Vec<GameEvent> {
        if self.state.phase != NamePhase::Validating {
            return Vec::new();
        }
        let Some(claimant) = self.state.claimant else {
            return Vec::new();
        };

        let mut events = Vec::new();
        self.feedback.cue(if correct { Cue::Win } else { Cue::Lose });
        if let Some(score) = self
            .state
            .scores
            .add(claimant, scoring::verdict_points(correct))
        {
            events.push(GameEvent::ScoreUpdate {
                player_id: claimant,
                score,
            });
        }
        self.pending_verdict = None;

        if self.state.round + 1 >= self.state.round_count {
            self.state.phase = NamePhase::Finished;
            self.state.finished = true;
            let winner_id = self.state.scores.leader();
            tracing::info!(?winner_id, "Name game over");
            events.extend(self.game_over.fire_now(winner_id));
        } else {
            self.state.round += 1;
            events.extend(self.start_round());
        }
        events
    }

    fn start_round(&mut self) -> Vec<GameEvent> {
        self.state.phase = NamePhase::Loading;
        self.state.letter = None;
        self.state.claimant = None;
        self.state.answer = None;
        self.state.advisory = None;
        self.state.category = CATEGORIES[self.rng.pick_index(CATEGORIES.len())].to_string();

        let ticket = self.issue_ticket();
        self.pending_letter = Some(ticket);
        vec![GameEvent::ServiceRequest {
            ticket,
            request: ServiceRequest::NextLetter,
        }]
    }

    fn issue_ticket(&mut self) -> RequestTicket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }
}

fn fresh_state(config: &NameGameConfig, players: &[Player]) -> NameGameState {
    NameGameState {
        round: 0,
        round_count: config.round_count.max(1),
        phase: NamePhase::Loading,
        letter: None,
        category: String::new(),
        claimant: None,
        answer: None,
        advisory: None,
        scores: ScoreBoard::new(players),
        finished: false,
    }
}

impl PartyGame for NameGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Name game".to_string(),
            description: "Find words faster than everyone else.".to_string(),
            min_players: 2,
            max_players: 4,
        }
    }

    fn tick_rate(&self) -> f32 {
        4.0
    }

    fn init(&mut self, players: &[Player]) -> Vec<GameEvent> {
        self.state = fresh_state(&self.game_config, players);
        self.pending_letter = None;
        self.pending_verdict = None;
        self.game_over = GameOverLatch::default();
        self.start_round()
    }

    fn update(&mut self, _dt: f32) -> Vec<GameEvent> {
        Vec::new()
    }

    fn apply_input(&mut self, player_id: PlayerId, input: &[u8]) -> Vec<GameEvent> {
        match decode_input::<NameGameInput>(player_id, input) {
            Some(NameGameInput::Buzz) => self.buzz(player_id),
            Some(NameGameInput::SubmitAnswer { word }) => self.submit_answer(player_id, word),
            Some(NameGameInput::Confirm { correct }) => self.confirm(correct),
            None => Vec::new(),
        }
    }

    fn service_reply(&mut self, ticket: RequestTicket, reply: ServiceReply) -> Vec<GameEvent> {
        match reply {
            ServiceReply::Letter(letter)
                if self.pending_letter == Some(ticket) && self.state.phase == NamePhase::Loading =>
            {
                self.pending_letter = None;
                self.state.letter = Some(letter);
                self.state.phase = NamePhase::Ready;
                tracing::debug!(round = self.state.round, %letter, category = %self.state.category, "Round ready");
            },
            ServiceReply::Verdict(verdict)
                if self.pending_verdict == Some(ticket)
                    && self.state.phase == NamePhase::Validating =>
            {
                self.pending_verdict = None;
                self.state.advisory = Some(verdict);
            },
            _ => {
                tracing::debug!(ticket, ?reply, "Dropped stale service reply");
            },
        }
        Vec::new()
    }

    party_game_boilerplate!(state_type: NameGameState);

    fn scores(&self) -> Vec<PlayerScore> {
        self.state.scores.to_vec()
    }
}

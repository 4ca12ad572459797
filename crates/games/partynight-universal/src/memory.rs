//! Pair matching over a shuffled deck.

use serde::{Deserialize, Serialize};

use partynight_core::feedback::Cue;
use partynight_core::game_trait::GameEvent;
use partynight_core::rng::{GameRng, shuffle};
use partynight_core::time::Countdown;

use crate::{ModeCtx, UniversalPhase};

/// Card faces, in dealing order.
pub const SYMBOLS: [&str; 8] = ["🍎", "🍌", "🍒", "🍇", "🍉", "🥝", "🍋", "🥭"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCard {
    pub id: u32,
    pub symbol: String,
    pub is_face_up: bool,
    pub is_matched: bool,
}

/// Two face-up cards waiting out their reveal delay.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PendingPair {
    first: usize,
    second: usize,
    matched: bool,
    delay: Countdown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryState {
    pub cards: Vec<MemoryCard>,
    /// Indices flipped this turn, at most two.
    pub face_up: Vec<usize>,
    pending: Option<PendingPair>,
}

impl MemoryState {
    /// Deal `pairs` pairs (capped at [`SYMBOLS`]) and shuffle them once.
    pub fn deal(pairs: usize, rng: &mut dyn GameRng) -> Self {
        let symbols = &SYMBOLS[..pairs.clamp(1, SYMBOLS.len())];
        let mut faces: Vec<&str> = symbols.iter().chain(symbols.iter()).copied().collect();
        shuffle(&mut faces, rng);
        let cards = faces
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| MemoryCard {
                id: id as u32,
                symbol: symbol.to_string(),
                is_face_up: false,
                is_matched: false,
            })
            .collect();
        Self {
            cards,
            face_up: Vec::new(),
            pending: None,
        }
    }

    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.is_matched)
    }

    pub fn is_resolving(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn flip(&mut self, index: usize, ctx: &mut ModeCtx<'_>) {
        if *ctx.phase != UniversalPhase::Playing || self.face_up.len() >= 2 {
            return;
        }
        let Some(card) = self.cards.get_mut(index) else {
            return;
        };
        if card.is_face_up || card.is_matched {
            return;
        }

        ctx.feedback.cue(Cue::Click);
        card.is_face_up = true;
        self.face_up.push(index);

        if let [first, second] = self.face_up[..] {
            let matched = self.cards[first].symbol == self.cards[second].symbol;
            let delay = if matched {
                ctx.feedback.cue(Cue::Win);
                ctx.config.memory_match_reveal
            } else {
                ctx.config.memory_mismatch_hide
            };
            self.pending = Some(PendingPair {
                first,
                second,
                matched,
                delay: Countdown::new(delay),
            });
        }
    }

    pub(crate) fn tick(&mut self, dt: f32, ctx: &mut ModeCtx<'_>) -> Vec<GameEvent> {
        let Some(pending) = self.pending.as_mut() else {
            return Vec::new();
        };
        if !pending.delay.tick(dt) {
            return Vec::new();
        }
        let PendingPair {
            first,
            second,
            matched,
            ..
        } = *pending;
        self.pending = None;
        self.face_up.clear();

        for idx in [first, second] {
            let card = &mut self.cards[idx];
            if matched {
                card.is_matched = true;
            } else {
                card.is_face_up = false;
            }
        }

        if !self.all_matched() {
            return Vec::new();
        }
        // Solo-first mode: the first seat takes the win.
        *ctx.phase = UniversalPhase::Ended;
        let winner = ctx.roster.first().copied();
        tracing::info!(?winner, "Memory board cleared");
        ctx.game_over.fire_now(winner).into_iter().collect()
    }
}

//! Timer primitives advanced by `PartyGame::update`.
//!
//! Engines never spawn timers of their own. Every delay is an accumulator
//! stepped by the host's `dt`, so dropping an engine cancels all of them.

use serde::{Deserialize, Serialize};

use crate::game_trait::{GameEvent, PlayerId};

/// One-shot delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining: secs.max(0.0),
        }
    }

    /// Advance by `dt`; returns true once the delay has elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt).max(0.0);
        self.remaining <= 0.0
    }
}

/// Fixed-period repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    period: f32,
    elapsed: f32,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`; returns how many periods completed.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.elapsed += dt.max(0.0);
        let fires = (self.elapsed / self.period).floor();
        self.elapsed -= fires * self.period;
        fires as u32
    }
}

/// Guards the single `GameOver` an engine may emit, optionally after a
/// display delay.
#[derive(Debug, Clone, Default)]
pub struct GameOverLatch {
    pending: Option<(Countdown, Option<PlayerId>)>,
    reported: bool,
}

impl GameOverLatch {
    /// Report `winner_id` after `delay` seconds. Ignored if a result is
    /// already scheduled or reported.
    pub fn schedule(&mut self, delay: f32, winner_id: Option<PlayerId>) {
        if self.reported || self.pending.is_some() {
            return;
        }
        self.pending = Some((Countdown::new(delay), winner_id));
    }

    /// Report immediately. Returns `None` if a result already went out or
    /// is scheduled.
    pub fn fire_now(&mut self, winner_id: Option<PlayerId>) -> Option<GameEvent> {
        if self.reported || self.pending.is_some() {
            return None;
        }
        self.reported = true;
        Some(GameEvent::GameOver { winner_id })
    }

    pub fn tick(&mut self, dt: f32) -> Option<GameEvent> {
        let (countdown, winner_id) = self.pending.as_mut()?;
        if !countdown.tick(dt) {
            return None;
        }
        let winner_id = *winner_id;
        self.pending = None;
        self.reported = true;
        Some(GameEvent::GameOver { winner_id })
    }
}

use serde::{Deserialize, Serialize};

use partynight_core::rng::GameRng;

use crate::config::FishingConfig;

/// Fish category, rarest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FishKind {
    Rare,
    Large,
    Medium,
    Small,
}

impl FishKind {
    /// Map a uniform roll in `[0, 1)` onto the category weights:
    /// 10% rare, 20% large, 30% medium, 40% small.
    pub fn from_roll(roll: f64) -> Self {
        if roll > 0.9 {
            Self::Rare
        } else if roll > 0.7 {
            Self::Large
        } else if roll > 0.4 {
            Self::Medium
        } else {
            Self::Small
        }
    }

    pub fn points(self) -> i32 {
        match self {
            Self::Rare => 50,
            Self::Large => 30,
            Self::Medium => 20,
            Self::Small => 10,
        }
    }
}

/// Horizontal travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// A live fish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: FishKind,
    /// Distance covered per motion step.
    pub speed: f32,
    pub heading: Heading,
    pub points: i32,
}

impl Fish {
    /// Roll a new fish just outside one edge, heading inward.
    ///
    /// Draw order: category, side, lane, speed.
    pub fn spawn(id: u32, rng: &mut dyn GameRng, config: &FishingConfig) -> Self {
        let kind = FishKind::from_roll(rng.next_f64());
        let (x, heading) = if rng.next_f64() < 0.5 {
            (config.spawn_left_x, Heading::Right)
        } else {
            (config.spawn_right_x, Heading::Left)
        };
        let y = rng.next_f32_range(config.lane_top, config.lane_bottom);
        let speed = rng.next_f32_range(config.speed_min, config.speed_max);
        Self {
            id,
            x,
            y,
            kind,
            speed,
            heading,
            points: kind.points(),
        }
    }

    /// One motion step.
    pub fn swim(&mut self) {
        self.x += self.speed * self.heading.sign();
    }
}

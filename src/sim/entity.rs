//! Entities: the player and the things falling toward them

use glam::Vec2;
use rand::Rng;

use crate::assets::SpriteId;
use crate::tuning::Tuning;

/// Discrete horizontal move intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Transient entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Obstacle,
    Coin,
    PowerUp,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Obstacle, EntityKind::Coin, EntityKind::PowerUp];

    pub fn sprite(self) -> SpriteId {
        match self {
            EntityKind::Obstacle => SpriteId::Obstacle,
            EntityKind::Coin => SpriteId::Coin,
            EntityKind::PowerUp => SpriteId::PowerUp,
        }
    }

    /// Height used for collision math
    pub fn height(self, tuning: &Tuning) -> f32 {
        // All three kinds share the obstacle footprint
        match self {
            EntityKind::Obstacle | EntityKind::Coin | EntityKind::PowerUp => {
                tuning.obstacle_height
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Obstacle => "obstacle",
            EntityKind::Coin => "coin",
            EntityKind::PowerUp => "power-up",
        }
    }
}

/// An obstacle, coin or power-up descending through one lane
#[derive(Debug, Clone, PartialEq)]
pub struct FallingEntity {
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Descent speed in pixels per millisecond, fixed at spawn
    speed: f32,
    /// Set while the entity overlaps the player after applying its effect
    pub touched: bool,
}

impl FallingEntity {
    pub fn new(kind: EntityKind, pos: Vec2, speed: f32) -> Self {
        Self {
            kind,
            pos,
            speed,
            touched: false,
        }
    }

    /// Spawn above the playfield at `x` with a random speed from the tuning range
    pub fn spawn(kind: EntityKind, x: f32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let speed = rng.random_range(tuning.min_speed..tuning.max_speed);
        Self::new(kind, Vec2::new(x, tuning.spawn_y()), speed)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn sprite(&self) -> SpriteId {
        self.kind.sprite()
    }

    /// Advance by `elapsed_ms` milliseconds
    pub fn update(&mut self, elapsed_ms: f32) {
        self.pos.y += self.speed * elapsed_ms;
    }

    /// True once the entity has left the bottom of the playfield
    pub fn is_gone(&self, tuning: &Tuning) -> bool {
        self.pos.y > tuning.height
    }
}

/// The player sprite, pinned to the resting line and snapped to lanes
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Derived from `lane`; never accumulated
    pub pos: Vec2,
    pub sprite: SpriteId,
    lane: usize,
}

impl Player {
    /// Start in the third lane on the resting line
    pub fn new(tuning: &Tuning) -> Self {
        let lane = 2.min(Self::last_lane(tuning));
        Self {
            pos: Vec2::new(lane as f32 * tuning.player_width, tuning.player_y()),
            sprite: SpriteId::Player,
            lane,
        }
    }

    pub fn lane(&self) -> usize {
        self.lane
    }

    /// Rightmost reachable lane, where x = width - player_width
    pub fn last_lane(tuning: &Tuning) -> usize {
        ((tuning.width / tuning.player_width) as usize).saturating_sub(1)
    }

    /// Shift one lane; moves past either edge are ignored
    pub fn shift(&mut self, direction: Direction, tuning: &Tuning) {
        self.lane = match direction {
            Direction::Left => self.lane.saturating_sub(1),
            Direction::Right => (self.lane + 1).min(Self::last_lane(tuning)),
        };
        self.pos.x = self.lane as f32 * tuning.player_width;
    }
}

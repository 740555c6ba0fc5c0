//! Lane Dash - a lane-based dodge-and-collect arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, lanes, collisions, session state)
//! - `render`: Draw-order and HUD logic against an abstract drawing surface
//! - `driver`: Frame timing, input intents and restart handling
//! - `tuning`: Data-driven game balance
//! - `assets`: Logical sprite/sound names resolved once at startup

pub mod assets;
pub mod driver;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod platform;

pub use assets::{AssetError, AssetTable, Sound, SpriteId};
pub use driver::{Clock, Driver, FrameOutcome, Intent, SoundPlayer};
pub use render::{Surface, TextStyle, draw_frame};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical pixels)
    pub const GAME_WIDTH: f32 = 375.0;
    pub const GAME_HEIGHT: f32 = 500.0;

    /// Obstacle footprint; the width doubles as the lane unit
    pub const ENEMY_WIDTH: f32 = 75.0;
    pub const ENEMY_HEIGHT: f32 = 156.0;

    /// Target live populations
    pub const MAX_ENEMIES: usize = 3;
    pub const MAX_COINS: usize = 1;
    pub const MAX_STARS: usize = 1;

    /// Player footprint
    pub const PLAYER_WIDTH: f32 = 75.0;
    pub const PLAYER_HEIGHT: f32 = 54.0;
    /// Gap between the player's feet and the bottom edge
    pub const PLAYER_FLOOR_GAP: f32 = 10.0;

    /// Descent speed range, pixels per millisecond
    pub const MIN_SPEED: f32 = 0.25;
    pub const MAX_SPEED: f32 = 0.75;

    /// Collision fires this many pixels before the sprites touch
    pub const COLLISION_MARGIN: f32 = 20.0;

    /// Scoring and shield rules
    pub const ENEMY_PENALTY: i64 = 1000;
    pub const COIN_BONUS: u64 = 5000;
    pub const STAR_SHIELD: i64 = 25;
    pub const STAR_SHIELD_CEILING: i64 = 5000;
    pub const HARD_MODE_SCORE: u64 = 1_000_000;
    pub const UNLOCK_SCORE: u64 = 1_500_000;
}

//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so a session can be
//! rebalanced (or shrunk for tests) without touching gameplay code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::collision::OverlapMode;

/// Balance data rejected at startup
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("playfield must be positive, got {width}x{height}")]
    EmptyPlayfield { width: f32, height: f32 },

    #[error("lane width must be positive, got {0}")]
    BadLaneWidth(f32),

    #[error("{kind} target {target} exceeds the {lanes} available lanes")]
    TooCrowded {
        kind: &'static str,
        target: usize,
        lanes: usize,
    },

    #[error(
        "player width {player_width} must equal the lane width {lane_width} and tile the {width} wide playfield"
    )]
    OffGrid {
        player_width: f32,
        lane_width: f32,
        width: f32,
    },

    #[error("speed range [{min}, {max}) is empty or negative")]
    BadSpeedRange { min: f32, max: f32 },

    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal size of one lane (also the obstacle width)
    pub lane_width: f32,
    pub obstacle_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_floor_gap: f32,

    pub obstacle_target: usize,
    pub coin_target: usize,
    pub power_up_target: usize,

    pub min_speed: f32,
    pub max_speed: f32,
    pub collision_margin: f32,

    /// Shield the player starts each session with
    pub initial_shield: i64,
    pub obstacle_penalty: i64,
    pub coin_bonus: u64,
    pub power_up_shield: i64,
    /// Power-ups only apply while shield is at or below this
    pub power_up_ceiling: i64,

    /// Score above which one extra obstacle joins the field
    pub hard_mode_score: u64,
    /// Score above which the alternate player sprite is unlocked
    pub unlock_score: u64,

    pub overlap_mode: OverlapMode,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            lane_width: ENEMY_WIDTH,
            obstacle_height: ENEMY_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_floor_gap: PLAYER_FLOOR_GAP,

            obstacle_target: MAX_ENEMIES,
            coin_target: MAX_COINS,
            power_up_target: MAX_STARS,

            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            collision_margin: COLLISION_MARGIN,

            initial_shield: 0,
            obstacle_penalty: ENEMY_PENALTY,
            coin_bonus: COIN_BONUS,
            power_up_shield: STAR_SHIELD,
            power_up_ceiling: STAR_SHIELD_CEILING,

            hard_mode_score: HARD_MODE_SCORE,
            unlock_score: UNLOCK_SCORE,

            overlap_mode: OverlapMode::Level,
        }
    }
}

impl Tuning {
    /// Parse balance data from JSON, filling gaps with defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Number of spawn lanes: playfield height divided by the lane unit
    pub fn lane_count(&self) -> usize {
        (self.height / self.lane_width).floor() as usize
    }

    /// Resting y of the player
    pub fn player_y(&self) -> f32 {
        self.height - self.player_height - self.player_floor_gap
    }

    /// Spawn y for transient entities (fully above the visible area)
    pub fn spawn_y(&self) -> f32 {
        -self.obstacle_height
    }

    /// Check that a session built from this tuning can hold its populations
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(TuningError::EmptyPlayfield {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.lane_width > 0.0) {
            return Err(TuningError::BadLaneWidth(self.lane_width));
        }
        let columns = self.width / self.player_width;
        if self.player_width != self.lane_width || columns < 1.0 || columns.fract() != 0.0 {
            return Err(TuningError::OffGrid {
                player_width: self.player_width,
                lane_width: self.lane_width,
                width: self.width,
            });
        }
        if !(self.min_speed >= 0.0 && self.min_speed < self.max_speed) {
            return Err(TuningError::BadSpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        let lanes = self.lane_count();
        // Obstacles escalate by one mid-session
        let targets = [
            ("obstacle", self.obstacle_target + 1),
            ("coin", self.coin_target),
            ("power-up", self.power_up_target),
        ];
        for (kind, target) in targets {
            if target > lanes {
                return Err(TuningError::TooCrowded {
                    kind,
                    target,
                    lanes,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_classic_layout() {
        let tuning = Tuning::default();
        assert_eq!(tuning.lane_count(), 6);
        assert_eq!(tuning.player_y(), 436.0);
        assert_eq!(tuning.spawn_y(), -156.0);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "coin_bonus": 10 }"#).unwrap();
        assert_eq!(tuning.coin_bonus, 10);
        assert_eq!(tuning.obstacle_target, MAX_ENEMIES);
    }

    #[test]
    fn test_rejects_crowded_field() {
        let tuning = Tuning {
            obstacle_target: 6,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::TooCrowded { kind: "obstacle", target: 7, lanes: 6 })
        ));
    }

    #[test]
    fn test_rejects_player_off_the_lane_grid() {
        let wide_player = Tuning {
            player_width: 100.0,
            ..Tuning::default()
        };
        assert!(matches!(
            wide_player.validate(),
            Err(TuningError::OffGrid { player_width: 100.0, .. })
        ));

        let ragged_field = Tuning {
            width: 400.0,
            ..Tuning::default()
        };
        assert!(matches!(ragged_field.validate(), Err(TuningError::OffGrid { .. })));

        let json = r#"{ "player_width": 100.0 }"#;
        assert!(matches!(Tuning::from_json(json), Err(TuningError::OffGrid { .. })));

        let wider_grid = Tuning {
            width: 500.0,
            lane_width: 100.0,
            player_width: 100.0,
            ..Tuning::default()
        };
        assert!(wider_grid.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_json_and_speed() {
        assert!(matches!(Tuning::from_json("{"), Err(TuningError::Json(_))));

        let tuning = Tuning {
            min_speed: 1.0,
            max_speed: 0.5,
            ..Tuning::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::BadSpeedRange { .. })));
    }
}

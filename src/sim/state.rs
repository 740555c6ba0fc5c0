//! Session state
//!
//! Everything a single play session owns. Only the tick and the collision
//! rules mutate it; the driver replaces it wholesale on restart.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{EntityKind, Player};
use super::population::Population;
use crate::assets::Sound;
use crate::tuning::{Tuning, TuningError};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Terminal; only a full reset leaves it
    Dead,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShieldHit { hits: u32 },
    CoinCollected,
    PowerUpCollected,
    PlayerDied { score: u64 },
    /// One more obstacle joins the field
    HardModeStarted,
    AltSpriteUnlocked,
}

impl GameEvent {
    /// Sound to play for this event, if any
    pub fn sound(&self) -> Option<Sound> {
        match self {
            GameEvent::CoinCollected => Some(Sound::Coin),
            GameEvent::PlayerDied { .. } => Some(Sound::Death),
            GameEvent::HardModeStarted => Some(Sound::HardMode),
            GameEvent::AltSpriteUnlocked => Some(Sound::Unlock),
            GameEvent::ShieldHit { .. } | GameEvent::PowerUpCollected => None,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    pub obstacles: Population,
    pub coins: Population,
    pub power_ups: Population,
    /// Never decreases
    pub score: u64,
    /// May go negative internally; shown clamped at zero
    pub shield: i64,
    /// Difficulty escalation already fired
    pub hard_mode: bool,
    /// Alternate player sprite already unlocked
    pub alt_unlocked: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent ticks, drained by the driver
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session: validate the tuning and fill every population
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            player: Player::new(&tuning),
            obstacles: Population::new(EntityKind::Obstacle, tuning.obstacle_target, &tuning),
            coins: Population::new(EntityKind::Coin, tuning.coin_target, &tuning),
            power_ups: Population::new(EntityKind::PowerUp, tuning.power_up_target, &tuning),
            score: 0,
            shield: tuning.initial_shield,
            hard_mode: false,
            alt_unlocked: false,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        };
        state.refill_populations();

        log::info!("Session started with seed {}", seed);
        Ok(state)
    }

    pub fn is_dead(&self) -> bool {
        self.phase == GamePhase::Dead
    }

    /// Shield as shown to the player
    pub fn displayed_shield(&self) -> i64 {
        self.shield.max(0)
    }

    pub fn population(&self, kind: EntityKind) -> &Population {
        match kind {
            EntityKind::Obstacle => &self.obstacles,
            EntityKind::Coin => &self.coins,
            EntityKind::PowerUp => &self.power_ups,
        }
    }

    /// Prune then replenish every kind, each independently
    pub fn refill_populations(&mut self) {
        for kind in EntityKind::ALL {
            let pop = match kind {
                EntityKind::Obstacle => &mut self.obstacles,
                EntityKind::Coin => &mut self.coins,
                EntityKind::PowerUp => &mut self.power_ups,
            };
            pop.prune(&self.tuning);
            if let Err(e) = pop.replenish(&self.tuning, &mut self.rng) {
                log::error!("Population invariant broken: {}", e);
                debug_assert!(false, "{e}");
            }
        }
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_fully_populated() {
        let state = GameState::new(42, Tuning::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.obstacles.live(), 3);
        assert_eq!(state.coins.live(), 1);
        assert_eq!(state.power_ups.live(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.shield, 0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(7, Tuning::default()).unwrap();
        let b = GameState::new(7, Tuning::default()).unwrap();
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.coins, b.coins);
        assert_eq!(a.power_ups, b.power_ups);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            coin_target: 9,
            ..Tuning::default()
        };
        assert!(GameState::new(1, tuning).is_err());
    }

    #[test]
    fn test_displayed_shield_clamped() {
        let mut state = GameState::new(1, Tuning::default()).unwrap();
        state.shield = -3000;
        assert_eq!(state.displayed_shield(), 0);
        state.shield = 25;
        assert_eq!(state.displayed_shield(), 25);
    }

    #[test]
    fn test_event_sounds() {
        assert_eq!(GameEvent::CoinCollected.sound(), Some(Sound::Coin));
        assert_eq!(GameEvent::PlayerDied { score: 1 }.sound(), Some(Sound::Death));
        assert_eq!(GameEvent::PowerUpCollected.sound(), None);
    }
}

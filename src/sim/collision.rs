//! Player/entity overlap and the shield and score rules it drives
//!
//! Overlap is lane-based: an entity touches the player when it shares the
//! player's lane and its lower edge (less a small margin) has passed the
//! player's top.

use serde::{Deserialize, Serialize};

use super::entity::{FallingEntity, Player};
use super::population::Population;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// When an overlapping entity applies its effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapMode {
    /// Every tick the overlap persists
    #[default]
    Level,
    /// Once per entry: on the first overlapping tick, again only after the
    /// overlap has been broken
    Edge,
}

/// What one tick of collisions did to the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub obstacle_hits: u32,
    pub coins: u32,
    pub power_ups: u32,
    /// The shield ran out on this tick
    pub fatal: bool,
}

/// Lane-equality plus lower-edge test
pub fn overlaps(player: &Player, entity: &FallingEntity, tuning: &Tuning) -> bool {
    player.pos.x == entity.pos.x
        && entity.pos.y + entity.kind.height(tuning) - tuning.collision_margin > player.pos.y
}

/// Overlapping entities that may still apply their effect under `mode`
fn contacts<'a>(
    player: &'a Player,
    population: &'a mut Population,
    tuning: &'a Tuning,
) -> impl Iterator<Item = &'a mut FallingEntity> + 'a {
    let mode = tuning.overlap_mode;
    population.lanes.iter_mut().filter(move |e| {
        overlaps(player, e, tuning) && (mode == OverlapMode::Level || !e.touched)
    })
}

/// Re-arm entities the player is no longer overlapping
fn rearm(player: &Player, population: &mut Population, tuning: &Tuning) {
    for e in population.lanes.iter_mut() {
        if e.touched && !overlaps(player, e, tuning) {
            e.touched = false;
        }
    }
}

/// Apply every overlap for this tick: obstacles first, then coins, then power-ups
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let tuning = &state.tuning;

    if tuning.overlap_mode == OverlapMode::Edge {
        rearm(&state.player, &mut state.obstacles, tuning);
        rearm(&state.player, &mut state.coins, tuning);
        rearm(&state.player, &mut state.power_ups, tuning);
    }

    // Each obstacle applies its penalty independently
    for obstacle in contacts(&state.player, &mut state.obstacles, tuning) {
        obstacle.touched = true;
        state.shield -= tuning.obstacle_penalty;
        report.obstacle_hits += 1;
        if state.shield <= 0 {
            report.fatal = true;
        }
    }

    for coin in contacts(&state.player, &mut state.coins, tuning) {
        coin.touched = true;
        state.score += tuning.coin_bonus;
        report.coins += 1;
    }

    for star in contacts(&state.player, &mut state.power_ups, tuning) {
        if state.shield > tuning.power_up_ceiling {
            continue;
        }
        star.touched = true;
        state.shield += tuning.power_up_shield;
        report.power_ups += 1;
    }

    if report.obstacle_hits > 0 {
        state.events.push(GameEvent::ShieldHit {
            hits: report.obstacle_hits,
        });
    }
    for _ in 0..report.coins {
        state.events.push(GameEvent::CoinCollected);
    }
    for _ in 0..report.power_ups {
        state.events.push(GameEvent::PowerUpCollected);
    }
    if report.fatal {
        state.phase = GamePhase::Dead;
        state.events.push(GameEvent::PlayerDied { score: state.score });
        log::info!("Player died with score {}", state.score);
    }

    report
}

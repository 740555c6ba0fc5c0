//! Variable timestep simulation tick
//!
//! One call advances the session by the wall-clock time since the previous
//! frame. Motion and score both scale with that elapsed time.

use super::collision::{self, CollisionReport};
use super::entity::Direction;
use super::state::{GameEvent, GameState};

/// Input intents gathered since the previous tick, applied in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub moves: Vec<Direction>,
}

/// Advance the session by `elapsed_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: u64) -> CollisionReport {
    if state.is_dead() {
        return CollisionReport::default();
    }

    state.time_ticks += 1;

    for &direction in &input.moves {
        state.player.shift(direction, &state.tuning);
    }

    // Surviving is worth one point per millisecond
    state.score += elapsed_ms;

    let dt = elapsed_ms as f32;
    for entity in state
        .obstacles
        .lanes
        .iter_mut()
        .chain(state.coins.lanes.iter_mut())
        .chain(state.power_ups.lanes.iter_mut())
    {
        entity.update(dt);
    }

    state.refill_populations();

    let report = collision::resolve(state);
    check_milestones(state);
    report
}

/// One-shot score thresholds: extra obstacle, then the alternate sprite
fn check_milestones(state: &mut GameState) {
    if !state.hard_mode && state.score > state.tuning.hard_mode_score {
        state.hard_mode = true;
        state.obstacles.raise_target();
        // Keep the population at target at the tick boundary
        state.refill_populations();
        state.events.push(GameEvent::HardModeStarted);
        log::info!(
            "Hard mode at score {}: {} obstacles",
            state.score,
            state.obstacles.target()
        );
    }

    if !state.alt_unlocked && state.score > state.tuning.unlock_score {
        state.alt_unlocked = true;
        state.player.sprite = crate::assets::SpriteId::PlayerAlt;
        state.events.push(GameEvent::AltSpriteUnlocked);
        log::info!("Alternate player unlocked at score {}", state.score);
    }
}

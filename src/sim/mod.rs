//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in, never sampled
//! - Seeded RNG only
//! - Stable iteration order (by lane index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod lanes;
pub mod population;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, OverlapMode, overlaps};
pub use entity::{Direction, EntityKind, FallingEntity, Player};
pub use lanes::{LaneError, Lanes};
pub use population::Population;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};

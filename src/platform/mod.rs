//! Platform abstraction layer (browser)
//!
//! Handles the browser side of the game:
//! - Canvas 2D drawing surface
//! - Asset preloading
//! - Wall-clock time

pub mod canvas;
pub mod loader;

pub use canvas::CanvasSurface;
pub use loader::{WebAssets, load_assets};

use crate::driver::Clock;

/// Millisecond wall clock (`Date.now()`)
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl Clock for WallClock {
    fn now_ms(&mut self) -> f64 {
        js_sys::Date::now()
    }
}

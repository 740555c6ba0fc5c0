//! Game loop driver
//!
//! Owns the session, turns wall-clock samples into elapsed time, queues
//! input intents until the next frame, and decides whether another frame
//! should be scheduled. The platform supplies the clock, the drawing
//! surface and the sound output.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::Sound;
use crate::render::{Surface, draw_frame};
use crate::sim::{Direction, GameState, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// Player intents delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    Restart,
    /// Flip the persisted mute preference
    ToggleMute,
}

impl Intent {
    /// Keyboard mapping: arrows move, space restarts, M mutes. Other keys are ignored.
    pub fn from_key_code(key_code: u32) -> Option<Intent> {
        match key_code {
            LEFT_ARROW_CODE => Some(Intent::Move(Direction::Left)),
            RIGHT_ARROW_CODE => Some(Intent::Move(Direction::Right)),
            SPACE_BAR_CODE => Some(Intent::Restart),
            M_KEY_CODE => Some(Intent::ToggleMute),
            _ => None,
        }
    }
}

pub const LEFT_ARROW_CODE: u32 = 37;
pub const RIGHT_ARROW_CODE: u32 = 39;
pub const SPACE_BAR_CODE: u32 = 32;
pub const M_KEY_CODE: u32 = 77;

/// Whether the platform should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Stop,
}

/// Wall-clock source in milliseconds
pub trait Clock {
    fn now_ms(&mut self) -> f64;
}

/// Fire-and-forget sound output
pub trait SoundPlayer {
    fn play(&mut self, sound: Sound);
}

/// Game instance holding the session and frame timing
pub struct Driver {
    state: GameState,
    tuning: Tuning,
    /// Wall-clock sample taken at the end of the previous live frame
    last_frame_ms: f64,
    input: TickInput,
    /// Seeds for sessions started by restart
    seeds: Pcg32,
}

impl Driver {
    pub fn new(seed: u64, tuning: Tuning, clock: &mut impl Clock) -> Result<Self, TuningError> {
        let state = GameState::new(seed, tuning.clone())?;
        Ok(Self {
            state,
            tuning,
            last_frame_ms: clock.now_ms(),
            input: TickInput::default(),
            seeds: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply an intent. Moves are queued for the next frame; restart only
    /// acts on a dead session. Returns true when a new session was started,
    /// meaning the platform must schedule a frame again.
    pub fn handle_intent(&mut self, intent: Intent, clock: &mut impl Clock) -> bool {
        match intent {
            Intent::Move(direction) => {
                if !self.state.is_dead() {
                    self.input.moves.push(direction);
                }
                false
            }
            Intent::Restart if self.state.is_dead() => self.restart(clock),
            Intent::Restart => false,
            // Preferences live with the platform's audio, not the session
            Intent::ToggleMute => false,
        }
    }

    /// Throw away the session and start a fresh one
    fn restart(&mut self, clock: &mut impl Clock) -> bool {
        let seed: u64 = self.seeds.random();
        match GameState::new(seed, self.tuning.clone()) {
            Ok(state) => {
                self.state = state;
                self.input = TickInput::default();
                self.last_frame_ms = clock.now_ms();
                log::info!("Game restarted with seed: {}", seed);
                true
            }
            Err(e) => {
                log::error!("Restart failed: {}", e);
                false
            }
        }
    }

    /// Run one frame: tick, draw, play event sounds
    pub fn frame(
        &mut self,
        clock: &mut impl Clock,
        surface: &mut impl Surface,
        audio: &mut impl SoundPlayer,
    ) -> FrameOutcome {
        if self.state.is_dead() {
            return FrameOutcome::Stop;
        }

        let now = clock.now_ms();
        // Clocks can step backwards; treat that as no time passing
        let elapsed_ms = (now - self.last_frame_ms).max(0.0) as u64;

        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, elapsed_ms);
        draw_frame(&self.state, surface);

        for event in self.state.drain_events() {
            if let Some(sound) = event.sound() {
                audio.play(sound);
            }
        }

        if self.state.is_dead() {
            log::info!("Game over: {} points", self.state.score);
            FrameOutcome::Stop
        } else {
            self.last_frame_ms = clock.now_ms();
            FrameOutcome::Continue
        }
    }
}

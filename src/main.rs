//! Lane Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use lane_dash::audio::AudioManager;
    use lane_dash::platform::{CanvasSurface, WallClock, load_assets};
    use lane_dash::{Driver, FrameOutcome, Intent, Settings, Sound, Tuning};

    /// Game instance holding all state
    struct Game {
        driver: Driver,
        surface: CanvasSurface,
        audio: AudioManager,
        settings: Settings,
        clock: WallClock,
    }

    impl Game {
        fn frame(&mut self) -> FrameOutcome {
            self.driver
                .frame(&mut self.clock, &mut self.surface, &mut self.audio)
        }

        /// Returns true when the loop must be rescheduled
        fn handle_intent(&mut self, intent: Intent) -> bool {
            if intent == Intent::ToggleMute {
                let muted = self.settings.toggle_mute();
                self.audio.apply_settings(&self.settings);
                self.settings.save();
                log::info!("Sound {}", if muted { "muted" } else { "on" });
                return false;
            }
            self.driver.handle_intent(intent, &mut self.clock)
        }
    }

    /// Balance data from an optional `<script id="tuning" type="application/json">`
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::error!("Bad tuning data, using defaults: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let tuning = load_tuning(&document);

        let assets = match load_assets().await {
            Ok(assets) => assets,
            Err(e) => {
                log::error!("Cannot start: {}", e);
                return;
            }
        };

        let settings = Settings::load();
        let mut audio = AudioManager::new(&assets, &settings);
        audio.play_music(Sound::Theme);

        let surface = match CanvasSurface::attach(&document, "app", &tuning, assets) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Cannot create canvas: {:?}", e);
                return;
            }
        };

        let mut clock = WallClock;
        let seed = js_sys::Date::now() as u64;
        let driver = match Driver::new(seed, tuning, &mut clock) {
            Ok(driver) => driver,
            Err(e) => {
                log::error!("Cannot start session: {}", e);
                return;
            }
        };
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            driver,
            surface,
            audio,
            settings,
            clock,
        }));

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Lane Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(intent) = Intent::from_key_code(event.key_code()) else {
                return;
            };
            let resume = game.borrow_mut().handle_intent(intent);
            if resume {
                request_animation_frame(game.clone());
            }
        });
        let _ = document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let outcome = game.borrow_mut().frame();
        if outcome == FrameOutcome::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Dash (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a scripted player dodging at 60 Hz until the session ends
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use lane_dash::sim::{Direction, EntityKind, Player};
    use lane_dash::{Clock, Driver, FrameOutcome, Intent, Sound, SoundPlayer, SpriteId};
    use lane_dash::{Surface, TextStyle, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Simulated clock advancing one display refresh per frame
    struct FrameClock {
        now: f64,
    }

    impl Clock for FrameClock {
        fn now_ms(&mut self) -> f64 {
            self.now
        }
    }

    /// Surface that only remembers the last HUD line
    #[derive(Default)]
    struct NullSurface {
        last_text: String,
    }

    impl Surface for NullSurface {
        fn draw_sprite(&mut self, _sprite: SpriteId, _x: f32, _y: f32) {}

        fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _style: TextStyle) {
            self.last_text = text.to_string();
        }
    }

    struct LogAudio;

    impl SoundPlayer for LogAudio {
        fn play(&mut self, sound: Sound) {
            log::info!("♪ {}", sound.file_name());
        }
    }

    /// Step out of the current lane when an obstacle is about to land in it
    fn dodge(driver: &Driver) -> Option<Direction> {
        let state = driver.state();
        let lane = state.player.lane();
        let danger = |lane: usize| {
            state
                .population(EntityKind::Obstacle)
                .lanes
                .get(lane)
                .is_some_and(|e| e.pos.y > 0.0)
        };
        if !danger(lane) {
            return None;
        }
        let max_lane = Player::last_lane(&state.tuning);
        if lane > 0 && !danger(lane - 1) {
            Some(Direction::Left)
        } else if lane < max_lane && !danger(lane + 1) {
            Some(Direction::Right)
        } else {
            None
        }
    }

    pub fn run() {
        let mut clock = FrameClock { now: 0.0 };
        let mut driver = match Driver::new(2024, Tuning::default(), &mut clock) {
            Ok(driver) => driver,
            Err(e) => {
                log::error!("Cannot start session: {}", e);
                return;
            }
        };
        let mut surface = NullSurface::default();
        let mut audio = LogAudio;

        let mut frames = 0;
        while frames < MAX_FRAMES {
            if let Some(direction) = dodge(&driver) {
                driver.handle_intent(Intent::Move(direction), &mut clock);
            }
            clock.now += FRAME_MS.round();
            frames += 1;
            if driver.frame(&mut clock, &mut surface, &mut audio) == FrameOutcome::Stop {
                break;
            }
        }

        let state = driver.state();
        println!(
            "\n{} frames, {} points, shield {}, {:?}",
            frames,
            state.score,
            state.displayed_shield(),
            state.phase
        );
        println!("Last HUD line: {}", surface.last_text);
    }
}

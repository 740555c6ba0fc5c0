//! Audio playback through HTML media elements
//!
//! Sounds are preloaded once at startup (see `platform::loader`). Effects
//! play on a fresh clone of the preloaded element so overlapping plays don't
//! cut each other off.

use wasm_bindgen::JsCast;
use web_sys::HtmlAudioElement;

use crate::assets::{AssetTable, Sound};
use crate::driver::SoundPlayer;
use crate::settings::Settings;

/// Audio manager for the game
pub struct AudioManager {
    clips: Vec<(Sound, HtmlAudioElement)>,
    music: Option<HtmlAudioElement>,
    sfx_volume: f64,
    music_volume: f64,
}

impl AudioManager {
    pub fn new<I>(assets: &AssetTable<I, HtmlAudioElement>, settings: &Settings) -> Self {
        let clips = Sound::ALL
            .iter()
            .map(|&s| (s, assets.sound(s).clone()))
            .collect();
        Self {
            clips,
            music: None,
            sfx_volume: settings.effective_sfx_volume() as f64,
            music_volume: settings.effective_music_volume() as f64,
        }
    }

    /// Apply changed preferences, including to music already playing
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume() as f64;
        self.music_volume = settings.effective_music_volume() as f64;
        if let Some(music) = &self.music {
            music.set_volume(self.music_volume);
        }
    }

    fn clip(&self, sound: Sound) -> Option<&HtmlAudioElement> {
        self.clips.iter().find(|(s, _)| *s == sound).map(|(_, el)| el)
    }

    /// Start looping background music (once)
    pub fn play_music(&mut self, sound: Sound) {
        if self.music.is_some() {
            return;
        }
        let Some(el) = self.clip(sound).cloned() else {
            return;
        };
        el.set_loop(true);
        el.set_volume(self.music_volume);
        // Autoplay may be blocked until the first user gesture
        if el.play().is_err() {
            log::warn!("Music playback refused");
        }
        self.music = Some(el);
    }

    /// Play a one-shot effect
    pub fn play_effect(&self, sound: Sound) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let Some(el) = self.clip(sound) else { return };

        let Some(shot) = el
            .clone_node()
            .ok()
            .and_then(|node| node.dyn_into::<HtmlAudioElement>().ok())
        else {
            return;
        };
        shot.set_volume(self.sfx_volume);
        let _ = shot.play();
    }
}

impl SoundPlayer for AudioManager {
    fn play(&mut self, sound: Sound) {
        self.play_effect(sound);
    }
}

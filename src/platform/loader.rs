//! Asset preloading
//!
//! Every sprite and sound is fetched before the first frame. Anything that
//! fails to load surfaces as an [`AssetError`] from [`load_assets`].

use js_sys::Function;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, HtmlImageElement};

use crate::assets::{AssetError, AssetTable, Sound, SpriteId};

/// Assets resolved to browser handles
pub type WebAssets = AssetTable<HtmlImageElement, HtmlAudioElement>;

/// Directory holding sprite images
const IMAGE_DIR: &str = "images/";

async fn load_image(name: &str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    img.set_src(&format!("{IMAGE_DIR}{name}"));
    match JsFuture::from(img.decode()).await {
        Ok(_) => Some(img),
        Err(e) => {
            log::error!("Failed to load image {}: {:?}", name, e);
            None
        }
    }
}

/// Events that mean a clip has enough data to start playing
const SOUND_READY_EVENTS: [&str; 2] = ["loadeddata", "canplaythrough"];

/// Give up on a clip the browser won't fetch (e.g. preload deferred until a gesture)
const SOUND_TIMEOUT_MS: i32 = 10_000;

async fn load_sound(name: &str) -> Option<HtmlAudioElement> {
    let window = web_sys::window()?;
    let audio = HtmlAudioElement::new_with_src(name).ok()?;
    audio.set_preload("auto");

    let mut settle: Option<(Function, Function)> = None;
    let ready = js_sys::Promise::new(&mut |resolve, reject| settle = Some((resolve, reject)));
    let (resolve, reject) = settle?;

    for event in SOUND_READY_EVENTS {
        let _ = audio.add_event_listener_with_callback(event, &resolve);
    }
    let _ = audio.add_event_listener_with_callback("error", &reject);
    let timer = window
        .set_timeout_with_callback_and_timeout_and_arguments_1(
            &reject,
            SOUND_TIMEOUT_MS,
            &JsValue::from_str("timed out"),
        )
        .ok();
    audio.load();

    let result = JsFuture::from(ready).await;

    for event in SOUND_READY_EVENTS {
        let _ = audio.remove_event_listener_with_callback(event, &resolve);
    }
    let _ = audio.remove_event_listener_with_callback("error", &reject);
    if let Some(handle) = timer {
        window.clear_timeout_with_handle(handle);
    }

    match result {
        Ok(_) => Some(audio),
        Err(e) => {
            log::error!("Failed to load sound {}: {:?}", name, e);
            None
        }
    }
}

/// Fetch every asset the game names
pub async fn load_assets() -> Result<WebAssets, AssetError> {
    let mut images = Vec::with_capacity(SpriteId::ALL.len());
    for id in SpriteId::ALL {
        images.push((id, load_image(id.file_name()).await));
    }

    let mut sounds = Vec::with_capacity(Sound::ALL.len());
    for id in Sound::ALL {
        sounds.push((id, load_sound(id.file_name()).await));
    }

    AssetTable::resolve(
        |id| {
            images
                .iter_mut()
                .find(|(i, _)| *i == id)
                .and_then(|(_, img)| img.take())
        },
        |id| {
            sounds
                .iter_mut()
                .find(|(s, _)| *s == id)
                .and_then(|(_, clip)| clip.take())
        },
    )
}

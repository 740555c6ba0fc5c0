//! Canvas 2D drawing surface

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::loader::WebAssets;
use crate::assets::SpriteId;
use crate::render::{Surface, TextStyle};
use crate::tuning::Tuning;

/// Draws into a `<canvas>` using preloaded sprites
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    assets: WebAssets,
}

impl CanvasSurface {
    /// Create a playfield-sized canvas inside the element with id `parent_id`
    pub fn attach(
        document: &Document,
        parent_id: &str,
        tuning: &Tuning,
        assets: WebAssets,
    ) -> Result<Self, JsValue> {
        let parent = document
            .get_element_by_id(parent_id)
            .ok_or_else(|| JsValue::from_str(&format!("no #{parent_id} element")))?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(tuning.width as u32);
        canvas.set_height(tuning.height as u32);
        parent.append_child(&canvas)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        Ok(Self { ctx, assets })
    }
}

impl Surface for CanvasSurface {
    fn draw_sprite(&mut self, sprite: SpriteId, x: f32, y: f32) {
        let image = self.assets.sprite(sprite);
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element(image, x as f64, y as f64)
        {
            log::warn!("Draw {:?} failed: {:?}", sprite, e);
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.ctx.set_font(style.font());
        self.ctx.set_fill_style_str(style.color());
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}

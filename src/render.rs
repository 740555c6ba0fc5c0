//! Frame composition
//!
//! Draws a session onto any [`Surface`]. Draw order is the z-order:
//! background, falling entities, player, then text on top.

use crate::assets::SpriteId;
use crate::sim::GameState;

/// Text appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Live score and shield readout
    Hud,
    /// Game-over overlay
    Banner,
}

impl TextStyle {
    /// CSS font shorthand
    pub fn font(self) -> &'static str {
        match self {
            TextStyle::Hud => "bold 20px Impact",
            TextStyle::Banner => "bold 30px Impact",
        }
    }

    pub fn color(self) -> &'static str {
        "#ffffff"
    }
}

/// A 2D drawing target; origin top-left, y grows downward
pub trait Surface {
    fn draw_sprite(&mut self, sprite: SpriteId, x: f32, y: f32);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
}

/// Background, falling entities, then the player
pub fn draw_scene(state: &GameState, surface: &mut impl Surface) {
    surface.draw_sprite(SpriteId::Background, 0.0, 0.0);

    for pop in [&state.obstacles, &state.coins, &state.power_ups] {
        for entity in pop.lanes.iter() {
            surface.draw_sprite(entity.sprite(), entity.pos.x, entity.pos.y);
        }
    }

    surface.draw_sprite(state.player.sprite, state.player.pos.x, state.player.pos.y);
}

/// Shield and score while alive
pub fn draw_hud(state: &GameState, surface: &mut impl Surface) {
    surface.draw_text(
        &format!("Star Shield: {}", state.displayed_shield()),
        30.0,
        30.0,
        TextStyle::Hud,
    );
    surface.draw_text(&format!("Points: {}", state.score), 30.0, 60.0, TextStyle::Hud);
}

/// Final score and restart prompt
pub fn draw_game_over(state: &GameState, surface: &mut impl Surface) {
    surface.draw_text(&format!("Points: {}", state.score), 30.0, 30.0, TextStyle::Banner);
    surface.draw_text("Hit \"space bar\"", 150.0, 150.0, TextStyle::Banner);
    surface.draw_text("to try again!", 160.0, 200.0, TextStyle::Banner);
}

/// Full frame: scene plus HUD, or scene plus the game-over overlay
pub fn draw_frame(state: &GameState, surface: &mut impl Surface) {
    draw_scene(state, surface);
    if state.is_dead() {
        draw_game_over(state, surface);
    } else {
        draw_hud(state, surface);
    }
}

/// Surface that records draw calls, for tests
#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Sprite(SpriteId, f32, f32),
        Text(String, f32, f32, TextStyle),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn sprites(&self) -> Vec<SpriteId> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Sprite(id, _, _) => Some(*id),
                    DrawCall::Text(..) => None,
                })
                .collect()
        }

        pub fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Text(text, ..) => Some(text.as_str()),
                    DrawCall::Sprite(..) => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn draw_sprite(&mut self, sprite: SpriteId, x: f32, y: f32) {
            self.calls.push(DrawCall::Sprite(sprite, x, y));
        }

        fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
            self.calls.push(DrawCall::Text(text.to_string(), x, y, style));
        }
    }
}

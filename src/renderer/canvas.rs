//! Browser 2D canvas surface
//!
//! Sprites are filled with their flat palette color; swapping in images is a
//! matter of replacing `fill_rect` with `draw_image` once assets are loaded.

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::vertex::{colors, sprite_color};
use super::{Sprite, Surface};
use crate::sim::Rect;

fn css_color([r, g, b, a]: [f32; 4]) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}

/// Draws onto a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    fn rotated_fill(&self, dest: Rect, rotation_deg: f32) -> Result<(), JsValue> {
        let center = dest.center();
        self.ctx.save();
        self.ctx.translate(f64::from(center.x), f64::from(center.y))?;
        self.ctx.rotate(f64::from(rotation_deg.to_radians()))?;
        self.ctx.fill_rect(
            f64::from(-dest.width / 2.0),
            f64::from(-dest.height / 2.0),
            f64::from(dest.width),
            f64::from(dest.height),
        );
        self.ctx.restore();
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_sprite(&mut self, sprite: Sprite, dest: Rect, rotation_deg: f32) {
        self.ctx.set_fill_style_str(&css_color(sprite_color(sprite)));
        if rotation_deg == 0.0 {
            self.ctx.fill_rect(
                f64::from(dest.x),
                f64::from(dest.y),
                f64::from(dest.width),
                f64::from(dest.height),
            );
        } else if let Err(e) = self.rotated_fill(dest, rotation_deg) {
            log::warn!("Failed to draw rotated {sprite:?}: {e:?}");
        }
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32) {
        self.ctx.set_font(&format!("bold {size}px Arial"));
        self.ctx.set_line_width(4.0);
        self.ctx.set_stroke_style_str(&css_color(colors::TEXT_OUTLINE));
        self.ctx.set_fill_style_str(&css_color(colors::TEXT));
        let (x, y) = (f64::from(position.x), f64::from(position.y));
        if let Err(e) = self
            .ctx
            .stroke_text(text, x, y)
            .and_then(|_| self.ctx.fill_text(text, x, y))
        {
            log::warn!("Failed to draw text: {e:?}");
        }
    }
}

//! CPU-side quad batching
//!
//! Turns sprite draws into flat-colored triangles ready to upload to a GPU
//! vertex buffer. Text is not rasterized here; labels are collected for an
//! overlay pass.

use glam::Vec2;

use super::vertex::{Vertex, sprite_color};
use super::{Sprite, Surface};
use crate::sim::Rect;

/// Text queued for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub position: Vec2,
    pub size: f32,
}

/// A frame's worth of triangles and text labels
#[derive(Debug, Default)]
pub struct QuadBatch {
    vertices: Vec<Vertex>,
    labels: Vec<TextLabel>,
    frames: u64,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex data as raw bytes for a buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Number of frames started on this batch
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }
}

impl Surface for QuadBatch {
    fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
        self.frames += 1;
    }

    fn draw_sprite(&mut self, sprite: Sprite, dest: Rect, rotation_deg: f32) {
        let color = sprite_color(sprite);
        let center = dest.center();
        let half = Vec2::new(dest.width, dest.height) / 2.0;
        let rotation = Vec2::from_angle(rotation_deg.to_radians());

        let [tl, tr, br, bl] = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|corner| {
            let p = center + rotation.rotate(corner);
            Vertex::new(p.x, p.y, color)
        });

        // Two triangles
        self.vertices.extend_from_slice(&[tl, tr, br, br, bl, tl]);
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            position,
            size,
        });
    }
}

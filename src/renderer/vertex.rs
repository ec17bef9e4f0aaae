//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use super::Sprite;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte stride of one vertex in a packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.31, 0.75, 0.79, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.33, 0.63, 0.18, 1.0];
    pub const OBSTACLE_CAP: [f32; 4] = [0.45, 0.78, 0.25, 1.0];
    pub const ACTOR: [f32; 4] = [0.98, 0.78, 0.16, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TEXT_OUTLINE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

/// Flat fill color used when a sprite is drawn without its image
pub const fn sprite_color(sprite: Sprite) -> [f32; 4] {
    match sprite {
        Sprite::Background => colors::BACKGROUND,
        Sprite::ObstacleTop => colors::OBSTACLE,
        Sprite::ObstacleBottom => colors::OBSTACLE_CAP,
        Sprite::Actor => colors::ACTOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 24);
        let vertices = [Vertex::new(1.0, 2.0, colors::ACTOR); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 2 * Vertex::STRIDE);
    }
}

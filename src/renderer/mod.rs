//! Rendering module
//!
//! The simulation draws through [`Surface`], a minimal 2D target that can
//! place a sprite region (optionally rotated) and draw text. Asset loading is
//! the surface's business; the core only names which sprite goes where.

pub mod batch;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod vertex;

pub use batch::{QuadBatch, TextLabel};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::sim::{GapSource, Rect, Session};

/// Score text placement (top-left, in world units)
pub const SCORE_POSITION: Vec2 = Vec2::new(10.0, 40.0);
pub const SCORE_FONT_SIZE: f32 = 32.0;

/// Which image a draw call refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    ObstacleTop,
    ObstacleBottom,
    Actor,
}

/// A 2D drawing target
pub trait Surface {
    /// Draw `sprite` stretched over `dest`, rotated by `rotation_deg`
    /// (clockwise, y-down) around the center of `dest`
    fn draw_sprite(&mut self, sprite: Sprite, dest: Rect, rotation_deg: f32);

    /// Draw `text` with its baseline starting at `position`
    fn draw_text(&mut self, text: &str, position: Vec2, size: f32);

    /// Start a new frame
    fn clear(&mut self) {}
}

/// Compose one frame: background, obstacles, actor, score
pub fn draw_frame<S: Surface + ?Sized, R: GapSource>(surface: &mut S, session: &Session<R>) {
    let tuning = &session.tuning;
    surface.clear();

    surface.draw_sprite(
        Sprite::Background,
        Rect::new(0.0, 0.0, tuning.world_width, tuning.world_height),
        0.0,
    );

    for obstacle in session.obstacles.iter() {
        surface.draw_sprite(Sprite::ObstacleTop, obstacle.top_rect(tuning), 0.0);
        surface.draw_sprite(Sprite::ObstacleBottom, obstacle.bottom_rect(tuning), 0.0);
    }

    surface.draw_sprite(
        Sprite::Actor,
        session.actor.bounds(tuning),
        session.actor.rotation(),
    );

    surface.draw_text(
        &format!("Score: {}", session.score),
        SCORE_POSITION,
        SCORE_FONT_SIZE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, ScriptedGaps};
    use crate::tuning::Tuning;

    /// Records draw calls in order
    #[derive(Default)]
    struct Recorder {
        clears: usize,
        sprites: Vec<(Sprite, Rect, f32)>,
        texts: Vec<(String, Vec2, f32)>,
    }

    impl Surface for Recorder {
        fn draw_sprite(&mut self, sprite: Sprite, dest: Rect, rotation_deg: f32) {
            self.sprites.push((sprite, dest, rotation_deg));
        }

        fn draw_text(&mut self, text: &str, position: Vec2, size: f32) {
            self.texts.push((text.to_string(), position, size));
        }

        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    #[test]
    fn test_frame_composition_order() {
        let mut session = Session::with_rng(Tuning::default(), ScriptedGaps::default());
        session.reset();
        session.obstacles.push(Obstacle::new(300.0, 200.0));
        session.obstacles.push(Obstacle::new(560.0, 150.0));
        session.actor.velocity = 5.0;
        session.actor.integrate(&session.tuning.clone());
        session.score = 12;

        let mut recorder = Recorder::default();
        draw_frame(&mut recorder, &session);

        assert_eq!(recorder.clears, 1);
        let kinds: Vec<Sprite> = recorder.sprites.iter().map(|(s, _, _)| *s).collect();
        assert_eq!(
            kinds,
            vec![
                Sprite::Background,
                Sprite::ObstacleTop,
                Sprite::ObstacleBottom,
                Sprite::ObstacleTop,
                Sprite::ObstacleBottom,
                Sprite::Actor,
            ]
        );

        assert_eq!(recorder.sprites[0].1, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(recorder.sprites[1].1, Rect::new(300.0, 0.0, 60.0, 200.0));
        assert_eq!(recorder.sprites[2].1, Rect::new(300.0, 360.0, 60.0, 240.0));

        let (_, actor_rect, rotation) = recorder.sprites[5];
        assert_eq!(actor_rect.x, 50.0);
        assert_eq!(rotation, session.actor.rotation());
        assert!(rotation < 0.0);

        assert_eq!(
            recorder.texts,
            vec![("Score: 12".to_string(), Vec2::new(10.0, 40.0), 32.0)]
        );
    }
}

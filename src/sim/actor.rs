//! The player-controlled actor
//!
//! The actor never moves horizontally; only its vertical position changes.
//! Integration is fixed-step: one gravity step per accepted tick, never scaled
//! by elapsed wall-clock time.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Vertical kinematic state of the actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top edge of the actor (y grows downward)
    pub y: f32,
    /// Units per tick, positive = falling
    pub velocity: f32,
    /// Visual tilt in degrees, derived from velocity
    rotation: f32,
}

impl Actor {
    /// Actor at rest at the given height
    pub fn new(y: f32) -> Self {
        Self {
            y,
            velocity: 0.0,
            rotation: 0.0,
        }
    }

    /// Starting state for a fresh session
    pub fn spawn(tuning: &Tuning) -> Self {
        Self::new(tuning.actor_start_y)
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Jump: override velocity with the upward jump velocity
    pub fn apply_impulse(&mut self, tuning: &Tuning) {
        self.velocity = tuning.jump_velocity;
    }

    /// Advance one tick under gravity
    pub fn integrate(&mut self, tuning: &Tuning) {
        self.velocity += tuning.gravity;
        self.y += self.velocity;
        self.rotation = (-self.velocity * tuning.rotation_gain)
            .clamp(tuning.min_rotation, tuning.max_rotation);
    }

    /// Bounding box used for collision and drawing
    pub fn bounds(&self, tuning: &Tuning) -> Rect {
        Rect::new(tuning.actor_x, self.y, tuning.actor_size, tuning.actor_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_applies_gravity_once() {
        let tuning = Tuning::default();
        let mut actor = Actor::spawn(&tuning);
        actor.integrate(&tuning);
        assert!((actor.velocity - 0.6).abs() < 1e-6);
        assert!((actor.y - 250.6).abs() < 1e-4);
        actor.integrate(&tuning);
        assert!((actor.velocity - 1.2).abs() < 1e-6);
        assert!((actor.y - 251.8).abs() < 1e-4);
    }

    #[test]
    fn test_impulse_overrides_velocity() {
        let tuning = Tuning::default();
        let mut actor = Actor::spawn(&tuning);
        actor.velocity = 25.0;
        actor.apply_impulse(&tuning);
        assert_eq!(actor.velocity, -10.0);

        // Repeated jumps do not stack
        actor.apply_impulse(&tuning);
        assert_eq!(actor.velocity, -10.0);
    }

    #[test]
    fn test_rotation_is_clamped() {
        let tuning = Tuning::default();
        let mut actor = Actor::spawn(&tuning);

        // Rising fast: -(-9.4 * 3) = 28.2, inside the range
        actor.apply_impulse(&tuning);
        actor.integrate(&tuning);
        assert!((actor.rotation() - 28.2).abs() < 1e-4);

        // Falling fast tilts down but never past -30
        actor.velocity = 40.0;
        actor.integrate(&tuning);
        assert_eq!(actor.rotation(), -30.0);

        // Strong upward velocity caps at 90
        actor.velocity = -50.0;
        actor.integrate(&tuning);
        assert_eq!(actor.rotation(), 90.0);
    }

    #[test]
    fn test_bounds_follow_position() {
        let tuning = Tuning::default();
        let actor = Actor::new(400.0);
        assert_eq!(actor.bounds(&tuning), Rect::new(50.0, 400.0, 40.0, 40.0));
    }
}

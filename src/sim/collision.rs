//! Collision detection between the actor, the world bounds and obstacles
//!
//! All overlap tests are strict: touching edges never count as a hit. The
//! world boundary is half-open the same way, so an actor resting exactly on
//! the floor line (`y == world_height - actor_size`) or the ceiling (`y == 0`)
//! is still alive.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::obstacle::ObstacleStream;
use super::rect::Rect;
use crate::tuning::Tuning;

/// Which barrier of an obstacle pair was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstaclePart {
    Top,
    Bottom,
}

/// What the actor ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Flew above the top of the world
    Ceiling,
    /// Fell below the bottom of the world
    Floor,
    /// Hit an obstacle (index into the stream, oldest first)
    Obstacle { index: usize, part: ObstaclePart },
}

/// Standard axis-aligned overlap test
#[inline]
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Check the actor against the world bounds, then every obstacle in stream
/// order. Returns the first collision found.
pub fn evaluate(actor: &Actor, obstacles: &ObstacleStream, tuning: &Tuning) -> Option<Collision> {
    if actor.y < 0.0 {
        return Some(Collision::Ceiling);
    }
    if actor.y > tuning.world_height - tuning.actor_size {
        return Some(Collision::Floor);
    }

    let bounds = actor.bounds(tuning);
    obstacles.iter().enumerate().find_map(|(index, obstacle)| {
        if check_collision(&bounds, &obstacle.top_rect(tuning)) {
            Some(Collision::Obstacle {
                index,
                part: ObstaclePart::Top,
            })
        } else if check_collision(&bounds, &obstacle.bottom_rect(tuning)) {
            Some(Collision::Obstacle {
                index,
                part: ObstaclePart::Bottom,
            })
        } else {
            None
        }
    })
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - Stable iteration order (spawn order = left-to-right)
//! - No rendering or platform dependencies

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod rect;
pub mod rng;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use collision::{Collision, ObstaclePart, check_collision, evaluate};
pub use obstacle::{Obstacle, ObstacleStream};
pub use rect::Rect;
pub use rng::{GapSource, ScriptedGaps, seeded};
pub use state::{GameEvent, GamePhase, Session};
pub use tick::{TickOutcome, tick};

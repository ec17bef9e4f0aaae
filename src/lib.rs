//! Pipe Dash - a side-scrolling flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor physics, obstacle stream, collisions, session)
//! - `renderer`: Render target abstraction and frame composition
//! - `platform`: Frame scheduling, game driver and browser bindings
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the defaults behind [`Tuning::default`]; the simulation itself
/// always reads the values from a `Tuning`.
pub mod consts {
    /// Target simulation rate (120 Hz, independent of the display refresh)
    pub const TICK_RATE_HZ: f64 = 120.0;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Downward acceleration added to velocity every accepted tick
    pub const GRAVITY: f32 = 0.6;
    /// Velocity assigned by a jump (negative = upward)
    pub const JUMP_VELOCITY: f32 = -10.0;

    /// Actor defaults
    pub const ACTOR_SIZE: f32 = 40.0;
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_START_Y: f32 = 250.0;

    /// Rotation is `-velocity * gain`, clamped to this range (degrees)
    pub const ROTATION_GAIN: f32 = 3.0;
    pub const MIN_ROTATION: f32 = -30.0;
    pub const MAX_ROTATION: f32 = 90.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const GAP_HEIGHT: f32 = 160.0;
    pub const SCROLL_SPEED: f32 = 4.0;
    /// Horizontal distance the newest obstacle travels before the next spawns
    pub const SPAWN_SPACING: f32 = 250.0;
    /// Minimum distance between a gap and the top/bottom of the world
    pub const GAP_MARGIN: f32 = 100.0;
}

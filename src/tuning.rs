//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a build can be re-balanced
//! from a JSON file without recompiling. Missing fields fall back to
//! [`crate::consts`].

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rejected configuration
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("`{field}` must be finite")]
    NotFinite { field: &'static str },

    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("`jump_velocity` must be negative (upward)")]
    JumpNotUpward,

    #[error("gap of {gap_height} with margins of {margin} does not fit a world {world_height} tall")]
    GapDoesNotFit {
        world_height: f32,
        gap_height: f32,
        margin: f32,
    },

    #[error("rotation range is inverted ({min} > {max})")]
    RotationRange { min: f32, max: f32 },

    #[error("actor does not fit inside the world")]
    ActorDoesNotFit,
}

/// Runtime game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world_width: f32,
    pub world_height: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub actor_size: f32,
    pub actor_x: f32,
    pub actor_start_y: f32,
    pub rotation_gain: f32,
    pub min_rotation: f32,
    pub max_rotation: f32,
    pub obstacle_width: f32,
    pub gap_height: f32,
    pub scroll_speed: f32,
    pub spawn_spacing: f32,
    pub gap_margin: f32,
    /// Simulation rate; display callbacks arriving faster are skipped
    pub tick_rate_hz: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            actor_size: ACTOR_SIZE,
            actor_x: ACTOR_X,
            actor_start_y: ACTOR_START_Y,
            rotation_gain: ROTATION_GAIN,
            min_rotation: MIN_ROTATION,
            max_rotation: MAX_ROTATION,
            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            scroll_speed: SCROLL_SPEED,
            spawn_spacing: SPAWN_SPACING,
            gap_margin: GAP_MARGIN,
            tick_rate_hz: TICK_RATE_HZ,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the preconditions the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("actor_size", self.actor_size),
            ("actor_x", self.actor_x),
            ("actor_start_y", self.actor_start_y),
            ("rotation_gain", self.rotation_gain),
            ("min_rotation", self.min_rotation),
            ("max_rotation", self.max_rotation),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("scroll_speed", self.scroll_speed),
            ("spawn_spacing", self.spawn_spacing),
            ("gap_margin", self.gap_margin),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::NotFinite { field });
        }
        if !self.tick_rate_hz.is_finite() {
            return Err(TuningError::NotFinite {
                field: "tick_rate_hz",
            });
        }

        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("actor_size", self.actor_size),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("scroll_speed", self.scroll_speed),
            ("spawn_spacing", self.spawn_spacing),
        ];
        if let Some(&(field, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(TuningError::NotPositive {
                field,
                value: f64::from(value),
            });
        }
        if self.tick_rate_hz <= 0.0 {
            return Err(TuningError::NotPositive {
                field: "tick_rate_hz",
                value: self.tick_rate_hz,
            });
        }
        if self.gravity < 0.0 {
            return Err(TuningError::NotPositive {
                field: "gravity",
                value: f64::from(self.gravity),
            });
        }
        if self.gap_margin < 0.0 {
            return Err(TuningError::NotPositive {
                field: "gap_margin",
                value: f64::from(self.gap_margin),
            });
        }

        if self.jump_velocity >= 0.0 {
            return Err(TuningError::JumpNotUpward);
        }
        if self.world_height - self.gap_height - 2.0 * self.gap_margin <= 0.0 {
            return Err(TuningError::GapDoesNotFit {
                world_height: self.world_height,
                gap_height: self.gap_height,
                margin: self.gap_margin,
            });
        }
        if self.min_rotation > self.max_rotation {
            return Err(TuningError::RotationRange {
                min: self.min_rotation,
                max: self.max_rotation,
            });
        }
        let actor_fits = self.actor_x >= 0.0
            && self.actor_x + self.actor_size <= self.world_width
            && self.actor_start_y >= 0.0
            && self.actor_start_y + self.actor_size <= self.world_height;
        if !actor_fits {
            return Err(TuningError::ActorDoesNotFit);
        }

        Ok(())
    }

    /// Minimum wall-clock time between accepted ticks, in milliseconds
    pub fn min_tick_interval_ms(&self) -> f64 {
        1000.0 / self.tick_rate_hz
    }

    /// A new obstacle spawns once the newest one has scrolled left of this
    pub fn spawn_threshold(&self) -> f32 {
        self.world_width - self.spawn_spacing
    }

    /// Obstacles at or left of this x are fully off-screen
    pub fn despawn_x(&self) -> f32 {
        -self.obstacle_width
    }

    /// Half-open range a gap's top edge is drawn from
    pub fn gap_top_range(&self) -> Range<f32> {
        self.gap_margin..self.world_height - self.gap_height - self.gap_margin
    }

    /// Horizontal center of the actor (it never moves horizontally)
    pub fn actor_center_x(&self) -> f32 {
        self.actor_x + self.actor_size / 2.0
    }
}

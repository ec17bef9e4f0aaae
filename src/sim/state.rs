//! Session state and phase transitions
//!
//! A `Session` owns the actor and the obstacle stream. Both are replaced
//! wholesale on reset; only the high score survives between runs.

use std::collections::VecDeque;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::collision::Collision;
use super::obstacle::ObstacleStream;
use super::rng::{GapSource, seeded};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; waiting for a restart
    GameOver,
}

/// Things that happened during a tick, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    ObstacleSpawned { x: f32, gap_top: f32 },
    Scored { score: u32 },
    Crashed { cause: Collision },
    NewHighScore { score: u32 },
}

/// Events kept for a caller that never drains them
pub const MAX_PENDING_EVENTS: usize = 256;

/// Bounded event buffer; the oldest event is dropped once full
#[derive(Debug, Clone, Default)]
pub(crate) struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub(crate) fn push(&mut self, event: GameEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    fn len(&self) -> usize {
        self.events.len()
    }
}

/// One player's game: the actor, the obstacles and the score board
#[derive(Debug, Clone)]
pub struct Session<R: GapSource = Pcg32> {
    pub tuning: Tuning,
    pub actor: Actor,
    pub obstacles: ObstacleStream,
    pub score: u32,
    pub high_score: u32,
    pub phase: GamePhase,
    /// Timestamp (ms) of the last accepted tick; 0 until the first one
    pub last_tick_ms: f64,
    /// Accepted ticks since the last reset
    pub ticks: u64,
    pub(crate) rng: R,
    pub(crate) events: EventQueue,
}

impl Session<Pcg32> {
    /// Create an idle session with a seeded gap generator
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, seeded(seed))
    }
}

impl<R: GapSource> Session<R> {
    /// Create an idle session with a custom gap source
    pub fn with_rng(tuning: Tuning, rng: R) -> Self {
        Self {
            actor: Actor::spawn(&tuning),
            obstacles: ObstacleStream::new(),
            score: 0,
            high_score: 0,
            phase: GamePhase::Idle,
            last_tick_ms: 0.0,
            ticks: 0,
            rng,
            events: EventQueue::default(),
            tuning,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Start (or restart) a run
    ///
    /// Only valid from `Idle` or `GameOver`; returns false and changes nothing
    /// while a run is in progress.
    pub fn reset(&mut self) -> bool {
        if self.is_running() {
            log::debug!("Ignoring reset while running");
            return false;
        }

        self.actor = Actor::spawn(&self.tuning);
        self.obstacles = ObstacleStream::new();
        self.score = 0;
        self.last_tick_ms = 0.0;
        self.ticks = 0;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Run started (high score {})", self.high_score);
        true
    }

    /// Jump; ignored unless a run is in progress
    pub fn jump(&mut self) -> bool {
        if !self.is_running() {
            log::debug!("Ignoring jump in phase {:?}", self.phase);
            return false;
        }
        self.actor.apply_impulse(&self.tuning);
        true
    }

    /// The single-button intent: jump while running, otherwise (re)start
    ///
    /// Returns true when a new run was started.
    pub fn press(&mut self) -> bool {
        if self.is_running() {
            self.jump();
            false
        } else {
            self.reset()
        }
    }

    /// End the run and fold the score into the high score
    pub(crate) fn game_over(&mut self, cause: Collision) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::Crashed { cause });
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore { score: self.score });
            log::info!("New high score: {}", self.score);
        }
        log::info!(
            "Game over ({:?}): score {}, high score {}",
            cause,
            self.score,
            self.high_score
        );
    }

    /// Take the events recorded since the last drain
    ///
    /// Only the latest [`MAX_PENDING_EVENTS`] are kept between drains.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Number of events waiting to be drained
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

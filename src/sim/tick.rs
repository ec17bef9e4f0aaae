//! Fixed timestep simulation tick
//!
//! Display callbacks may arrive at any rate. A callback only becomes a tick
//! when at least `Tuning::min_tick_interval_ms` has passed since the last
//! accepted one; otherwise it is skipped without touching any state, so the
//! physics runs at the same speed on a 60 Hz and a 144 Hz display.

use super::collision;
use super::rng::GapSource;
use super::state::{GameEvent, GamePhase, Session};

/// What a single display callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing to do
    Inactive,
    /// Too soon since the last accepted tick
    Skipped,
    /// State advanced one tick and the actor is still alive
    Advanced,
    /// State advanced and the run ended
    Collided,
}

/// Run one display callback at `timestamp_ms` (monotonic milliseconds)
pub fn tick<R: GapSource>(session: &mut Session<R>, timestamp_ms: f64) -> TickOutcome {
    if session.phase != GamePhase::Running {
        return TickOutcome::Inactive;
    }

    let elapsed = timestamp_ms - session.last_tick_ms;
    if elapsed < session.tuning.min_tick_interval_ms() {
        log::trace!("Skipping callback ({elapsed:.2} ms since last tick)");
        return TickOutcome::Skipped;
    }

    step(session);
    session.last_tick_ms = timestamp_ms;

    match collision::evaluate(&session.actor, &session.obstacles, &session.tuning) {
        Some(cause) => {
            session.game_over(cause);
            TickOutcome::Collided
        }
        None => TickOutcome::Advanced,
    }
}

/// Advance the world by exactly one tick (no clock gating, no collision)
fn step<R: GapSource>(session: &mut Session<R>) {
    let tuning = &session.tuning;
    session.ticks += 1;

    session.actor.integrate(tuning);

    session.obstacles.retire_offscreen(tuning);
    session.obstacles.advance(tuning.scroll_speed);

    let passed = session
        .obstacles
        .score_if_passed(tuning.actor_center_x(), tuning);
    for _ in 0..passed {
        session.score += 1;
        session.events.push(GameEvent::Scored {
            score: session.score,
        });
        log::debug!("Scored: {}", session.score);
    }

    if let Some(spawned) = session.obstacles.maybe_spawn(tuning, &mut session.rng) {
        session.events.push(GameEvent::ObstacleSpawned {
            x: spawned.x,
            gap_top: spawned.gap_top,
        });
    }
}

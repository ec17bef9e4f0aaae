//! Idle/demo mode - a simple pilot that threads the actor through the gaps
//!
//! The pilot jumps at the last moment: only when the actor's bottom edge
//! would otherwise sink below the lowest safe line next tick. The safe line
//! is the floor, tightened by the gap bottom of every obstacle that is under
//! the actor or about to be.

use super::rng::GapSource;
use super::state::Session;

/// How far past the actor's right edge obstacles are taken into account
const LOOKAHEAD: f32 = 150.0;
/// Clearance kept above the gap bottom (and the floor)
const SAFETY_MARGIN: f32 = 3.0;

/// Decide whether the actor should jump before the next tick
pub fn wants_jump<R: GapSource>(session: &Session<R>) -> bool {
    if !session.is_running() {
        return false;
    }

    let tuning = &session.tuning;
    let actor = &session.actor;
    let reach = tuning.actor_x + tuning.actor_size + LOOKAHEAD;

    let safe_line = session
        .obstacles
        .iter()
        .filter(|o| o.x < reach && o.x + tuning.obstacle_width > tuning.actor_x)
        .map(|o| o.gap_bottom(tuning))
        .fold(tuning.world_height, f32::min)
        - SAFETY_MARGIN;

    let next_bottom = actor.y + tuning.actor_size + actor.velocity + tuning.gravity;
    next_bottom > safe_line
}

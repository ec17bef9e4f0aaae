//! Game driver: one display callback in, one simulation step (maybe) out
//!
//! The driver is the single writer of the session. Input handlers call
//! `press`/`jump`/`reset` on it from the same thread that runs the frame
//! callbacks; nothing here is `Send`.

use rand_pcg::Pcg32;

use super::frame::{FrameControl, FrameLoop, ManualScheduler};
use crate::renderer::{Surface, draw_frame};
use crate::sim::{GameEvent, GamePhase, GapSource, Session, TickOutcome, autopilot, tick};

/// Ties a session to a render surface
pub struct GameDriver<S: Surface, R: GapSource = Pcg32> {
    session: Session<R>,
    surface: S,
    autopilot: bool,
    frames_drawn: u64,
    events: Vec<GameEvent>,
}

impl<S: Surface, R: GapSource> GameDriver<S, R> {
    pub fn new(session: Session<R>, surface: S) -> Self {
        Self {
            session,
            surface,
            autopilot: false,
            frames_drawn: 0,
            events: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", if enabled { "on" } else { "off" });
    }

    /// Single-button input. Returns true when a run started, in which case
    /// the caller must (re)start its frame loop.
    pub fn press(&mut self) -> bool {
        self.session.press()
    }

    pub fn jump(&mut self) -> bool {
        self.session.jump()
    }

    /// Returns true when a run started
    pub fn reset(&mut self) -> bool {
        self.session.reset()
    }

    /// Handle one display callback
    pub fn on_frame(&mut self, timestamp_ms: f64) -> FrameControl {
        if self.autopilot && autopilot::wants_jump(&self.session) {
            self.session.jump();
        }

        let outcome = tick(&mut self.session, timestamp_ms);
        self.events.extend(self.session.drain_events());

        match outcome {
            TickOutcome::Inactive | TickOutcome::Collided => FrameControl::Stop,
            TickOutcome::Skipped => FrameControl::Continue,
            TickOutcome::Advanced => {
                draw_frame(&mut self.surface, &self.session);
                self.frames_drawn += 1;
                FrameControl::Continue
            }
        }
    }

    /// Paint the current state without advancing it (e.g. the idle screen)
    pub fn redraw(&mut self) {
        draw_frame(&mut self.surface, &self.session);
        self.frames_drawn += 1;
    }

    /// Events produced since the last call (for sound or UI hooks)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Summary of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    pub callbacks: usize,
    pub ticks: u64,
    pub score: u32,
    pub high_score: u32,
    pub phase: GamePhase,
    pub obstacles_spawned: usize,
}

/// Run a session without a display, with callbacks every `frame_ms`
///
/// Starts a run if none is in progress and stops after the run ends or after
/// `max_callbacks` callbacks, whichever comes first. A request still pending
/// at the end is cancelled when the frame loop is dropped.
pub fn run_headless<S: Surface, R: GapSource>(
    driver: &mut GameDriver<S, R>,
    max_callbacks: usize,
    frame_ms: f64,
) -> HeadlessReport {
    let scheduler = ManualScheduler::new();
    let mut frames = FrameLoop::new(scheduler.clone());

    if !driver.session().is_running() {
        driver.reset();
    }
    frames.start();

    let mut callbacks = 0;
    let mut obstacles_spawned = 0;
    // Resume from the last accepted tick so timestamps stay monotonic
    let mut now = driver.session().last_tick_ms;
    while callbacks < max_callbacks && scheduler.fire().is_some() {
        callbacks += 1;
        now += frame_ms;
        let control = driver.on_frame(now);
        frames.on_callback(control);

        obstacles_spawned += driver
            .take_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
            .count();
    }

    let session = driver.session();
    HeadlessReport {
        callbacks,
        ticks: session.ticks,
        score: session.score,
        high_score: session.high_score,
        phase: session.phase,
        obstacles_spawned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::QuadBatch;
    use crate::sim::ScriptedGaps;
    use crate::tuning::Tuning;

    fn driver() -> GameDriver<QuadBatch, ScriptedGaps> {
        let session = Session::with_rng(Tuning::default(), ScriptedGaps::new([0.5, 0.2, 0.8]));
        GameDriver::new(session, QuadBatch::new())
    }

    #[test]
    fn test_idle_driver_stops_loop() {
        let mut driver = driver();
        assert_eq!(driver.on_frame(16.0), FrameControl::Stop);
        assert_eq!(driver.frames_drawn(), 0);
    }

    #[test]
    fn test_draws_only_accepted_ticks() {
        let mut driver = driver();
        assert!(driver.press());
        assert_eq!(driver.on_frame(100.0), FrameControl::Continue);
        assert_eq!(driver.frames_drawn(), 1);

        // Too soon: continue without drawing
        assert_eq!(driver.on_frame(102.0), FrameControl::Continue);
        assert_eq!(driver.frames_drawn(), 1);

        assert_eq!(driver.on_frame(110.0), FrameControl::Continue);
        assert_eq!(driver.frames_drawn(), 2);

        // Background, one obstacle pair, actor
        assert_eq!(driver.surface().quad_count(), 4);
        assert_eq!(driver.surface().labels()[0].text, "Score: 0");
    }

    #[test]
    fn test_press_jumps_while_running() {
        let mut driver = driver();
        assert!(driver.press());
        assert!(!driver.press());
        assert_eq!(driver.session().actor.velocity, -10.0);
    }

    #[test]
    fn test_headless_run_ends_on_floor_without_input() {
        let mut driver = driver();
        let report = run_headless(&mut driver, 10_000, 1000.0 / 60.0);
        assert_eq!(report.phase, GamePhase::GameOver);
        assert_eq!(report.score, 0);
        assert_eq!(report.ticks as usize, report.callbacks);
        assert!(report.obstacles_spawned >= 1);

        let events = driver.take_events();
        assert!(events.is_empty(), "events drained during the run");
    }

    #[test]
    fn test_headless_autopilot_scores() {
        let mut driver = driver();
        driver.set_autopilot(true);
        let report = run_headless(&mut driver, 1_500, 1000.0 / 60.0);
        assert_eq!(report.phase, GamePhase::Running);
        assert_eq!(report.callbacks, 1_500);
        assert!(report.score >= 15, "score was {}", report.score);
    }

    #[test]
    fn test_headless_resume_keeps_ticking() {
        let mut driver = driver();
        driver.set_autopilot(true);
        let first = run_headless(&mut driver, 600, 1000.0 / 60.0);
        assert_eq!(first.phase, GamePhase::Running);
        assert_eq!(first.ticks, 600);

        let second = run_headless(&mut driver, 600, 1000.0 / 60.0);
        assert_eq!(second.phase, GamePhase::Running);
        assert_eq!(second.callbacks, 600);
        assert_eq!(second.ticks, first.ticks + 600);
        assert!(second.score >= first.score);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut driver = driver();
        driver.set_autopilot(true);
        run_headless(&mut driver, 800, 1000.0 / 60.0);
        driver.set_autopilot(false);
        let first = run_headless(&mut driver, 10_000, 1000.0 / 60.0);
        assert_eq!(first.phase, GamePhase::GameOver);
        assert!(first.high_score >= 5);

        let second = run_headless(&mut driver, 10_000, 1000.0 / 60.0);
        assert_eq!(second.phase, GamePhase::GameOver);
        assert_eq!(second.score, 0);
        assert_eq!(second.high_score, first.high_score);
    }
}

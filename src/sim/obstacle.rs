//! Scrolling obstacle stream
//!
//! Obstacles are kept in spawn order, which is also left-to-right world
//! order: every obstacle spawns at the right edge and all of them scroll at
//! the same speed.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::rng::GapSource;
use crate::tuning::Tuning;

/// One top/bottom barrier pair sharing a passable gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the top barrier; the gap starts here
    pub gap_top: f32,
    /// Set once the actor has passed the obstacle's center
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            scored: false,
        }
    }

    pub fn center_x(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.obstacle_width / 2.0
    }

    pub fn gap_bottom(&self, tuning: &Tuning) -> f32 {
        self.gap_top + tuning.gap_height
    }

    /// Barrier from the ceiling down to the gap
    pub fn top_rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.x, 0.0, tuning.obstacle_width, self.gap_top)
    }

    /// Barrier from the gap down to the floor
    pub fn bottom_rect(&self, tuning: &Tuning) -> Rect {
        let y = self.gap_bottom(tuning);
        Rect::new(self.x, y, tuning.obstacle_width, tuning.world_height - y)
    }
}

/// Ordered sequence of live obstacles (oldest first)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
}

impl ObstacleStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Most recently spawned (rightmost) obstacle
    pub fn newest(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    /// Append an obstacle at an explicit position
    ///
    /// Callers must keep left-to-right order; `maybe_spawn` always does.
    pub fn push(&mut self, obstacle: Obstacle) {
        debug_assert!(
            self.newest().is_none_or(|o| o.x <= obstacle.x),
            "obstacles must be pushed in left-to-right order"
        );
        self.obstacles.push(obstacle);
    }

    /// Scroll every obstacle left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Drop obstacles that have scrolled fully past the left edge
    ///
    /// Returns how many were removed.
    pub fn retire_offscreen(&mut self, tuning: &Tuning) -> usize {
        let before = self.obstacles.len();
        let despawn_x = tuning.despawn_x();
        self.obstacles.retain(|o| o.x > despawn_x);
        before - self.obstacles.len()
    }

    /// Spawn at the right edge if the stream is empty or the newest obstacle
    /// has scrolled past the spawn threshold
    ///
    /// Returns the spawned obstacle.
    pub fn maybe_spawn(&mut self, tuning: &Tuning, rng: &mut impl GapSource) -> Option<Obstacle> {
        let due = self
            .newest()
            .is_none_or(|o| o.x < tuning.spawn_threshold());
        if !due {
            return None;
        }

        let gap_top = rng.sample_gap_top(tuning.gap_top_range());
        let obstacle = Obstacle::new(tuning.world_width, gap_top);
        log::debug!("Spawned obstacle at x={} gap_top={:.1}", obstacle.x, gap_top);
        self.obstacles.push(obstacle);
        Some(obstacle)
    }

    /// Mark every unscored obstacle whose center is left of `actor_center_x`
    ///
    /// Returns the number newly scored. Each obstacle scores at most once.
    pub fn score_if_passed(&mut self, actor_center_x: f32, tuning: &Tuning) -> u32 {
        let mut newly_scored = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.scored && actor_center_x > obstacle.center_x(tuning) {
                obstacle.scored = true;
                newly_scored += 1;
            }
        }
        newly_scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedGaps, seeded};
    use proptest::prelude::*;

    #[test]
    fn test_first_spawn_on_empty_stream() {
        let tuning = Tuning::default();
        let mut stream = ObstacleStream::new();
        let mut gaps = ScriptedGaps::new([0.5]);

        let spawned = stream.maybe_spawn(&tuning, &mut gaps).unwrap();
        assert_eq!(spawned.x, 800.0);
        assert_eq!(spawned.gap_top, 220.0);
        assert!(!spawned.scored);
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_spawn_waits_for_spacing() {
        let tuning = Tuning::default();
        let mut stream = ObstacleStream::new();
        let mut gaps = ScriptedGaps::new([0.25]);
        stream.maybe_spawn(&tuning, &mut gaps);

        // Newest at 550 is not strictly left of the threshold yet
        stream.advance(250.0);
        assert!(stream.maybe_spawn(&tuning, &mut gaps).is_none());

        stream.advance(0.5);
        assert!(stream.maybe_spawn(&tuning, &mut gaps).is_some());
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.newest().unwrap().x, 800.0);
    }

    #[test]
    fn test_retire_preserves_order() {
        let tuning = Tuning::default();
        let mut stream = ObstacleStream::new();
        stream.push(Obstacle::new(-60.0, 100.0));
        stream.push(Obstacle::new(-59.0, 110.0));
        stream.push(Obstacle::new(200.0, 120.0));

        assert_eq!(stream.retire_offscreen(&tuning), 1);
        let xs: Vec<f32> = stream.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![-59.0, 200.0]);
    }

    #[test]
    fn test_advance_moves_all() {
        let mut stream = ObstacleStream::new();
        stream.push(Obstacle::new(100.0, 100.0));
        stream.push(Obstacle::new(350.0, 100.0));
        stream.advance(4.0);
        let xs: Vec<f32> = stream.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![96.0, 346.0]);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let tuning = Tuning::default();
        let mut stream = ObstacleStream::new();
        // Center at 70: not yet passed by an actor centered at 70
        stream.push(Obstacle::new(40.0, 200.0));
        assert_eq!(stream.score_if_passed(70.0, &tuning), 0);

        stream.advance(0.5);
        assert_eq!(stream.score_if_passed(70.0, &tuning), 1);
        assert!(stream.as_slice()[0].scored);

        stream.advance(4.0);
        assert_eq!(stream.score_if_passed(70.0, &tuning), 0);
    }

    #[test]
    fn test_rects_span_world_around_gap() {
        let tuning = Tuning::default();
        let obstacle = Obstacle::new(50.0, 300.0);
        assert_eq!(obstacle.top_rect(&tuning), Rect::new(50.0, 0.0, 60.0, 300.0));
        assert_eq!(
            obstacle.bottom_rect(&tuning),
            Rect::new(50.0, 460.0, 60.0, 140.0)
        );
    }

    proptest! {
        #[test]
        fn prop_spawned_gaps_are_passable(
            seed in any::<u64>(),
            height in 400.0f32..2000.0,
            gap in 40.0f32..200.0,
        ) {
            let tuning = Tuning {
                world_height: height,
                gap_height: gap,
                ..Tuning::default()
            };
            prop_assume!(tuning.validate().is_ok());

            let mut rng = seeded(seed);
            let mut stream = ObstacleStream::new();
            for _ in 0..200 {
                if let Some(o) = stream.maybe_spawn(&tuning, &mut rng) {
                    prop_assert!(o.gap_top >= tuning.gap_margin);
                    prop_assert!(o.gap_bottom(&tuning) <= tuning.world_height - tuning.gap_margin);
                }
                stream.advance(tuning.scroll_speed);
                stream.retire_offscreen(&tuning);
            }
        }

        #[test]
        fn prop_stream_stays_sorted(seed in any::<u64>(), ticks in 1usize..2000) {
            let tuning = Tuning::default();
            let mut rng = seeded(seed);
            let mut stream = ObstacleStream::new();
            for _ in 0..ticks {
                stream.retire_offscreen(&tuning);
                stream.advance(tuning.scroll_speed);
                stream.maybe_spawn(&tuning, &mut rng);
            }
            let xs: Vec<f32> = stream.iter().map(|o| o.x).collect();
            prop_assert!(xs.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

//! Random source for obstacle gap placement
//!
//! The simulation only ever asks for one thing: a gap top drawn uniformly from
//! a half-open range. Keeping it behind a trait lets tests script exact gaps.

use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform sampler for gap positions
pub trait GapSource {
    /// Sample uniformly from `range` (start inclusive, end exclusive)
    fn sample_gap_top(&mut self, range: Range<f32>) -> f32;
}

impl GapSource for Pcg32 {
    fn sample_gap_top(&mut self, range: Range<f32>) -> f32 {
        self.random_range(range)
    }
}

/// Seeded generator for reproducible runs
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays fixed unit samples in `[0, 1)`, mapped linearly onto the range
///
/// Cycles when exhausted; an empty script always yields the range start.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGaps {
    samples: Vec<f32>,
    cursor: usize,
}

impl ScriptedGaps {
    pub fn new(samples: impl Into<Vec<f32>>) -> Self {
        Self {
            samples: samples.into(),
            cursor: 0,
        }
    }
}

impl GapSource for ScriptedGaps {
    fn sample_gap_top(&mut self, range: Range<f32>) -> f32 {
        let unit = match self.samples.get(self.cursor % self.samples.len().max(1)) {
            Some(u) => u.clamp(0.0, 1.0),
            None => 0.0,
        };
        self.cursor += 1;
        let value = range.start + unit * (range.end - range.start);
        // Keep the end exclusive even for a scripted 1.0
        if value >= range.end {
            range.end - f32::EPSILON * range.end.abs().max(1.0)
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..32 {
            assert_eq!(
                a.sample_gap_top(100.0..340.0),
                b.sample_gap_top(100.0..340.0)
            );
        }
    }

    #[test]
    fn test_pcg_stays_in_range() {
        let mut rng = seeded(7);
        for _ in 0..10_000 {
            let v = rng.sample_gap_top(100.0..340.0);
            assert!((100.0..340.0).contains(&v));
        }
    }

    #[test]
    fn test_scripted_maps_and_cycles() {
        let mut gaps = ScriptedGaps::new([0.0, 0.5, 1.0]);
        assert_eq!(gaps.sample_gap_top(100.0..300.0), 100.0);
        assert_eq!(gaps.sample_gap_top(100.0..300.0), 200.0);
        assert!(gaps.sample_gap_top(100.0..300.0) < 300.0);
        assert_eq!(gaps.sample_gap_top(100.0..300.0), 100.0);
    }

    #[test]
    fn test_empty_script_yields_start() {
        let mut gaps = ScriptedGaps::default();
        assert_eq!(gaps.sample_gap_top(10.0..20.0), 10.0);
    }
}

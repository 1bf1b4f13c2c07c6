//! Spawn timing
//!
//! Intervals are counted in simulated frames, so paused ticks (which don't
//! advance the frame clock) never shift the schedule.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Fixed-interval timer over the simulated frame clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Interval length in frames (may be fractional for odd rates)
    pub interval_frames: f32,
}

impl SpawnTimer {
    pub fn new(interval_frames: f32) -> Self {
        Self { interval_frames }
    }

    /// True on frame 0 and on every frame where elapsed time crosses a
    /// multiple of the interval
    pub fn fires_at(&self, frame: u64) -> bool {
        if frame == 0 {
            return true;
        }
        let now = (frame as f64 / self.interval_frames as f64).floor();
        let before = ((frame - 1) as f64 / self.interval_frames as f64).floor();
        now > before
    }
}

/// What to spawn on a given frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnDue {
    pub pipe: bool,
    pub rocket: bool,
    pub heart: bool,
}

/// Independent timers for each spawnable kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnSchedule {
    pub pipe: SpawnTimer,
    pub rocket: SpawnTimer,
    pub heart: SpawnTimer,
}

impl SpawnSchedule {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            pipe: SpawnTimer::new(tuning.interval_frames(tuning.pipe.interval_ms)),
            rocket: SpawnTimer::new(tuning.interval_frames(tuning.rocket.interval_ms)),
            heart: SpawnTimer::new(tuning.interval_frames(tuning.heart.interval_ms)),
        }
    }

    pub fn due(&self, frame: u64) -> SpawnDue {
        SpawnDue {
            pipe: self.pipe.fires_at(frame),
            rocket: self.rocket.fires_at(frame),
            heart: self.heart.fires_at(frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals() {
        let schedule = SpawnSchedule::from_tuning(&Tuning::default());
        assert_eq!(schedule.pipe.interval_frames, 180.0);
        assert_eq!(schedule.rocket.interval_frames, 300.0);
        assert_eq!(schedule.heart.interval_frames, 240.0);
    }

    #[test]
    fn test_fires_on_exact_multiples() {
        let timer = SpawnTimer::new(180.0);
        let fired: Vec<u64> = (0..1000).filter(|&f| timer.fires_at(f)).collect();
        assert_eq!(fired, vec![0, 180, 360, 540, 720, 900]);
    }

    #[test]
    fn test_fractional_interval_fires_once_per_crossing() {
        let timer = SpawnTimer::new(2.5);
        let fired: Vec<u64> = (0..11).filter(|&f| timer.fires_at(f)).collect();
        assert_eq!(fired, vec![0, 3, 5, 8, 10]);
    }

    #[test]
    fn test_all_kinds_spawn_on_first_frame() {
        let schedule = SpawnSchedule::from_tuning(&Tuning::default());
        assert_eq!(
            schedule.due(0),
            SpawnDue {
                pipe: true,
                rocket: true,
                heart: true
            }
        );
        assert_eq!(
            schedule.due(720),
            SpawnDue {
                pipe: true,
                rocket: false,
                heart: true
            }
        );
    }
}

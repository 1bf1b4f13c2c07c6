//! Sprite silhouettes used for pixel collision
//!
//! Image decoding happens outside the simulation; callers hand over alpha
//! channels via `Mask::from_alpha`. The defaults are plain shapes sized from
//! the tuning so the simulation runs headless.

use std::sync::Arc;

use super::collision::Mask;
use crate::tuning::Tuning;

/// Which bird frame is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WingPose {
    Up,
    Down,
}

impl WingPose {
    /// Full flap cycle length in simulated milliseconds
    pub const CYCLE_MS: u64 = 500;

    /// Wing is up for the second half of every cycle
    pub fn at(sim_time_ms: u64) -> Self {
        if sim_time_ms % Self::CYCLE_MS >= Self::CYCLE_MS / 2 {
            WingPose::Up
        } else {
            WingPose::Down
        }
    }
}

/// Masks for every sprite that takes part in pixel collision
#[derive(Debug, Clone)]
pub struct Silhouettes {
    pub bird_wing_up: Mask,
    pub bird_wing_down: Mask,
    /// One pipe body segment
    pub pipe_body: Mask,
    /// Cap drawn at the open end of each pipe stack
    pub pipe_end: Mask,
}

impl Silhouettes {
    /// Plain shapes: an elliptical bird and solid pipe pieces
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let bird = tuning.bird.size as u32;
        let pipe_w = tuning.pipe.width as u32;
        let piece_h = tuning.pipe.piece_height as u32;
        Self {
            bird_wing_up: Mask::ellipse(bird, bird),
            bird_wing_down: Mask::ellipse(bird, bird),
            pipe_body: Mask::filled(pipe_w, piece_h),
            pipe_end: Mask::filled(pipe_w, piece_h),
        }
    }

    pub fn bird(&self, pose: WingPose) -> &Mask {
        match pose {
            WingPose::Up => &self.bird_wing_up,
            WingPose::Down => &self.bird_wing_down,
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for Silhouettes {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wing_pose_alternates_every_quarter_second() {
        assert_eq!(WingPose::at(0), WingPose::Down);
        assert_eq!(WingPose::at(249), WingPose::Down);
        assert_eq!(WingPose::at(250), WingPose::Up);
        assert_eq!(WingPose::at(499), WingPose::Up);
        assert_eq!(WingPose::at(500), WingPose::Down);
    }

    #[test]
    fn test_default_shapes_follow_tuning() {
        let s = Silhouettes::default();
        assert_eq!(s.pipe_body.width(), 80);
        assert_eq!(s.pipe_end.height(), 32);
        assert_eq!(s.bird(WingPose::Up).width(), 32);
        assert!(s.bird(WingPose::Down).count() < 32 * 32);
    }
}

//! Energy Flap - a side-scrolling flappy arcade game with an energy budget
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `input`: Physical input to logical action mapping
//! - `frame`: Read-only view handed to renderers
//! - `session`: Fixed-rate game loop driver

pub mod error;
pub mod frame;
pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::Tuning;

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Target simulation rate (one tick per frame)
    pub const FPS: u32 = 60;

    /// Playfield dimensions
    pub const WIN_WIDTH: f32 = 284.0 * 2.0;
    pub const WIN_HEIGHT: f32 = 512.0;

    /// Bird defaults
    pub const BIRD_SIZE: f32 = 32.0;
    pub const BIRD_START_X: f32 = 50.0;
    pub const BIRD_START_Y: f32 = 240.0; // WIN_HEIGHT / 2 - BIRD_SIZE / 2
    /// Downward acceleration (px/ms²)
    pub const GRAVITY: f32 = 0.00007;
    /// Velocity set by a flap (px/ms, negative is up)
    pub const JUMP_VELOCITY: f32 = -0.1;
    /// Energy lost per second of flight
    pub const ENERGY_DRAIN_PER_SEC: f32 = 1.0 / 100.0;
    /// Energy spent per flap
    pub const FLAP_COST: f32 = 1.0 / 20.0;
    /// Flaps fail at or below this energy
    pub const FLAP_THRESHOLD: f32 = 0.05;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 80.0;
    pub const PIPE_PIECE_HEIGHT: f32 = 32.0;
    pub const PIPE_SPEED: f32 = 0.18;
    pub const PIPE_INTERVAL_MS: f32 = 3000.0;

    /// Rocket defaults
    pub const ROCKET_SPEED: f32 = 0.35;
    pub const ROCKET_INTERVAL_MS: f32 = 5000.0;
    pub const ROCKET_WIDTH: f32 = 40.0;
    pub const ROCKET_HEIGHT: f32 = 20.0;

    /// Heart defaults
    pub const HEART_SPEED: f32 = 0.2;
    pub const HEART_INTERVAL_MS: f32 = 4000.0;
    pub const HEART_SIZE: f32 = 24.0;
    pub const HEART_SCORE: u32 = 5;
    pub const HEART_ENERGY: f32 = 1.0 / 5.0;

    /// Rockets and hearts never spawn closer than this to the top or bottom
    pub const SPAWN_MARGIN: f32 = 50.0;
}

/// Convert a frame count to milliseconds at the given rate
#[inline]
pub fn frames_to_msec(frames: f32, fps: u32) -> f32 {
    1000.0 * frames / fps as f32
}

/// Convert milliseconds to a (possibly fractional) frame count at the given rate
#[inline]
pub fn msec_to_frames(milliseconds: f32, fps: u32) -> f32 {
    fps as f32 * milliseconds / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_conversions() {
        assert!((frames_to_msec(60.0, 60) - 1000.0).abs() < 1e-3);
        assert_eq!(msec_to_frames(3000.0, 60), 180.0);
        assert_eq!(msec_to_frames(5000.0, 60), 300.0);
        assert_eq!(msec_to_frames(4000.0, 60), 240.0);
    }
}

//! Game balance and playfield configuration
//!
//! Every section defaults to the stock game, and any JSON document may
//! override a subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::{frames_to_msec, msec_to_frames};

/// Bird kinematics and energy economy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdTuning {
    /// Downward acceleration (px/ms²)
    pub gravity: f32,
    /// Velocity a flap sets (px/ms, negative is up)
    pub jump_velocity: f32,
    /// Energy drained per second of simulated time
    pub drain_per_sec: f32,
    /// Energy spent by each successful flap
    pub flap_cost: f32,
    /// Flaps only succeed when energy is strictly above this
    pub flap_threshold: f32,
    /// Side of the square bounding box
    pub size: f32,
    pub start_x: f32,
    pub start_y: f32,
}

impl Default for BirdTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            drain_per_sec: ENERGY_DRAIN_PER_SEC,
            flap_cost: FLAP_COST,
            flap_threshold: FLAP_THRESHOLD,
            size: BIRD_SIZE,
            start_x: BIRD_START_X,
            start_y: BIRD_START_Y,
        }
    }
}

/// Pipe pair geometry and pacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeTuning {
    pub width: f32,
    /// Height of one body or end piece
    pub piece_height: f32,
    /// Scroll speed (px/ms)
    pub speed: f32,
    pub interval_ms: f32,
}

impl Default for PipeTuning {
    fn default() -> Self {
        Self {
            width: PIPE_WIDTH,
            piece_height: PIPE_PIECE_HEIGHT,
            speed: PIPE_SPEED,
            interval_ms: PIPE_INTERVAL_MS,
        }
    }
}

/// Rocket hazard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketTuning {
    pub speed: f32,
    pub interval_ms: f32,
    pub width: f32,
    pub height: f32,
    pub spawn_margin: f32,
}

impl Default for RocketTuning {
    fn default() -> Self {
        Self {
            speed: ROCKET_SPEED,
            interval_ms: ROCKET_INTERVAL_MS,
            width: ROCKET_WIDTH,
            height: ROCKET_HEIGHT,
            spawn_margin: SPAWN_MARGIN,
        }
    }
}

/// Heart collectible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartTuning {
    pub speed: f32,
    pub interval_ms: f32,
    pub size: f32,
    /// Score awarded on pickup
    pub score: u32,
    /// Energy restored on pickup
    pub energy: f32,
    pub spawn_margin: f32,
}

impl Default for HeartTuning {
    fn default() -> Self {
        Self {
            speed: HEART_SPEED,
            interval_ms: HEART_INTERVAL_MS,
            size: HEART_SIZE,
            score: HEART_SCORE,
            energy: HEART_ENERGY,
            spawn_margin: SPAWN_MARGIN,
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    /// Ticks per simulated second
    pub fps: u32,
    pub screen_width: f32,
    pub screen_height: f32,

    // === Entities ===
    pub bird: BirdTuning,
    pub pipe: PipeTuning,
    pub rocket: RocketTuning,
    pub heart: HeartTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fps: FPS,
            screen_width: WIN_WIDTH,
            screen_height: WIN_HEIGHT,
            bird: BirdTuning::default(),
            pipe: PipeTuning::default(),
            rocket: RocketTuning::default(),
            heart: HeartTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Simulated milliseconds covered by one tick
    pub fn frame_ms(&self) -> f32 {
        frames_to_msec(1.0, self.fps)
    }

    /// Spawn interval expressed in ticks
    pub fn interval_frames(&self, interval_ms: f32) -> f32 {
        msec_to_frames(interval_ms, self.fps)
    }

    /// Body segments shared between the top and bottom stacks of every pipe
    ///
    /// Leaves room for three bird heights of gap plus the two end pieces and
    /// one spare piece.
    pub fn total_pipe_segments(&self) -> u32 {
        let free = self.screen_height - 3.0 * self.bird.size - 3.0 * self.pipe.piece_height;
        (free / self.pipe.piece_height).floor().max(0.0) as u32
    }

    /// Lowest y the bird may reach before the run ends
    pub fn bird_floor(&self) -> f32 {
        self.screen_height - self.bird.size
    }

    /// Check ranges that the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::invalid("fps", "must be at least 1"));
        }
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;

        positive("bird.size", self.bird.size)?;
        if self.bird.gravity < 0.0 {
            return Err(ConfigError::invalid("bird.gravity", "must not be negative"));
        }
        if self.bird.drain_per_sec < 0.0 {
            return Err(ConfigError::invalid("bird.drain_per_sec", "must not be negative"));
        }
        unit_range("bird.flap_cost", self.bird.flap_cost)?;
        unit_range("bird.flap_threshold", self.bird.flap_threshold)?;

        positive("pipe.width", self.pipe.width)?;
        positive("pipe.piece_height", self.pipe.piece_height)?;
        positive("pipe.speed", self.pipe.speed)?;
        positive("pipe.interval_ms", self.pipe.interval_ms)?;
        if self.total_pipe_segments() < 2 {
            return Err(ConfigError::invalid(
                "screen_height",
                format!(
                    "{} px leaves fewer than two pipe segments",
                    self.screen_height
                ),
            ));
        }

        positive("rocket.speed", self.rocket.speed)?;
        positive("rocket.interval_ms", self.rocket.interval_ms)?;
        positive("rocket.width", self.rocket.width)?;
        positive("rocket.height", self.rocket.height)?;
        self.margin("rocket.spawn_margin", self.rocket.spawn_margin)?;

        positive("heart.speed", self.heart.speed)?;
        positive("heart.interval_ms", self.heart.interval_ms)?;
        positive("heart.size", self.heart.size)?;
        unit_range("heart.energy", self.heart.energy)?;
        self.margin("heart.spawn_margin", self.heart.spawn_margin)?;

        Ok(())
    }

    fn margin(&self, field: &'static str, margin: f32) -> Result<(), ConfigError> {
        if margin < 0.0 || 2.0 * margin > self.screen_height {
            return Err(ConfigError::invalid(
                field,
                format!("{} leaves no room on a {} px screen", margin, self.screen_height),
            ));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} is not a positive number", value)))
    }
}

fn unit_range(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} is outside [0, 1]", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_game() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.total_pipe_segments(), 10);
        assert_eq!(tuning.interval_frames(tuning.pipe.interval_ms), 180.0);
        assert_eq!(tuning.bird_floor(), 480.0);
    }

    #[test]
    fn test_partial_document_overrides_only_named_fields() {
        let tuning = Tuning::from_json(r#"{ "pipe": { "speed": 0.25 }, "fps": 30 }"#).unwrap();
        assert_eq!(tuning.fps, 30);
        assert_eq!(tuning.pipe.speed, 0.25);
        assert_eq!(tuning.pipe.width, PIPE_WIDTH);
        assert_eq!(tuning.bird, BirdTuning::default());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ fps: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = Tuning::from_json(r#"{ "rocket": { "speed": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "rocket.speed", .. }));

        let err = Tuning::from_json(r#"{ "bird": { "flap_cost": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "bird.flap_cost", .. }));

        let err = Tuning::from_json(r#"{ "heart": { "spawn_margin": 300 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "heart.spawn_margin", .. }));
    }

    #[test]
    fn test_rejects_screen_too_short_for_pipes() {
        let err = Tuning::from_json(r#"{ "screen_height": 200 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "screen_height", .. }));
    }
}

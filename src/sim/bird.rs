//! The player-controlled bird
//!
//! Falls under constant gravity, flaps to a fixed upward velocity, and
//! spends energy both over time and on every flap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::{Bounds, Position, Update};
use crate::tuning::BirdTuning;

/// Result of a flap request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flap {
    /// Velocity reset upward and energy spent
    Flapped,
    /// Not enough energy; nothing changed
    Exhausted,
}

/// The kinematic player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    /// Vertical velocity (px/ms, positive is down)
    pub velocity: f32,
    /// Remaining energy, always within [0, 1]
    pub energy: f32,
    pub physics: BirdTuning,
}

impl Bird {
    pub fn new(physics: BirdTuning) -> Self {
        Self {
            pos: Vec2::new(physics.start_x, physics.start_y),
            velocity: 0.0,
            energy: 1.0,
            physics,
        }
    }

    /// Jump if there is energy to spare
    pub fn flap(&mut self) -> Flap {
        if self.energy > self.physics.flap_threshold {
            self.velocity = self.physics.jump_velocity;
            self.energy = (self.energy - self.physics.flap_cost).max(0.0);
            Flap::Flapped
        } else {
            Flap::Exhausted
        }
    }

    /// Restore energy, capped at full
    pub fn regen_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(1.0);
    }

    /// True while the bird is inside [0, floor] vertically
    pub fn in_bounds(&self, floor: f32) -> bool {
        self.pos.y >= 0.0 && self.pos.y <= floor
    }

    pub fn size(&self) -> Vec2 {
        Vec2::splat(self.physics.size)
    }
}

impl Position for Bird {
    fn position(&self) -> Vec2 {
        self.pos
    }
}

impl Update for Bird {
    /// Semi-implicit Euler: velocity first, then position with the new velocity
    fn update(&mut self, elapsed_ms: f32) {
        self.velocity += self.physics.gravity * elapsed_ms;
        self.pos.y += self.velocity * elapsed_ms;

        let drain = self.physics.drain_per_sec * (elapsed_ms / 1000.0);
        self.energy = (self.energy - drain).max(0.0);
    }
}

impl Bounds for Bird {
    fn rect(&self) -> Rect {
        Rect::at(self.pos, self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn bird() -> Bird {
        Bird::new(BirdTuning::default())
    }

    #[test]
    fn test_spawns_at_start_position_full_energy() {
        let b = bird();
        assert_eq!(b.pos, Vec2::new(50.0, 240.0));
        assert_eq!(b.velocity, 0.0);
        assert_eq!(b.energy, 1.0);
        assert_eq!(b.rect(), Rect::new(50, 240, 32, 32));
    }

    #[test]
    fn test_one_frame_of_gravity() {
        let mut b = bird();
        b.pos.y = 100.0;
        b.update(FRAME_MS);
        assert!((b.velocity - 0.0011667).abs() < 1e-6);
        // Position integrates with the updated velocity
        assert!((b.pos.y - 100.019444).abs() < 1e-4);
        assert!((b.energy - (1.0 - ENERGY_DRAIN_PER_SEC / 60.0)).abs() < 1e-6);
    }

    #[test]
    fn test_flap_sets_jump_velocity_and_spends_energy() {
        let mut b = bird();
        b.velocity = 0.3;
        assert_eq!(b.flap(), Flap::Flapped);
        assert_eq!(b.velocity, JUMP_VELOCITY);
        assert!((b.energy - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_flap_fails_at_threshold() {
        let mut b = bird();
        b.energy = FLAP_THRESHOLD;
        b.velocity = 0.2;
        assert_eq!(b.flap(), Flap::Exhausted);
        assert_eq!(b.velocity, 0.2);
        assert_eq!(b.energy, FLAP_THRESHOLD);
    }

    #[test]
    fn test_long_fall_drains_to_zero() {
        let mut b = bird();
        b.energy = 0.001;
        b.update(10_000.0);
        assert_eq!(b.energy, 0.0);
    }

    #[test]
    fn test_bounds() {
        let mut b = bird();
        assert!(b.in_bounds(480.0));
        b.pos.y = -0.5;
        assert!(!b.in_bounds(480.0));
        b.pos.y = 480.0;
        assert!(b.in_bounds(480.0));
        b.pos.y = 480.1;
        assert!(!b.in_bounds(480.0));
    }

    proptest! {
        #[test]
        fn prop_flap_above_threshold(energy in 0.0501f32..=1.0) {
            let mut b = bird();
            b.energy = energy;
            prop_assert_eq!(b.flap(), Flap::Flapped);
            prop_assert_eq!(b.velocity, JUMP_VELOCITY);
            prop_assert!((b.energy - (energy - FLAP_COST).max(0.0)).abs() < 1e-6);
            prop_assert!(b.energy >= 0.0);
        }

        #[test]
        fn prop_flap_below_threshold_is_noop(energy in 0.0f32..0.05, vel in -0.5f32..0.5) {
            let mut b = bird();
            b.energy = energy;
            b.velocity = vel;
            prop_assert_eq!(b.flap(), Flap::Exhausted);
            prop_assert_eq!(b.velocity, vel);
            prop_assert_eq!(b.energy, energy);
        }

        #[test]
        fn prop_energy_stays_in_unit_range(
            start in 0.0f32..=1.0,
            regen in 0.0f32..2.0,
            elapsed in 0.0f32..100_000.0,
        ) {
            let mut b = bird();
            b.energy = start;
            b.regen_energy(regen);
            prop_assert!(b.energy <= 1.0);
            b.update(elapsed);
            prop_assert!((0.0..=1.0).contains(&b.energy));
        }
    }
}

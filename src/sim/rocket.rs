//! Rocket hazard
//!
//! A rocket remembers the bird's x at launch. It checks for a hit once,
//! on the first tick it reaches that column, and never again.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::{Active, Bounds, Position, Update};
use crate::tuning::{RocketTuning, Tuning};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub id: u32,
    pub pos: Vec2,
    /// Column where the single hit check fires
    pub target_x: f32,
    pub triggered: bool,
    pub params: RocketTuning,
}

impl Rocket {
    pub fn new(id: u32, params: RocketTuning, start: Vec2, target_x: f32) -> Self {
        Self {
            id,
            pos: start,
            target_x,
            triggered: false,
            params,
        }
    }

    /// Launch from the right edge at a random height, aimed at `target_x`
    pub fn spawn<R: Rng + ?Sized>(id: u32, tuning: &Tuning, target_x: f32, rng: &mut R) -> Self {
        let y = random_spawn_y(rng, tuning.screen_height, tuning.rocket.spawn_margin);
        Self::new(
            id,
            tuning.rocket,
            Vec2::new(tuning.screen_width, y),
            target_x,
        )
    }

    /// Fires once, the first time the rocket is at or past its target.
    /// Returns true when that single check finds the rocket overlapping `other`.
    pub fn check_trigger(&mut self, other: &Rect) -> bool {
        if !self.triggered && self.pos.x <= self.target_x {
            self.triggered = true;
            return self.rect().intersects(other);
        }
        false
    }
}

/// Integer height in [margin, height - margin], like the stock spawner
pub(crate) fn random_spawn_y<R: Rng + ?Sized>(rng: &mut R, height: f32, margin: f32) -> f32 {
    let lo = margin as i32;
    let hi = (height - margin) as i32;
    rng.random_range(lo..=hi.max(lo)) as f32
}

impl Position for Rocket {
    fn position(&self) -> Vec2 {
        self.pos
    }
}

impl Update for Rocket {
    fn update(&mut self, elapsed_ms: f32) {
        self.pos.x -= self.params.speed * elapsed_ms;
    }
}

impl Bounds for Rocket {
    fn rect(&self) -> Rect {
        Rect::at(self.pos, Vec2::new(self.params.width, self.params.height))
    }
}

impl Active for Rocket {
    /// Pruned once the tail clears the left edge
    fn is_active(&self) -> bool {
        self.pos.x + self.params.width >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::seeded_rng;

    fn rocket_at(x: f32, y: f32, target_x: f32) -> Rocket {
        Rocket::new(1, RocketTuning::default(), Vec2::new(x, y), target_x)
    }

    #[test]
    fn test_spawn_range() {
        let tuning = Tuning::default();
        let mut rng = seeded_rng(7);
        for id in 0..200 {
            let r = Rocket::spawn(id, &tuning, 50.0, &mut rng);
            assert_eq!(r.pos.x, 568.0);
            assert!((50.0..=462.0).contains(&r.pos.y));
            assert_eq!(r.pos.y.fract(), 0.0);
            assert_eq!(r.target_x, 50.0);
            assert!(!r.triggered);
        }
    }

    #[test]
    fn test_trigger_fires_exactly_once() {
        let bird = Rect::new(50, 240, 32, 32);
        let mut r = rocket_at(60.0, 250.0, 50.0);

        // Not there yet
        assert!(!r.check_trigger(&bird));
        assert!(!r.triggered);

        r.update(1000.0 / 60.0 * 2.0);
        assert!(r.pos.x <= 50.0);
        assert!(r.check_trigger(&bird));
        assert!(r.triggered);

        // Later ticks never fire again, even while overlapping
        assert!(!r.check_trigger(&bird));
        r.update(1000.0 / 60.0);
        assert!(!r.check_trigger(&bird));
    }

    #[test]
    fn test_trigger_miss_is_still_spent() {
        let bird = Rect::new(50, 240, 32, 32);
        let mut r = rocket_at(50.0, 100.0, 50.0);
        assert!(!r.check_trigger(&bird));
        assert!(r.triggered);

        // Bird moves into the rocket's path afterwards: no second check
        let bird = Rect::new(50, 100, 32, 32);
        assert!(!r.check_trigger(&bird));
    }

    #[test]
    fn test_pruned_after_leaving_screen() {
        let mut r = rocket_at(-39.0, 100.0, 50.0);
        assert!(r.is_active());
        r.update(10.0);
        assert!(!r.is_active());
    }
}

//! Heart collectible: score and energy on contact

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::{Active, Bounds, Position, Update};
use super::rocket::random_spawn_y;
use crate::tuning::{HeartTuning, Tuning};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heart {
    pub id: u32,
    pub pos: Vec2,
    pub params: HeartTuning,
}

impl Heart {
    pub fn new(id: u32, params: HeartTuning, start: Vec2) -> Self {
        Self {
            id,
            pos: start,
            params,
        }
    }

    /// Enter at the right edge at a random height
    pub fn spawn<R: Rng + ?Sized>(id: u32, tuning: &Tuning, rng: &mut R) -> Self {
        let y = random_spawn_y(rng, tuning.screen_height, tuning.heart.spawn_margin);
        Self::new(id, tuning.heart, Vec2::new(tuning.screen_width, y))
    }

    pub fn touches(&self, other: &Rect) -> bool {
        self.rect().intersects(other)
    }
}

impl Position for Heart {
    fn position(&self) -> Vec2 {
        self.pos
    }
}

impl Update for Heart {
    fn update(&mut self, elapsed_ms: f32) {
        self.pos.x -= self.params.speed * elapsed_ms;
    }
}

impl Bounds for Heart {
    fn rect(&self) -> Rect {
        Rect::at(self.pos, Vec2::splat(self.params.size))
    }
}

impl Active for Heart {
    /// Gone as soon as it reaches the left edge
    fn is_active(&self) -> bool {
        self.pos.x > 0.0
    }
}

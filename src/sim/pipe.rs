//! Pipe pairs: a top and bottom stack with a randomly placed gap
//!
//! The silhouette is built from body and end pieces. Body pieces stack up
//! from the bottom edge and down from the top edge, and each stack ends in
//! one end piece facing the gap.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Mask, Rect};
use super::entity::{Active, Bounds, Position, Update};
use super::silhouette::Silhouettes;
use crate::tuning::{PipeTuning, Tuning};

/// A pair of pipes scrolling left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipePair {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Pieces in the top stack, end piece included
    pub top_pieces: u32,
    /// Pieces in the bottom stack, end piece included
    pub bottom_pieces: u32,
    /// Set once the bird has cleared this pair
    pub scored: bool,
    pub geometry: PipeTuning,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl PipePair {
    /// Spawn at the right edge with a random split of the body segments
    pub fn spawn<R: Rng + ?Sized>(id: u32, tuning: &Tuning, rng: &mut R) -> Self {
        let total = tuning.total_pipe_segments();
        let bottom = rng.random_range(1..total);
        Self::with_split(id, tuning, bottom, total - bottom)
    }

    /// Build from explicit body counts (end pieces excluded)
    pub fn with_split(id: u32, tuning: &Tuning, bottom_body: u32, top_body: u32) -> Self {
        Self {
            id,
            x: tuning.screen_width - 1.0,
            top_pieces: top_body + 1,
            bottom_pieces: bottom_body + 1,
            scored: false,
            geometry: tuning.pipe,
            screen_width: tuning.screen_width,
            screen_height: tuning.screen_height,
        }
    }

    /// Body segments only, as drawn from the random split
    pub fn body_segments(&self) -> u32 {
        self.top_pieces + self.bottom_pieces - 2
    }

    pub fn top_height_px(&self) -> f32 {
        self.top_pieces as f32 * self.geometry.piece_height
    }

    pub fn bottom_height_px(&self) -> f32 {
        self.bottom_pieces as f32 * self.geometry.piece_height
    }

    /// Open vertical span between the two end pieces
    pub fn gap(&self) -> (f32, f32) {
        (
            self.top_height_px(),
            self.screen_height - self.bottom_height_px(),
        )
    }

    /// True while any part of the pair is on screen
    pub fn visible(&self) -> bool {
        -self.geometry.width < self.x && self.x < self.screen_width
    }

    /// Trailing edge has passed `x`
    pub fn passed(&self, x: f32) -> bool {
        self.x + self.geometry.width < x
    }

    /// Piece placements, relative to the pair's top-left, as (y, is_end)
    fn pieces(&self) -> impl Iterator<Item = (i32, bool)> + '_ {
        let piece = self.geometry.piece_height as i32;
        let height = self.screen_height as i32;
        let top_body = self.top_pieces as i32 - 1;
        let bottom_body = self.bottom_pieces as i32 - 1;

        let top = (0..top_body).map(move |i| (i * piece, false));
        let top_end = std::iter::once((top_body * piece, true));
        let bottom = (1..=bottom_body).map(move |i| (height - i * piece, false));
        let bottom_end = std::iter::once((height - bottom_body * piece - piece, true));
        top.chain(top_end).chain(bottom).chain(bottom_end)
    }

    /// Pixel-accurate hit test against a silhouette drawn at `other_rect`
    pub fn collides_with(&self, silhouettes: &Silhouettes, other: &Mask, other_rect: Rect) -> bool {
        let origin = self.rect().top_left();
        if !self.rect().intersects(&other_rect) {
            return false;
        }
        self.pieces().any(|(y, is_end)| {
            let piece = if is_end {
                &silhouettes.pipe_end
            } else {
                &silhouettes.pipe_body
            };
            let piece_origin = origin + IVec2::new(0, y);
            piece.overlaps(other, other_rect.top_left() - piece_origin)
        })
    }

    /// Render the whole pair into one mask
    pub fn silhouette(&self, silhouettes: &Silhouettes) -> Mask {
        let mut mask = Mask::new(self.geometry.width as u32, self.screen_height as u32);
        for (y, is_end) in self.pieces() {
            let piece = if is_end {
                &silhouettes.pipe_end
            } else {
                &silhouettes.pipe_body
            };
            for py in 0..piece.height() {
                for px in 0..piece.width() {
                    let ty = y + py as i32;
                    if ty >= 0 && piece.get(px, py) {
                        mask.set(px, ty as u32, true);
                    }
                }
            }
        }
        mask
    }
}

impl Position for PipePair {
    fn position(&self) -> Vec2 {
        Vec2::new(self.x, 0.0)
    }
}

impl Update for PipePair {
    fn update(&mut self, elapsed_ms: f32) {
        self.x -= self.geometry.speed * elapsed_ms;
    }
}

impl Bounds for PipePair {
    fn rect(&self) -> Rect {
        Rect::at(
            self.position(),
            Vec2::new(self.geometry.width, self.screen_height),
        )
    }
}

impl Active for PipePair {
    fn is_active(&self) -> bool {
        self.visible()
    }
}

//! Collision primitives: integer rectangles and pixel masks
//!
//! Hearts and rockets use coarse rectangle overlap. Pipes use pixel masks,
//! because the gap inside a pipe's bounding box must not count as a hit.

use glam::{IVec2, Vec2};

use crate::error::ConfigError;

/// Alpha values above this mark a pixel as solid
pub const ALPHA_THRESHOLD: u8 = 127;

/// Axis-aligned rectangle in whole screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from a floating point position, truncating toward zero
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x as i32, pos.y as i32, size.x as i32, size.y as i32)
    }

    #[inline]
    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True when the two rectangles share a region of positive area.
    /// Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A 1-bit silhouette, one bit per pixel, rows packed into `u64` words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// Empty (fully transparent) mask
    pub fn new(width: u32, height: u32) -> Self {
        let words_per_row = (width as usize).div_ceil(64);
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    /// Fully solid mask
    pub fn filled(width: u32, height: u32) -> Self {
        let mut mask = Self::new(width, height);
        mask.fill_rect(0, 0, width, height);
        mask
    }

    /// Solid ellipse inscribed in the mask bounds
    pub fn ellipse(width: u32, height: u32) -> Self {
        let mut mask = Self::new(width, height);
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        for y in 0..height {
            for x in 0..width {
                // Sample pixel centres
                let dx = (x as f32 + 0.5 - rx) / rx;
                let dy = (y as f32 + 0.5 - ry) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Build from a row-major alpha channel, solid where alpha > `ALPHA_THRESHOLD`
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Result<Self, ConfigError> {
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(ConfigError::MaskSize {
                expected,
                actual: alpha.len(),
            });
        }

        let mut mask = Self::new(width, height);
        for (i, &a) in alpha.iter().enumerate() {
            if a > ALPHA_THRESHOLD {
                mask.set(i as u32 % width, i as u32 / width, true);
            }
        }
        Ok(mask)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> (usize, u64) {
        let word = y as usize * self.words_per_row + x as usize / 64;
        (word, 1u64 << (x % 64))
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (word, bit) = self.index(x, y);
        self.bits[word] & bit != 0
    }

    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (word, bit) = self.index(x, y);
        if solid {
            self.bits[word] |= bit;
        } else {
            self.bits[word] &= !bit;
        }
    }

    /// Mark a rectangle solid (clipped to the mask)
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.set(px, py, true);
            }
        }
    }

    /// Number of solid pixels
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// True if any solid pixel of `other`, placed with its top-left corner at
    /// `offset` relative to this mask, lands on a solid pixel of this mask
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        let x_start = offset.x.max(0);
        let y_start = offset.y.max(0);
        let x_end = (offset.x + other.width as i32).min(self.width as i32);
        let y_end = (offset.y + other.height as i32).min(self.height as i32);
        if x_start >= x_end || y_start >= y_end {
            return false;
        }

        for y in y_start..y_end {
            let oy = (y - offset.y) as u32;
            for x in x_start..x_end {
                let ox = (x - offset.x) as u32;
                if self.get(x as u32, y as u32) && other.get(ox, oy) {
                    return true;
                }
            }
        }
        false
    }
}

/// Pixel-accurate test between two masks drawn at `a_rect` and `b_rect`
pub fn masks_collide(a: &Mask, a_rect: Rect, b: &Mask, b_rect: Rect) -> bool {
    a.overlaps(b, b_rect.top_left() - a_rect.top_left())
}

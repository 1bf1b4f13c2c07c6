//! Capabilities shared by the moving entities
//!
//! Each entity kind implements only what it needs: the bird has no notion of
//! leaving the screen, and rockets and hearts are tested by rectangle only.

use std::collections::VecDeque;

use glam::Vec2;

use super::collision::Rect;

/// Entity with a top-left position
pub trait Position {
    fn position(&self) -> Vec2;
}

/// Entity advanced by simulated time
pub trait Update {
    fn update(&mut self, elapsed_ms: f32);
}

/// Entity with a bounding box
pub trait Bounds {
    fn rect(&self) -> Rect;
}

/// Entity that can scroll off the playfield
pub trait Active {
    /// False once the entity should be pruned
    fn is_active(&self) -> bool;
}

/// Advance every entity in order, let `visit` inspect it, and collect the
/// survivors into a new queue. `visit` returns false to consume the entity.
pub fn advance_and_retain<T, F>(entities: VecDeque<T>, elapsed_ms: f32, mut visit: F) -> VecDeque<T>
where
    T: Update + Active,
    F: FnMut(&mut T) -> bool,
{
    entities
        .into_iter()
        .filter_map(|mut e| {
            e.update(elapsed_ms);
            let keep = visit(&mut e) && e.is_active();
            keep.then_some(e)
        })
        .collect()
}

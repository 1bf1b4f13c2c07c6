//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - Spawn-order iteration (oldest entity first)
//! - No rendering or platform dependencies

pub mod bird;
pub mod collision;
pub mod entity;
pub mod heart;
pub mod pipe;
pub mod rocket;
pub mod silhouette;
pub mod spawn;
pub mod state;
pub mod tick;

use rand::SeedableRng;
use rand_pcg::Pcg32;

pub use bird::{Bird, Flap};
pub use collision::{Mask, Rect, masks_collide};
pub use entity::{Active, Bounds, Position, Update};
pub use heart::Heart;
pub use pipe::PipePair;
pub use rocket::Rocket;
pub use silhouette::{Silhouettes, WingPose};
pub use spawn::{SpawnSchedule, SpawnTimer};
pub use state::{EndReason, GameEvent, GamePhase, GameState};
pub use tick::{InputEvent, TickInput, tick};

/// Reproducible RNG for a run seed
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

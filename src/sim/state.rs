//! Game state and core simulation types
//!
//! The loop owns every entity collection exclusively; nothing here is shared
//! across threads.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::heart::Heart;
use super::pipe::PipePair;
use super::rocket::Rocket;
use super::silhouette::{Silhouettes, WingPose};
use super::spawn::SpawnSchedule;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Simulation frozen until the next pause toggle
    Paused,
    /// Run ended (absorbing)
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Quit,
    PipeCollision,
    /// Bird left the vertical playfield
    OutOfBounds,
    RocketStrike,
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PipeSpawned { id: u32, bottom_pieces: u32 },
    RocketSpawned { id: u32, y: f32 },
    HeartSpawned { id: u32, y: f32 },
    Flapped { energy: f32 },
    /// Flap requested with too little energy
    FlapFailed,
    PipeCleared { id: u32 },
    HeartCollected { id: u32 },
    /// Rocket reached its target column and missed
    RocketDefused { id: u32 },
    Paused,
    Resumed,
    GameOver { reason: EndReason, score: u32 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Frames simulated while running (paused ticks don't count)
    pub frame_clock: u64,
    pub phase: GamePhase,
    pub end_reason: Option<EndReason>,
    pub score: u32,
    pub bird: Bird,
    /// Oldest (leftmost) first
    pub pipes: VecDeque<PipePair>,
    pub rockets: VecDeque<Rocket>,
    pub hearts: VecDeque<Heart>,
    pub schedule: SpawnSchedule,
    #[serde(skip)]
    pub silhouettes: Arc<Silhouettes>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// New run with stock shapes
    pub fn new(tuning: Tuning) -> Self {
        let silhouettes = Silhouettes::from_tuning(&tuning).shared();
        Self::with_silhouettes(tuning, silhouettes)
    }

    /// New run using caller-provided sprite masks
    pub fn with_silhouettes(tuning: Tuning, silhouettes: Arc<Silhouettes>) -> Self {
        Self {
            bird: Bird::new(tuning.bird),
            schedule: SpawnSchedule::from_tuning(&tuning),
            tuning,
            frame_clock: 0,
            phase: GamePhase::Running,
            end_reason: None,
            score: 0,
            pipes: VecDeque::new(),
            rockets: VecDeque::new(),
            hearts: VecDeque::new(),
            silhouettes,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Simulated milliseconds since the run began
    pub fn sim_time_ms(&self) -> u64 {
        self.frame_clock * 1000 / self.tuning.fps as u64
    }

    pub fn wing_pose(&self) -> WingPose {
        WingPose::at(self.sim_time_ms())
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Move to the absorbing end state
    pub fn end(&mut self, reason: EndReason) -> GameEvent {
        self.phase = GamePhase::GameOver;
        self.end_reason = Some(reason);
        log::info!("Game over ({:?}) with score {}", reason, self.score);
        GameEvent::GameOver {
            reason,
            score: self.score,
        }
    }

    /// Append a pipe, keeping the queue ordered left to right
    pub fn push_pipe(&mut self, pipe: PipePair) {
        debug_assert!(
            self.pipes.back().is_none_or(|last| last.x <= pipe.x),
            "pipes must be queued in left-to-right order"
        );
        self.pipes.push_back(pipe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(Tuning::default());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.frame_clock, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird.energy, 1.0);
        assert_eq!(state.wing_pose(), WingPose::Down);
    }

    #[test]
    fn test_entity_ids_are_sequential() {
        let mut state = GameState::new(Tuning::default());
        assert_eq!(state.next_entity_id(), 1);
        assert_eq!(state.next_entity_id(), 2);
    }

    #[test]
    fn test_sim_time_follows_frame_clock() {
        let mut state = GameState::new(Tuning::default());
        state.frame_clock = 15;
        assert_eq!(state.sim_time_ms(), 250);
        assert_eq!(state.wing_pose(), WingPose::Up);
    }

    #[test]
    fn test_end_records_reason() {
        let mut state = GameState::new(Tuning::default());
        state.score = 7;
        let event = state.end(EndReason::Quit);
        assert!(state.is_over());
        assert_eq!(state.end_reason, Some(EndReason::Quit));
        assert_eq!(
            event,
            GameEvent::GameOver {
                reason: EndReason::Quit,
                score: 7
            }
        );
    }
}

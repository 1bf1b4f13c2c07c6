//! Rendering boundary
//!
//! Each tick the loop hands renderers a read-only snapshot. Nothing flows
//! back from the renderer into the simulation.

use std::io::Write;

use glam::Vec2;
use serde::Serialize;

use crate::sim::{EndReason, GamePhase, GameState, WingPose};

/// Energy bar width in pixels
pub const ENERGY_BAR_WIDTH: u32 = 100;
/// Above this ratio the bar shows as healthy
pub const ENERGY_LOW_RATIO: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnergyBand {
    Healthy,
    Low,
}

/// What the energy bar should show
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyBar {
    pub ratio: f32,
    /// Filled pixels out of `ENERGY_BAR_WIDTH`
    pub fill_px: u32,
    pub band: EnergyBand,
}

impl EnergyBar {
    pub fn new(ratio: f32) -> Self {
        let ratio = ratio.clamp(0.0, 1.0);
        Self {
            ratio,
            fill_px: (ENERGY_BAR_WIDTH as f32 * ratio) as u32,
            band: if ratio > ENERGY_LOW_RATIO {
                EnergyBand::Healthy
            } else {
                EnergyBand::Low
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirdView {
    pub pos: Vec2,
    pub velocity: f32,
    pub wing: WingPose,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipeView {
    pub id: u32,
    pub x: f32,
    pub top_pieces: u32,
    pub bottom_pieces: u32,
    pub top_height_px: f32,
    pub bottom_height_px: f32,
    pub scored: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocketView {
    pub id: u32,
    pub pos: Vec2,
    pub triggered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeartView {
    pub id: u32,
    pub pos: Vec2,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub frame: u64,
    pub phase: GamePhase,
    pub end_reason: Option<EndReason>,
    pub score: u32,
    pub energy: EnergyBar,
    pub bird: BirdView,
    pub pipes: Vec<PipeView>,
    pub rockets: Vec<RocketView>,
    pub hearts: Vec<HeartView>,
    pub screen: Vec2,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        Self {
            frame: state.frame_clock,
            phase: state.phase,
            end_reason: state.end_reason,
            score: state.score,
            energy: EnergyBar::new(state.bird.energy),
            bird: BirdView {
                pos: state.bird.pos,
                velocity: state.bird.velocity,
                wing: state.wing_pose(),
            },
            pipes: state
                .pipes
                .iter()
                .map(|p| PipeView {
                    id: p.id,
                    x: p.x,
                    top_pieces: p.top_pieces,
                    bottom_pieces: p.bottom_pieces,
                    top_height_px: p.top_height_px(),
                    bottom_height_px: p.bottom_height_px(),
                    scored: p.scored,
                })
                .collect(),
            rockets: state
                .rockets
                .iter()
                .map(|r| RocketView {
                    id: r.id,
                    pos: r.pos,
                    triggered: r.triggered,
                })
                .collect(),
            hearts: state
                .hearts
                .iter()
                .map(|h| HeartView { id: h.id, pos: h.pos })
                .collect(),
            screen: Vec2::new(state.tuning.screen_width, state.tuning.screen_height),
        }
    }
}

/// Draws frames; implemented outside the simulation
pub trait Renderer {
    fn render(&mut self, frame: &FrameView);
}

/// Discards every frame (headless runs)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &FrameView) {}
}

/// Writes each frame as one line of JSON
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, frame: &FrameView) {
        if self.failed {
            return;
        }
        let written = serde_json::to_writer(&mut self.out, frame)
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        if let Err(e) = written {
            // Stop after the first failure instead of logging every frame
            log::warn!("Frame output failed: {}", e);
            self.failed = true;
        }
    }
}

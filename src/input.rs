//! Physical input mapping
//!
//! Several physical inputs drive the same logical action. Only releases
//! count, so holding a key never repeats a flap.

use crate::sim::{InputEvent, TickInput};

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Pause,
    P,
    Up,
    Return,
    Space,
    Other,
}

/// Raw events as delivered by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalInput {
    WindowClose,
    KeyDown(Key),
    KeyUp(Key),
    MouseButtonUp,
}

/// Translate one physical event into a logical action, if it has one
pub fn map_input(input: PhysicalInput) -> Option<InputEvent> {
    match input {
        PhysicalInput::WindowClose | PhysicalInput::KeyUp(Key::Escape) => Some(InputEvent::Quit),
        PhysicalInput::KeyUp(Key::Pause | Key::P) => Some(InputEvent::TogglePause),
        PhysicalInput::MouseButtonUp
        | PhysicalInput::KeyUp(Key::Up | Key::Return | Key::Space) => Some(InputEvent::Flap),
        PhysicalInput::KeyUp(Key::Other) | PhysicalInput::KeyDown(_) => None,
    }
}

/// Batch one frame's worth of physical events into a tick input
pub fn collect_tick_input(inputs: impl IntoIterator<Item = PhysicalInput>) -> TickInput {
    TickInput::from_events(inputs.into_iter().filter_map(map_input))
}

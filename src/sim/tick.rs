//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame. Order within a tick:
//! spawn, apply input, check for a fatal hit, advance pipes, rockets and
//! hearts, advance the bird, then score cleared pipes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bird::Flap;
use super::entity::{Bounds, Update, advance_and_retain};
use super::heart::Heart;
use super::pipe::PipePair;
use super::rocket::Rocket;
use super::state::{EndReason, GameEvent, GamePhase, GameState};

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Quit,
    TogglePause,
    Flap,
}

/// Input events for a single tick, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn flap() -> Self {
        Self::from_events([InputEvent::Flap])
    }

    pub fn toggle_pause() -> Self {
        Self::from_events([InputEvent::TogglePause])
    }

    pub fn quit() -> Self {
        Self::from_events([InputEvent::Quit])
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Advance the game state by one frame
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_over() {
        return events;
    }

    if state.phase == GamePhase::Running {
        spawn_due(state, rng, &mut events);
    }

    for event in &input.events {
        match event {
            InputEvent::Quit => {
                events.push(state.end(EndReason::Quit));
                return events;
            }
            InputEvent::TogglePause => match state.phase {
                GamePhase::Running => {
                    state.phase = GamePhase::Paused;
                    log::info!("Paused at frame {}", state.frame_clock);
                    events.push(GameEvent::Paused);
                }
                GamePhase::Paused => {
                    state.phase = GamePhase::Running;
                    log::info!("Resumed at frame {}", state.frame_clock);
                    events.push(GameEvent::Resumed);
                }
                GamePhase::GameOver => {}
            },
            InputEvent::Flap => {
                // Paused birds can't flap
                if state.phase != GamePhase::Running {
                    continue;
                }
                match state.bird.flap() {
                    Flap::Flapped => events.push(GameEvent::Flapped {
                        energy: state.bird.energy,
                    }),
                    Flap::Exhausted => {
                        log::debug!("Flap failed, energy {:.3}", state.bird.energy);
                        events.push(GameEvent::FlapFailed);
                    }
                }
            }
        }
    }

    // Frozen while paused: no movement, no collisions, clock holds still
    if state.phase != GamePhase::Running {
        return events;
    }

    let frame_ms = state.tuning.frame_ms();
    let bird_rect = state.bird.rect();

    // Fatal contact with pipes or the playfield edges
    let bird_mask = state.silhouettes.bird(state.wing_pose());
    if state
        .pipes
        .iter()
        .any(|p| p.collides_with(&state.silhouettes, bird_mask, bird_rect))
    {
        events.push(state.end(EndReason::PipeCollision));
        return events;
    }
    if !state.bird.in_bounds(state.tuning.bird_floor()) {
        events.push(state.end(EndReason::OutOfBounds));
        return events;
    }

    // Pipes are ordered left to right, so only the head can be off screen
    while state.pipes.front().is_some_and(|p| !p.visible()) {
        if let Some(pipe) = state.pipes.pop_front() {
            log::trace!("Pipe {} left the screen", pipe.id);
        }
    }
    for pipe in &mut state.pipes {
        pipe.update(frame_ms);
    }

    // Rockets: each gets exactly one hit check at its target column
    let mut strike = None;
    let rockets = std::mem::take(&mut state.rockets);
    state.rockets = advance_and_retain(rockets, frame_ms, |rocket| {
        let armed = !rocket.triggered;
        if rocket.check_trigger(&bird_rect) {
            strike = Some(rocket.id);
        } else if armed && rocket.triggered {
            events.push(GameEvent::RocketDefused { id: rocket.id });
        }
        true
    });
    if let Some(id) = strike {
        log::debug!("Rocket {} hit the bird", id);
        events.push(state.end(EndReason::RocketStrike));
        return events;
    }

    // Hearts: consumed on contact wherever they sit in the queue
    let mut collected = Vec::new();
    let hearts = std::mem::take(&mut state.hearts);
    state.hearts = advance_and_retain(hearts, frame_ms, |heart| {
        if heart.touches(&bird_rect) {
            collected.push((heart.id, heart.params));
            false
        } else {
            true
        }
    });
    for (id, params) in collected {
        state.score += params.score;
        state.bird.regen_energy(params.energy);
        log::debug!(
            "Heart {} collected, score {}, energy {:.2}",
            id,
            state.score,
            state.bird.energy
        );
        events.push(GameEvent::HeartCollected { id });
    }

    state.bird.update(frame_ms);

    let bird_x = state.bird.pos.x;
    for pipe in &mut state.pipes {
        if !pipe.scored && pipe.passed(bird_x) {
            pipe.scored = true;
            state.score += 1;
            log::debug!("Pipe {} cleared, score {}", pipe.id, state.score);
            events.push(GameEvent::PipeCleared { id: pipe.id });
        }
    }

    state.frame_clock += 1;
    log::trace!(
        "Frame {}: bird y={:.2} v={:.4} energy={:.3}",
        state.frame_clock,
        state.bird.pos.y,
        state.bird.velocity,
        state.bird.energy
    );

    events
}

/// Spawn whatever the schedule says is due on the current frame
fn spawn_due<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, events: &mut Vec<GameEvent>) {
    let due = state.schedule.due(state.frame_clock);

    if due.pipe {
        let id = state.next_entity_id();
        let pipe = PipePair::spawn(id, &state.tuning, rng);
        log::debug!(
            "Spawned pipe {} ({} top / {} bottom pieces)",
            id,
            pipe.top_pieces,
            pipe.bottom_pieces
        );
        events.push(GameEvent::PipeSpawned {
            id,
            bottom_pieces: pipe.bottom_pieces,
        });
        state.push_pipe(pipe);
    }

    if due.rocket {
        let id = state.next_entity_id();
        let rocket = Rocket::spawn(id, &state.tuning, state.bird.pos.x, rng);
        log::debug!("Spawned rocket {} at y={}", id, rocket.pos.y);
        events.push(GameEvent::RocketSpawned {
            id,
            y: rocket.pos.y,
        });
        state.rockets.push_back(rocket);
    }

    if due.heart {
        let id = state.next_entity_id();
        let heart = Heart::spawn(id, &state.tuning, rng);
        log::debug!("Spawned heart {} at y={}", id, heart.pos.y);
        events.push(GameEvent::HeartSpawned { id, y: heart.pos.y });
        state.hearts.push_back(heart);
    }
}

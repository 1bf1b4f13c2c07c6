//! Game loop driver
//!
//! Polls input, ticks the simulation, hands a frame to the renderer, and
//! optionally waits for the next frame deadline.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use rand_pcg::Pcg32;

use crate::frame::{FrameView, Renderer};
use crate::sim::{EndReason, GameEvent, GameState, TickInput, seeded_rng, tick};

/// Supplies one batch of input per tick
pub trait InputSource {
    fn poll(&mut self, frame: &FrameView) -> TickInput;
}

/// Replays a fixed list of per-tick inputs, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _frame: &FrameView) -> TickInput {
        self.script.pop_front().unwrap_or_default()
    }
}

/// Demo player: flaps from just above the bottom of the next gap, so each
/// climb peaks inside the gap
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Clearance kept above the lower pipe before flapping
    pub slack: f32,
    bird_size: f32,
    pipe_width: f32,
}

impl Autopilot {
    pub fn new(tuning: &crate::Tuning) -> Self {
        Self {
            slack: 10.0,
            bird_size: tuning.bird.size,
            pipe_width: tuning.pipe.width,
        }
    }

    /// Bird top below this line triggers a flap
    fn flap_line(&self, frame: &FrameView) -> f32 {
        let bird_x = frame.bird.pos.x;
        frame
            .pipes
            .iter()
            .find(|p| p.x + self.pipe_width >= bird_x)
            .map(|p| frame.screen.y - p.bottom_height_px - self.bird_size - self.slack)
            .unwrap_or(frame.screen.y / 2.0)
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, frame: &FrameView) -> TickInput {
        // Only flap while falling, so one climb plays out before the next
        if frame.bird.pos.y > self.flap_line(frame) && frame.bird.velocity > 0.0 {
            TickInput::flap()
        } else {
            TickInput::default()
        }
    }
}

/// Sleeps until the next frame deadline at a fixed rate
#[derive(Debug)]
pub struct FrameLimiter {
    frame: Duration,
    next: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            next: None,
        }
    }

    /// Block until the next frame is due
    pub fn wait(&mut self) {
        let now = Instant::now();
        let deadline = self.next.unwrap_or(now);
        if deadline > now {
            thread::sleep(deadline - now);
        }
        // A late frame resets the cadence instead of bursting to catch up
        let base = deadline.max(now);
        self.next = Some(base + self.frame);
    }
}

/// Outcome of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    /// Ticks driven, paused ones included
    pub ticks: u64,
    /// Simulated frames (paused ticks excluded)
    pub frames: u64,
    /// None when the tick cap stopped the run
    pub end_reason: Option<EndReason>,
}

/// A single run: state, its RNG, and the loop around them
pub struct Session {
    pub state: GameState,
    rng: Pcg32,
    limiter: Option<FrameLimiter>,
    ticks: u64,
}

impl Session {
    pub fn new(state: GameState, seed: u64) -> Self {
        log::info!("New session with seed {}", seed);
        Self {
            state,
            rng: seeded_rng(seed),
            limiter: None,
            ticks: 0,
        }
    }

    /// Pace ticks in real time at the tuning rate
    pub fn realtime(mut self) -> Self {
        self.limiter = Some(FrameLimiter::new(self.state.tuning.fps));
        self
    }

    /// Run one tick with the given input and render the result
    pub fn step<R: Renderer + ?Sized>(&mut self, input: &TickInput, renderer: &mut R) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input, &mut self.rng);
        self.ticks += 1;
        for event in &events {
            log::debug!("{:?}", event);
        }
        renderer.render(&FrameView::capture(&self.state));
        events
    }

    /// Loop until the run ends or `max_ticks` is reached
    pub fn run<I, R>(&mut self, input: &mut I, renderer: &mut R, max_ticks: Option<u64>) -> SessionSummary
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        while !self.state.is_over() && max_ticks.is_none_or(|max| self.ticks < max) {
            if let Some(limiter) = self.limiter.as_mut() {
                limiter.wait();
            }
            let batch = input.poll(&FrameView::capture(&self.state));
            self.step(&batch, renderer);
        }

        if !self.state.is_over() {
            log::info!("Stopped after {} ticks without game over", self.ticks);
        }
        self.summary()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.state.score,
            ticks: self.ticks,
            frames: self.state.frame_clock,
            end_reason: self.state.end_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::frame::{JsonLinesRenderer, NullRenderer};
    use crate::sim::{GamePhase, InputEvent};

    #[test]
    fn test_scripted_quit() {
        let mut session = Session::new(GameState::new(Tuning::default()), 1);
        let mut input = ScriptedInput::new([
            TickInput::default(),
            TickInput::default(),
            TickInput::quit(),
        ]);
        let summary = session.run(&mut input, &mut NullRenderer, None);
        assert_eq!(summary.end_reason, Some(EndReason::Quit));
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.frames, 2);
    }

    #[test]
    fn test_idle_bird_falls_out() {
        let mut session = Session::new(GameState::new(Tuning::default()), 2);
        let summary = session.run(&mut ScriptedInput::default(), &mut NullRenderer, Some(10_000));
        assert!(summary.end_reason.is_some());
        assert!(summary.ticks < 10_000);
    }

    #[test]
    fn test_tick_cap_stops_run() {
        let mut session = Session::new(GameState::new(Tuning::default()), 3);
        let summary = session.run(&mut ScriptedInput::default(), &mut NullRenderer, Some(5));
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.end_reason, None);
        assert_eq!(session.state.phase, GamePhase::Running);
    }

    #[test]
    fn test_paused_ticks_are_counted_but_not_simulated() {
        let mut session = Session::new(GameState::new(Tuning::default()), 4);
        let mut script = vec![TickInput::toggle_pause()];
        script.extend(std::iter::repeat_n(TickInput::default(), 9));
        script.push(TickInput::from_events([InputEvent::TogglePause, InputEvent::Quit]));
        let summary = session.run(&mut ScriptedInput::new(script), &mut NullRenderer, None);
        assert_eq!(summary.ticks, 11);
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.end_reason, Some(EndReason::Quit));
    }

    #[test]
    fn test_autopilot_outlasts_idle_bird() {
        // Rockets cleared every tick so only flying skill matters
        fn frames_survived(input: &mut dyn InputSource) -> u64 {
            let mut session = Session::new(GameState::new(Tuning::default()), 8);
            while !session.state.is_over() && session.state.frame_clock < 1_000 {
                session.state.rockets.clear();
                let batch = input.poll(&FrameView::capture(&session.state));
                session.step(&batch, &mut NullRenderer);
            }
            session.state.frame_clock
        }

        let idle = frames_survived(&mut ScriptedInput::default());
        let flown = frames_survived(&mut Autopilot::new(&Tuning::default()));
        assert!(idle < 170);
        assert!(flown > idle);
    }

    #[test]
    fn test_autopilot_flaps_when_sinking_below_target() {
        let tuning = Tuning::default();
        let mut state = GameState::new(tuning.clone());
        let mut pilot = Autopilot::new(&tuning);

        state.bird.pos.y = 400.0;
        state.bird.velocity = 0.05;
        assert_eq!(pilot.poll(&FrameView::capture(&state)), TickInput::flap());

        // Rising already
        state.bird.velocity = -0.05;
        assert!(pilot.poll(&FrameView::capture(&state)).is_empty());

        // Above target
        state.bird.pos.y = 100.0;
        state.bird.velocity = 0.05;
        assert!(pilot.poll(&FrameView::capture(&state)).is_empty());
    }

    #[test]
    fn test_renderer_sees_every_tick() {
        let mut session = Session::new(GameState::new(Tuning::default()), 5);
        let mut renderer = JsonLinesRenderer::new(Vec::new());
        let mut input = ScriptedInput::new([TickInput::default(), TickInput::quit()]);
        session.run(&mut input, &mut renderer, None);
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_frame_limiter_paces() {
        let mut limiter = FrameLimiter::new(200);
        let start = Instant::now();
        for _ in 0..4 {
            limiter.wait();
        }
        // First wait is immediate, the next three wait ~5 ms each
        assert!(start.elapsed() >= Duration::from_millis(14));
    }
}

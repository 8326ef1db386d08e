//! The frame-stepped game loop.
//!
//! One iteration while playing: capture a frame, classify the gesture,
//! advance bird and pipes, check collisions, render, poll input, then sleep
//! out the rest of the tick. Start and GameOver block on input instead.

use crate::core::config::GameConfig;
use crate::core::constants::{EXIT_CAPTURE_FAILURE, EXIT_ERROR, EXIT_OK, IDLE_POLL_MS};
use crate::game::scene::{Command, Control, SceneController};
use crate::game::types::Scene;
use crate::gesture::flap_signal;
use crate::input::InputSource;
use crate::tracking::{capture_with_retry, FrameSource, HandDetector, RetryPolicy};
use crate::ui::{self, debug_view::DebugSnapshot};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::thread;
use std::time::{Duration, Instant};

/// Why the loop stopped.
#[derive(Debug)]
pub enum ExitReason {
    /// The player quit.
    Quit,
    /// No frame could be captured even after retrying.
    CaptureFailed(io::Error),
}

/// Process exit status for the outcome of [`App::run`].
pub fn exit_status(result: &io::Result<ExitReason>) -> u8 {
    match result {
        Ok(ExitReason::Quit) => EXIT_OK,
        Ok(ExitReason::CaptureFailed(_)) => EXIT_CAPTURE_FAILURE,
        Err(_) => EXIT_ERROR,
    }
}

enum Step {
    Continue,
    Quit,
    CaptureFailed(io::Error),
}

pub struct App<S, D, I, R> {
    controller: SceneController,
    source: S,
    detector: D,
    input: I,
    rng: R,
    retry: RetryPolicy,
    tick_duration: Duration,
    snapshot: DebugSnapshot,
    show_debug: bool,
    /// Keyboard flap waiting for the next tick.
    flap_queued: bool,
}

impl<S, D, I, R> App<S, D, I, R>
where
    S: FrameSource,
    D: HandDetector,
    I: InputSource,
    R: Rng,
{
    pub fn new(config: GameConfig, source: S, detector: D, input: I, mut rng: R) -> Self {
        let retry = RetryPolicy::new(config.capture_retries, config.capture_backoff());
        let tick_duration = config.tick_duration();
        let show_debug = config.show_debug;
        let snapshot = DebugSnapshot {
            source: source.describe(),
            ..DebugSnapshot::default()
        };
        Self {
            controller: SceneController::new(config, &mut rng),
            source,
            detector,
            input,
            rng,
            retry,
            tick_duration,
            snapshot,
            show_debug,
            flap_queued: false,
        }
    }

    pub fn controller(&self) -> &SceneController {
        &self.controller
    }

    /// Run until the player quits or capture fails for good.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<ExitReason> {
        log::info!("Game loop started with {}", self.snapshot.source);
        loop {
            let step = match self.controller.scene() {
                Scene::Start | Scene::GameOver => self.wait_for_input(terminal)?,
                Scene::Playing => self.play_tick(terminal)?,
            };
            match step {
                Step::Continue => {}
                Step::Quit => return Ok(ExitReason::Quit),
                Step::CaptureFailed(e) => return Ok(ExitReason::CaptureFailed(e)),
            }
        }
    }

    /// Redraw and block until a command arrives or the poll times out.
    fn wait_for_input<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<Step> {
        self.draw(terminal)?;
        match self.input.poll(Duration::from_millis(IDLE_POLL_MS))? {
            Some(command) => Ok(self.apply(command)),
            None => Ok(Step::Continue),
        }
    }

    fn play_tick<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<Step> {
        let tick_start = Instant::now();

        let frame = match capture_with_retry(&mut self.source, &self.retry) {
            Ok(frame) => frame,
            Err(e) => return Ok(Step::CaptureFailed(e)),
        };
        let hands = self.detector.detect(&frame);
        let gesture = flap_signal(&hands);
        self.snapshot.sequence = frame.sequence;
        self.snapshot.resolution = (frame.width, frame.height);
        self.snapshot.hands = hands;
        self.snapshot.flap = gesture;

        let flap = gesture || std::mem::take(&mut self.flap_queued);
        self.controller.tick(flap, &mut self.rng);

        self.draw(terminal)?;

        while let Some(command) = self.input.poll(Duration::ZERO)? {
            let step = self.apply(command);
            if !matches!(step, Step::Continue) {
                return Ok(step);
            }
        }

        let elapsed = tick_start.elapsed();
        if elapsed < self.tick_duration {
            thread::sleep(self.tick_duration - elapsed);
        }
        Ok(Step::Continue)
    }

    fn apply(&mut self, command: Command) -> Step {
        if command == Command::ToggleDebug {
            self.show_debug = !self.show_debug;
            return Step::Continue;
        }
        match self.controller.handle_command(command, &mut self.rng) {
            Control::Quit => Step::Quit,
            Control::Flap => {
                self.flap_queued = true;
                Step::Continue
            }
            Control::Continue => Step::Continue,
        }
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|f| ui::draw(f, &self.controller, &self.snapshot, self.show_debug))?;
        Ok(())
    }
}

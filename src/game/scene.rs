//! Scene state machine: Start → Playing → GameOver → Playing ...
//!
//! The controller owns the [`GameState`] and decides what each input means
//! in the current scene. It knows nothing about terminals or cameras, so
//! the game loop can feed it scripted input in tests.

use super::collision::collides;
use super::types::{GameState, Scene};
use crate::core::config::GameConfig;
use rand::Rng;

/// UI-agnostic player commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the game on the start screen, flap while playing (Space/Enter).
    Confirm,
    /// Restart after a crash (R).
    Restart,
    /// Leave the game (Q, Esc, Ctrl-C).
    Quit,
    /// Show or hide the landmark debug panel (D).
    ToggleDebug,
    /// Any other key.
    Other,
}

/// What the game loop should do after handling a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// A keyboard flap was queued for the next tick.
    Flap,
    Quit,
}

/// Result of one simulated tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing simulated.
    Idle,
    Alive { scored: bool },
    Crashed,
}

pub struct SceneController {
    scene: Scene,
    state: GameState,
    config: GameConfig,
    best_score: u32,
    rounds: u32,
}

impl SceneController {
    pub fn new<R: Rng>(config: GameConfig, rng: &mut R) -> Self {
        let state = GameState::new(&config, rng);
        Self {
            scene: Scene::Start,
            state,
            config,
            best_score: 0,
            rounds: 0,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Highest score reached this session.
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Rounds started this session.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Interpret a command in the current scene. Unrecognized input changes nothing.
    pub fn handle_command<R: Rng>(&mut self, command: Command, rng: &mut R) -> Control {
        match (self.scene, command) {
            (_, Command::Quit) => {
                log::info!("Quit requested in {} scene", self.scene.name());
                Control::Quit
            }
            (Scene::Start, Command::Confirm) => {
                self.enter_playing();
                Control::Continue
            }
            (Scene::Playing, Command::Confirm) if self.config.keyboard_flap => Control::Flap,
            (Scene::GameOver, Command::Restart) => {
                self.state.reset(&self.config, rng);
                self.enter_playing();
                Control::Continue
            }
            _ => Control::Continue,
        }
    }

    /// Simulate one tick of play: bird, pipes, then collision.
    pub fn tick<R: Rng>(&mut self, flap: bool, rng: &mut R) -> TickOutcome {
        if self.scene != Scene::Playing {
            return TickOutcome::Idle;
        }

        self.state.ticks += 1;
        self.state.advance_bird(flap, &self.config);
        let scored = self.state.advance_pipes(&self.config, rng);
        if scored {
            log::debug!("Pipe passed, score {}", self.state.score);
        }

        if collides(&self.state.bird, &self.state.pipes, &self.config) {
            self.enter_game_over();
            return TickOutcome::Crashed;
        }
        TickOutcome::Alive { scored }
    }

    fn enter_playing(&mut self) {
        self.rounds += 1;
        log::info!("Round {} started", self.rounds);
        self.scene = Scene::Playing;
    }

    fn enter_game_over(&mut self) {
        self.best_score = self.best_score.max(self.state.score);
        log::info!(
            "Crashed after {} ticks with score {} (best {})",
            self.state.ticks,
            self.state.score,
            self.best_score
        );
        self.scene = Scene::GameOver;
    }
}

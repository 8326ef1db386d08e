//! Game state data structures: bird, pipes, score and scenes.

use crate::core::config::GameConfig;
use rand::Rng;

/// The player's bird. `x` never changes during a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    pub x: f64,
    /// Vertical position of the center (0 = top of the world).
    pub y: f64,
    /// Vertical velocity per tick (positive = downward).
    pub velocity: f64,
}

impl Bird {
    /// A bird at rest, vertically centered.
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            x: config.bird_x,
            y: config.world_height / 2.0,
            velocity: 0.0,
        }
    }
}

/// A pipe pair with an opening centered on `gap_center_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Left edge.
    pub x: f64,
    pub gap_center_y: f64,
}

impl Pipe {
    /// New pipe at the right boundary with a random gap center in
    /// `[gap_height, world_height - gap_height]`.
    pub fn spawn<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let low = config.gap_height;
        let high = (config.world_height - config.gap_height).max(low);
        Self {
            x: config.world_width,
            gap_center_y: rng.gen_range(low..=high),
        }
    }

    pub fn right(&self, width: f64) -> f64 {
        self.x + width
    }

    pub fn gap_top(&self, gap_height: f64) -> f64 {
        self.gap_center_y - gap_height / 2.0
    }

    pub fn gap_bottom(&self, gap_height: f64) -> f64 {
        self.gap_center_y + gap_height / 2.0
    }
}

/// Which screen the game is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Start,
    Playing,
    GameOver,
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Playing => "playing",
            Self::GameOver => "game-over",
        }
    }
}

/// Everything that changes while playing. Owned by the scene controller.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub bird: Bird,
    /// Oldest pipe first. Never empty.
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// Ticks simulated since the last reset.
    pub ticks: u64,
}

impl GameState {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        Self {
            bird: Bird::spawn(config),
            pipes: vec![Pipe::spawn(config, rng)],
            score: 0,
            ticks: 0,
        }
    }

    /// Full reset for a new round.
    pub fn reset<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) {
        *self = Self::new(config, rng);
    }
}

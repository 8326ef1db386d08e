//! handflap - Flappy Bird in the terminal, flapped with a closed fist.
//!
//! This module exposes the game logic for testing and for the binary.

pub mod app;
pub mod build_info;
pub mod cli;
pub mod core;
pub mod game;
pub mod gesture;
pub mod input;
pub mod tracking;
pub mod ui;

pub use crate::core::config::GameConfig;
pub use game::scene::{Command, SceneController};
pub use game::types::{Bird, GameState, Pipe, Scene};

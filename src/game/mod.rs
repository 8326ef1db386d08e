//! Flappy Bird core: state, physics, collisions and the scene machine.
//!
//! The bird falls under gravity and flaps on a closed fist (or Space),
//! pipes scroll in from the right, and touching a pipe or the world edge
//! ends the round.

pub mod collision;
pub mod physics;
pub mod scene;
pub mod types;

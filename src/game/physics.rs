//! Per-tick bird and pipe motion.

use super::types::{Bird, GameState, Pipe};
use crate::core::config::GameConfig;
use rand::Rng;

/// Advance the bird by one tick.
///
/// A flap replaces the current velocity with `flap_strength`; gravity is
/// then added and the position integrated. Nothing is clamped here, leaving
/// out-of-bounds positions for collision detection to report.
pub fn advance_bird(bird: Bird, flap: bool, gravity: f64, flap_strength: f64) -> Bird {
    let mut velocity = if flap { flap_strength } else { bird.velocity };
    velocity += gravity;
    Bird {
        y: bird.y + velocity,
        velocity,
        ..bird
    }
}

/// Shift every pipe left by `velocity`.
pub fn scroll_pipes(pipes: &mut [Pipe], velocity: f64) {
    for pipe in pipes.iter_mut() {
        pipe.x -= velocity;
    }
}

impl GameState {
    /// Apply one tick of bird physics using the configured constants.
    pub fn advance_bird(&mut self, flap: bool, config: &GameConfig) {
        self.bird = advance_bird(self.bird, flap, config.gravity, config.flap_strength);
    }

    /// Scroll the pipes and retire the leftmost one once it has fully left
    /// the world, spawning a replacement at the right edge and scoring it.
    ///
    /// At most one pipe is retired per tick. Returns whether one was.
    pub fn advance_pipes<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) -> bool {
        scroll_pipes(&mut self.pipes, config.pipe_velocity);

        let leftmost_gone = self
            .pipes
            .first()
            .is_some_and(|pipe| pipe.right(config.pipe_width) < 0.0);
        if !leftmost_gone {
            return false;
        }

        self.pipes.remove(0);
        self.pipes.push(Pipe::spawn(config, rng));
        self.score += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn bird(y: f64, velocity: f64) -> Bird {
        Bird { x: 100.0, y, velocity }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_gravity_without_flap() {
        let next = advance_bird(bird(200.0, 0.0), false, 0.3, -10.0);
        assert_close(next.velocity, 0.3);
        assert_close(next.y, 200.3);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let next = advance_bird(bird(200.0, 5.0), true, 0.3, -10.0);
        assert_close(next.velocity, -9.7);
        assert_close(next.y, 190.3);
    }

    #[test]
    fn test_flap_ignores_prior_velocity() {
        for prior in [-25.0, -3.0, 0.0, 2.5, 40.0] {
            let next = advance_bird(bird(150.0, prior), true, 0.3, -10.0);
            assert_close(next.velocity, -9.7);
        }
    }

    #[test]
    fn test_no_flap_accumulates() {
        let mut b = bird(100.0, 1.0);
        for _ in 0..10 {
            let expected_velocity = b.velocity + 0.3;
            let expected_y = b.y + expected_velocity;
            b = advance_bird(b, false, 0.3, -10.0);
            assert_close(b.velocity, expected_velocity);
            assert_close(b.y, expected_y);
        }
    }

    #[test]
    fn test_bird_x_never_changes() {
        let b = advance_bird(bird(200.0, 3.0), true, 0.3, -10.0);
        assert_eq!(b.x, 100.0);
    }

    #[test]
    fn test_no_clamping_past_bounds() {
        let b = advance_bird(bird(399.0, 30.0), false, 0.3, -10.0);
        assert!(b.y > 400.0);
        let b = advance_bird(bird(2.0, 0.0), true, 0.3, -10.0);
        assert!(b.y < 0.0);
    }

    #[test]
    fn test_scroll_pipes() {
        let mut pipes = vec![
            Pipe {
                x: 300.0,
                gap_center_y: 200.0,
            },
            Pipe {
                x: 500.0,
                gap_center_y: 180.0,
            },
        ];
        scroll_pipes(&mut pipes, 4.0);
        assert_eq!(pipes[0].x, 296.0);
        assert_eq!(pipes[1].x, 496.0);
    }

    #[test]
    fn test_pipe_not_retired_while_visible() {
        let config = GameConfig::default();
        let mut rng = create_test_rng();
        let mut state = GameState::new(&config, &mut rng);
        // Right edge lands exactly on the boundary: not yet gone.
        state.pipes[0].x = -config.pipe_width + config.pipe_velocity;

        assert!(!state.advance_pipes(&config, &mut rng));
        assert_eq!(state.score, 0);
        assert_eq!(state.pipes.len(), 1);
    }

    #[test]
    fn test_pipe_retired_and_replaced() {
        let config = GameConfig::default();
        let mut rng = create_test_rng();
        let mut state = GameState::new(&config, &mut rng);
        state.pipes[0].x = -config.pipe_width + 1.0;

        assert!(state.advance_pipes(&config, &mut rng));
        assert_eq!(state.score, 1);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, config.world_width);
    }

    #[test]
    fn test_score_counts_each_retirement() {
        let config = GameConfig::default();
        let mut rng = create_test_rng();
        let mut state = GameState::new(&config, &mut rng);

        // One full crossing takes spacing / velocity ticks.
        let ticks_per_pipe = (config.pipe_spacing() / config.pipe_velocity).floor() as u32 + 1;
        let mut retired = 0;
        for _ in 0..ticks_per_pipe * 3 {
            if state.advance_pipes(&config, &mut rng) {
                retired += 1;
            }
            assert_eq!(state.pipes.len(), 1);
        }
        assert_eq!(retired, 3);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_only_one_pipe_retired_per_tick() {
        let config = GameConfig::default();
        let mut rng = create_test_rng();
        let mut state = GameState::new(&config, &mut rng);
        state.pipes = vec![
            Pipe {
                x: -200.0,
                gap_center_y: 200.0,
            },
            Pipe {
                x: -150.0,
                gap_center_y: 200.0,
            },
        ];

        assert!(state.advance_pipes(&config, &mut rng));
        assert_eq!(state.score, 1);
        assert_eq!(state.pipes.len(), 2);
        assert!(state.pipes[0].x < 0.0);
    }

    #[test]
    fn test_state_advance_bird_uses_config() {
        let config = GameConfig::default();
        let mut rng = create_test_rng();
        let mut state = GameState::new(&config, &mut rng);

        state.advance_bird(false, &config);
        assert_close(state.bird.velocity, config.gravity);
        assert_close(state.bird.y, config.world_height / 2.0 + config.gravity);

        state.advance_bird(true, &config);
        assert_close(state.bird.velocity, config.flap_strength + config.gravity);
    }
}

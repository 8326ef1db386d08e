//! Bird-vs-world and bird-vs-pipe collision tests.

use super::types::{Bird, Pipe};
use crate::core::config::GameConfig;

/// True if the bird's circle touches the top or bottom of the world.
pub fn out_of_bounds(bird: &Bird, radius: f64, world_height: f64) -> bool {
    bird.y - radius <= 0.0 || bird.y + radius >= world_height
}

/// True if the bird overlaps `pipe` horizontally and leaves its gap band.
///
/// Touching the gap edges exactly is not a hit.
pub fn hits_pipe(bird: &Bird, pipe: &Pipe, config: &GameConfig) -> bool {
    let r = config.bird_radius;
    let overlaps = bird.x + r > pipe.x && bird.x - r < pipe.right(config.pipe_width);
    if !overlaps {
        return false;
    }
    bird.y - r < pipe.gap_top(config.gap_height) || bird.y + r > pipe.gap_bottom(config.gap_height)
}

/// Whether the bird has crashed into a boundary or any pipe.
pub fn collides(bird: &Bird, pipes: &[Pipe], config: &GameConfig) -> bool {
    out_of_bounds(bird, config.bird_radius, config.world_height)
        || pipes.iter().any(|pipe| hits_pipe(bird, pipe, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bird_at(y: f64) -> Bird {
        Bird {
            x: 100.0,
            y,
            velocity: 0.0,
        }
    }

    fn pipe_over_bird(gap_center_y: f64) -> Pipe {
        Pipe {
            x: 90.0,
            gap_center_y,
        }
    }

    #[test]
    fn test_below_floor_collides() {
        let config = GameConfig::default();
        assert!(collides(&bird_at(405.0), &[], &config));
    }

    #[test]
    fn test_boundaries_dominate_any_pipes() {
        let config = GameConfig::default();
        let pipe_sets: [Vec<Pipe>; 3] = [
            vec![],
            vec![pipe_over_bird(200.0)],
            vec![Pipe {
                x: 500.0,
                gap_center_y: 200.0,
            }],
        ];
        for pipes in &pipe_sets {
            for y in [-30.0, 0.0, 400.0, 450.0] {
                assert!(collides(&bird_at(y), pipes, &config), "y = {y}");
            }
        }
    }

    #[test]
    fn test_radius_counts_against_bounds() {
        let config = GameConfig::default();
        assert!(collides(&bird_at(20.0), &[], &config));
        assert!(collides(&bird_at(380.0), &[], &config));
        assert!(!collides(&bird_at(21.0), &[], &config));
        assert!(!collides(&bird_at(379.0), &[], &config));
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let config = GameConfig::default();
        // Gap 100..300, bird spans 180..220.
        assert!(!collides(&bird_at(200.0), &[pipe_over_bird(200.0)], &config));
    }

    #[test]
    fn test_gap_edges_are_closed_interval() {
        let config = GameConfig::default();
        let pipe = pipe_over_bird(200.0);
        // Bird top exactly on gap top (100).
        assert!(!hits_pipe(&bird_at(120.0), &pipe, &config));
        // Bird bottom exactly on gap bottom (300).
        assert!(!hits_pipe(&bird_at(280.0), &pipe, &config));
        // Just past either edge.
        assert!(hits_pipe(&bird_at(119.9), &pipe, &config));
        assert!(hits_pipe(&bird_at(280.1), &pipe, &config));
    }

    #[test]
    fn test_no_hit_without_horizontal_overlap() {
        let config = GameConfig::default();
        // Bird spans x 80..120; pipe 120..170 only touches.
        let touching = Pipe {
            x: 120.0,
            gap_center_y: 300.0,
        };
        assert!(!hits_pipe(&bird_at(100.0), &touching, &config));
        // Pipe 30..80 touches from the left.
        let behind = Pipe {
            x: 30.0,
            gap_center_y: 300.0,
        };
        assert!(!hits_pipe(&bird_at(100.0), &behind, &config));
        // One unit of overlap is enough.
        let overlapping = Pipe {
            x: 119.0,
            gap_center_y: 300.0,
        };
        assert!(hits_pipe(&bird_at(100.0), &overlapping, &config));
    }

    #[test]
    fn test_any_pipe_triggers() {
        let config = GameConfig::default();
        let pipes = [
            Pipe {
                x: 400.0,
                gap_center_y: 200.0,
            },
            pipe_over_bird(300.0),
        ];
        assert!(collides(&bird_at(150.0), &pipes, &config));
    }

    #[test]
    fn test_narrow_gap_always_hits() {
        let config = GameConfig {
            gap_height: 30.0,
            ..GameConfig::default()
        };
        // Bird diameter 40 cannot fit a 30 gap.
        assert!(hits_pipe(&bird_at(200.0), &pipe_over_bird(200.0), &config));
    }
}

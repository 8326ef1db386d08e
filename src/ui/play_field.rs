//! Play field rendering: bird, pipes and score on a braille canvas.
//!
//! World coordinates grow downward; the canvas grows upward, so every `y`
//! is flipped against the world height.

use crate::core::config::GameConfig;
use crate::game::types::GameState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle},
    Frame,
};

/// Spacing of the fill lines inside a pipe, in world units.
const PIPE_FILL_STEP: f64 = 6.0;

pub fn render_play_field(frame: &mut Frame, area: Rect, state: &GameState, config: &GameConfig) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let world_w = config.world_width;
    let world_h = config.world_height;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, world_w])
        .y_bounds([0.0, world_h])
        .paint(|ctx| {
            for pipe in &state.pipes {
                let left = pipe.x.max(0.0);
                let right = pipe.right(config.pipe_width).min(world_w);
                if right <= left {
                    continue;
                }
                let gap_top = pipe.gap_top(config.gap_height).clamp(0.0, world_h);
                let gap_bottom = pipe.gap_bottom(config.gap_height).clamp(0.0, world_h);

                // Upper pipe: world 0..gap_top, lower pipe: gap_bottom..world_h.
                fill_column(ctx, left, right, world_h - gap_top, world_h);
                fill_column(ctx, left, right, 0.0, world_h - gap_bottom);
            }

            ctx.layer();
            let bird = &state.bird;
            let bird_color = if bird.velocity < 0.0 {
                Color::LightYellow
            } else {
                Color::Yellow
            };
            ctx.draw(&Circle {
                x: bird.x,
                y: world_h - bird.y,
                radius: config.bird_radius,
                color: bird_color,
            });

            ctx.print(
                world_w * 0.02,
                world_h * 0.95,
                Span::styled(
                    format!("Score: {}", state.score),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            );
        });

    frame.render_widget(canvas, area);
}

/// Outline plus vertical fill lines for one pipe segment in canvas space.
fn fill_column(
    ctx: &mut ratatui::widgets::canvas::Context,
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
) {
    if top <= bottom {
        return;
    }
    ctx.draw(&Rectangle {
        x: left,
        y: bottom,
        width: right - left,
        height: top - bottom,
        color: Color::LightGreen,
    });
    let mut x = left + PIPE_FILL_STEP;
    while x < right {
        ctx.draw(&CanvasLine {
            x1: x,
            y1: bottom,
            x2: x,
            y2: top,
            color: Color::Green,
        });
        x += PIPE_FILL_STEP;
    }
}

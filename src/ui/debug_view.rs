//! Hand-tracking debug panel: the latest landmarks drawn as a skeleton.

use crate::gesture::is_flap_gesture;
use crate::tracking::landmarks::{HandLandmarks, HAND_CONNECTIONS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Line as CanvasLine, Points},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// What the tracker saw on the latest tick.
#[derive(Debug, Clone, Default)]
pub struct DebugSnapshot {
    pub sequence: u64,
    /// Camera width and height, `(0, 0)` when unknown.
    pub resolution: (u32, u32),
    pub hands: Vec<HandLandmarks>,
    pub flap: bool,
    pub source: String,
}

pub fn render_debug_view(frame: &mut Frame, area: Rect, snapshot: &DebugSnapshot) {
    let block = Block::default()
        .title(" Hand ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 4 || inner.width < 8 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(inner);

    // Landmarks are normalized with y growing downward.
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(|ctx| {
            for hand in &snapshot.hands {
                let color = if is_flap_gesture(hand) {
                    Color::Red
                } else {
                    Color::Cyan
                };
                let points = hand.landmarks.map(|p| (p.x as f64, 1.0 - p.y as f64));
                for &(a, b) in HAND_CONNECTIONS.iter() {
                    ctx.draw(&CanvasLine {
                        x1: points[a].0,
                        y1: points[a].1,
                        x2: points[b].0,
                        y2: points[b].1,
                        color: Color::DarkGray,
                    });
                }
                ctx.layer();
                ctx.draw(&Points {
                    coords: &points,
                    color,
                });
            }
        });
    frame.render_widget(canvas, chunks[0]);

    let (signal, signal_color) = if snapshot.flap {
        ("FIST - flap", Color::Red)
    } else if snapshot.hands.is_empty() {
        ("no hand", Color::DarkGray)
    } else {
        ("open", Color::Green)
    };
    let lines = vec![
        Line::from(Span::styled(
            signal,
            Style::default()
                .fg(signal_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            frame_label(snapshot),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            snapshot.source.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[1]);
}

fn frame_label(snapshot: &DebugSnapshot) -> String {
    match snapshot.resolution {
        (0, _) | (_, 0) => format!("frame {}", snapshot.sequence),
        (w, h) => format!("frame {} {}x{}", snapshot.sequence, w, h),
    }
}

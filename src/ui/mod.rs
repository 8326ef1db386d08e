//! Terminal rendering for all scenes.

pub mod common;
pub mod debug_view;
pub mod play_field;

use crate::game::scene::SceneController;
use crate::game::types::Scene;
use common::{create_game_layout, render_message_panel, render_status_bar};
use debug_view::{render_debug_view, DebugSnapshot};
use play_field::render_play_field;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

/// Width of the hand debug panel in columns.
const DEBUG_PANEL_WIDTH: u16 = 26;

/// Draw the current scene.
pub fn draw(
    frame: &mut Frame,
    controller: &SceneController,
    snapshot: &DebugSnapshot,
    show_debug: bool,
) {
    let area = frame.size();
    let layout = create_game_layout(
        frame,
        area,
        " Flappy Fist ",
        Color::Cyan,
        show_debug.then_some(DEBUG_PANEL_WIDTH),
    );

    let state = controller.state();
    render_play_field(frame, layout.content, state, controller.config());

    if let Some(panel) = layout.side_panel {
        render_debug_view(frame, panel, snapshot);
    }

    match controller.scene() {
        Scene::Start => {
            render_message_panel(
                frame,
                layout.content,
                "FLAPPY FIST",
                Color::Yellow,
                vec![
                    Line::from("Close your fist to flap."),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Press Space to start",
                        Style::default().fg(Color::White),
                    )),
                ],
            );
            render_status_bar(
                frame,
                layout.status_bar,
                "Ready",
                Color::Yellow,
                &[("[Space]", "Start"), ("[D]", "Hand view"), ("[Q]", "Quit")],
            );
        }
        Scene::Playing => {
            render_status_bar(
                frame,
                layout.status_bar,
                &format!("Score: {}   Best: {}", state.score, controller.best_score()),
                Color::Green,
                &[("[Fist/Space]", "Flap"), ("[D]", "Hand view"), ("[Q]", "Quit")],
            );
        }
        Scene::GameOver => {
            render_message_panel(
                frame,
                layout.content,
                "Game Over!",
                Color::Red,
                vec![
                    Line::from(format!("Score: {}", state.score)),
                    Line::from(Span::styled(
                        format!("Best: {}", controller.best_score()),
                        Style::default().fg(Color::Yellow),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Press R to Restart or Q to Quit",
                        Style::default().fg(Color::White),
                    )),
                ],
            );
            render_status_bar(
                frame,
                layout.status_bar,
                "Crashed",
                Color::Red,
                &[("[R]", "Restart"), ("[Q]", "Quit")],
            );
        }
    }
}

//! Shared layout and widgets for the game screens.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Areas of the framed game screen.
pub struct GameLayout {
    pub content: Rect,
    /// Two rows under the play field.
    pub status_bar: Rect,
    /// Right-hand column; `None` when hidden or the terminal is too narrow.
    pub side_panel: Option<Rect>,
}

/// Narrowest play field that still gets a side panel next to it.
const MIN_CONTENT_WIDTH: u16 = 30;

/// Draw the outer frame and carve it into play field, status bar and panel.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Hand ──────┐
/// │   [play field]                  │  [panel]    │
/// │ [status bar]                    │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    side_panel_width: Option<u16>,
) -> GameLayout {
    frame.render_widget(Clear, area);
    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let side_width = side_panel_width.filter(|w| inner.width >= w + MIN_CONTENT_WIDTH);
    let (main, side_panel) = if let Some(width) = side_width {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(MIN_CONTENT_WIDTH), Constraint::Length(width)])
            .split(inner);
        (columns[0], Some(columns[1]))
    } else {
        (inner, None)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(main);

    GameLayout {
        content: rows[0],
        status_bar: rows[1],
        side_panel,
    }
}

/// Status line on the first row, key hints on the second.
///
/// `controls` pairs a key label with its action, e.g. `("[Space]", "Flap")`.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height == 0 {
        return;
    }
    let status_row = Rect { height: 1, ..area };
    frame.render_widget(
        Paragraph::new(status_text)
            .style(Style::default().fg(status_color))
            .alignment(Alignment::Center),
        status_row,
    );

    if area.height < 2 || controls.is_empty() {
        return;
    }
    let hints: Vec<Span> = controls
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let separator = (i > 0).then(|| Span::raw("  "));
            separator.into_iter().chain([
                Span::styled(*key, Style::default().fg(Color::White)),
                Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    let hint_row = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };
    frame.render_widget(
        Paragraph::new(Line::from(hints)).alignment(Alignment::Center),
        hint_row,
    );
}

/// Render a centered bordered panel with a bold title and body lines.
pub fn render_message_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    color: Color,
    body: Vec<Line<'static>>,
) {
    let height = (body.len() as u16 + 4).min(area.height);
    let width = 44u16.min(area.width);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let panel = Rect::new(x, y, width, height);

    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(body);

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

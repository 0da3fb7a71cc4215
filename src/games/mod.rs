pub mod flappy;
pub mod game2048;
pub mod snake;

use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::engine::Phase;
use crate::ui::theme::Theme;

/// A game as the shell sees it: an engine plus its input mapping and
/// renderer.
pub trait Game {
    /// Feed host time since the previous frame.
    fn update(&mut self, elapsed: Duration);
    fn handle_input(&mut self, key: KeyEvent);
    /// Left click at a terminal cell.
    fn handle_click(&mut self, _column: u16, _row: u16) {}
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
    /// Start a fresh session.
    fn reset(&mut self);
    fn get_score(&self) -> u32;
    fn is_game_over(&self) -> bool;
}

pub(crate) struct GameLayout {
    pub status: Rect,
    pub field: Rect,
    pub message: Rect,
}

/// Draw the shared frame of a game screen and split it into rows.
pub(crate) fn game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    accent: Color,
    theme: &Theme,
) -> GameLayout {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.tint(accent)))
        .title(title.to_string())
        .title_style(
            Style::default()
                .fg(theme.tint(accent))
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(theme.background()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Score
            Constraint::Min(3),    // Play field
            Constraint::Length(2), // Status message + help
        ])
        .split(inner);

    GameLayout {
        status: chunks[0],
        field: chunks[1],
        message: chunks[2],
    }
}

pub(crate) fn render_score(frame: &mut Frame, area: Rect, score: u32, best: u32, theme: &Theme) {
    let status = Line::from(vec![
        Span::styled(
            format!(" Score: {} ", score),
            Style::default()
                .fg(theme.highlight())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│", Style::default().fg(theme.muted())),
        Span::styled(format!(" Best: {} ", best), Style::default().fg(theme.accent())),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

pub(crate) fn render_message(
    frame: &mut Frame,
    area: Rect,
    phase: Phase,
    message: &str,
    help: &str,
    theme: &Theme,
) {
    let color = match phase {
        Phase::Over => theme.tint(Color::Rgb(230, 70, 70)),
        Phase::Won => theme.tint(Color::Rgb(80, 210, 120)),
        _ => theme.highlight(),
    };
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!(" {}", help), Style::default().fg(theme.muted()))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Turn a character grid into renderable lines.
pub(crate) fn grid_lines(grid: Vec<Vec<(char, Style)>>) -> Vec<Line<'static>> {
    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

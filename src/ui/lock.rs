use chrono::NaiveDateTime;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::clock;
use crate::ui::theme::Theme;

const GLYPH_HEIGHT: usize = 5;

/// 3x5 block glyphs for the lock screen clock.
fn glyph(c: char) -> [&'static str; GLYPH_HEIGHT] {
    match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => [" ██", "  █", "  █", "  █", "  █"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "▪", " ", "▪", " "],
        _ => [" ", " ", " ", " ", " "],
    }
}

/// Render text as rows of block glyphs, one column between characters.
pub fn big_text(text: &str) -> Vec<String> {
    (0..GLYPH_HEIGHT)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

pub fn render_lock(
    frame: &mut Frame,
    area: Rect,
    now: &NaiveDateTime,
    device_name: &str,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(GLYPH_HEIGHT as u16), // Clock
            Constraint::Length(2),                   // Date
            Constraint::Length(1),                   // Device name
            Constraint::Min(0),
            Constraint::Length(2), // Unlock hint
        ])
        .split(area);

    let clock_lines: Vec<Line> = big_text(&clock::lock_time(now))
        .into_iter()
        .map(|row| {
            Line::from(Span::styled(
                row,
                Style::default()
                    .fg(theme.text())
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(clock_lines).alignment(Alignment::Center), chunks[1]);

    let date = Paragraph::new(Line::from(Span::styled(
        clock::lock_date(now),
        Style::default().fg(theme.muted()),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(date, chunks[2]);

    let name = Paragraph::new(Line::from(Span::styled(
        device_name.to_string(),
        Style::default().fg(theme.muted()),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(name, chunks[3]);

    let hint = Paragraph::new(vec![
        Line::from(Span::styled(
            "⌃",
            Style::default().fg(theme.accent()),
        )),
        Line::from(Span::styled(
            "ENTER to unlock",
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[5]);
}

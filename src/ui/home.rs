use chrono::NaiveDateTime;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{AppKind, HOME_COLUMNS};
use crate::clock;
use crate::ui::theme::Theme;

fn render_app_tile(frame: &mut Frame, area: Rect, kind: AppKind, selected: bool, theme: &Theme) {
    let border_color = if selected { theme.highlight() } else { theme.tint(kind.color()) };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let name_color = if selected { theme.text() } else { theme.tint(kind.color()) };
    let lines = vec![
        Line::from(Span::raw(kind.icon())),
        Line::from(Span::styled(
            kind.title(),
            Style::default().fg(name_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("[{}]", kind.index() + 1),
            Style::default().fg(theme.muted()),
        )),
    ];

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

pub fn render_home(
    frame: &mut Frame,
    area: Rect,
    selected: usize,
    now: &NaiveDateTime,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Spacer
            Constraint::Length(2),  // Hour + date
            Constraint::Min(0),     // Spacer
            Constraint::Length(12), // App tiles (2 rows)
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{}h", clock::home_hour(now)),
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            clock::lock_date(now),
            Style::default().fg(theme.muted()),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[3]);

    for (i, kind) in AppKind::all().iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[i / HOME_COLUMNS]);
        render_app_tile(frame, cols[i % HOME_COLUMNS], *kind, selected == i, theme);
    }

    let footer = Paragraph::new(vec![
        Line::from(Span::styled(
            "↑↓←→ select │ ENTER open",
            Style::default().fg(theme.muted()),
        )),
        Line::from(Span::styled(
            "p panel │ r recents │ l lock │ q quit",
            Style::default().fg(theme.muted()),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);
}

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::AppKind;
use crate::apps::settings::{Settings, Toggle, BRIGHTNESS_STEP};
use crate::ui::theme::{Theme, MAX_BRIGHTNESS};

fn overlay_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent()))
        .title(title.to_string())
        .style(Style::default().bg(theme.surface()).fg(theme.text()))
}

/// Drop-down from the top of the content area.
pub fn render_quick_panel(
    frame: &mut Frame,
    content: Rect,
    settings: &Settings,
    selected: usize,
    theme: &Theme,
) {
    let height = (Toggle::ALL.len() as u16 + 4).min(content.height);
    let area = Rect::new(content.x, content.y, content.width, height);

    let marker = |i: usize| if i == selected { "▶ " } else { "  " };
    let mut lines: Vec<Line> = Toggle::ALL
        .iter()
        .enumerate()
        .map(|(i, toggle)| {
            let on = settings.is_enabled(*toggle);
            Line::from(vec![
                Span::styled(marker(i), Style::default().fg(theme.accent())),
                Span::raw(format!("{:<14}", toggle.label())),
                Span::styled(
                    if on { "ON " } else { "OFF" },
                    Style::default().fg(if on { theme.highlight() } else { theme.muted() }),
                ),
            ])
        })
        .collect();

    let steps = (MAX_BRIGHTNESS / BRIGHTNESS_STEP) as usize;
    let filled = (settings.brightness() / BRIGHTNESS_STEP) as usize;
    lines.push(Line::from(vec![
        Span::styled(marker(Toggle::ALL.len()), Style::default().fg(theme.accent())),
        Span::raw("☀ "),
        Span::styled("█".repeat(filled), Style::default().fg(theme.highlight())),
        Span::styled(
            "░".repeat(steps.saturating_sub(filled)),
            Style::default().fg(theme.muted()),
        ),
    ]));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(overlay_block(" Quick panel ", theme)),
        area,
    );
}

/// Numbered list of recently opened apps, centred in the content area.
pub fn render_recents(frame: &mut Frame, content: Rect, recent: &[AppKind], theme: &Theme) {
    let height = (recent.len().max(1) as u16 + 4).min(content.height);
    let width = 24.min(content.width);
    let area = Rect::new(
        content.x + (content.width - width) / 2,
        content.y + (content.height - height) / 2,
        width,
        height,
    );

    let mut lines: Vec<Line> = if recent.is_empty() {
        vec![Line::from(Span::styled(
            " No recent apps",
            Style::default().fg(theme.muted()),
        ))]
    } else {
        recent
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                Line::from(vec![
                    Span::styled(format!(" {} ", i + 1), Style::default().fg(theme.accent())),
                    Span::raw(format!("{} ", kind.icon())),
                    Span::styled(kind.title(), Style::default().fg(kind.color())),
                ])
            })
            .collect()
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " 1-9 open │ Esc close",
        Style::default().fg(theme.muted()),
    )));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(overlay_block(" Recent apps ", theme)),
        area,
    );
}

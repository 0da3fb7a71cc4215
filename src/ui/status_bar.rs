use chrono::NaiveDateTime;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::apps::settings::{Settings, Toggle};
use crate::clock;
use crate::ui::theme::Theme;

/// Indicator icons for the right side of the status bar.
pub fn indicators(settings: &Settings) -> String {
    let mut icons = Vec::new();
    if settings.is_enabled(Toggle::AirplaneMode) {
        icons.push("✈");
    } else {
        icons.push("▂▄▆");
        if settings.is_enabled(Toggle::WiFi) {
            icons.push("wifi");
        }
    }
    if settings.is_enabled(Toggle::Bluetooth) {
        icons.push("ᛒ");
    }
    icons.push("100%▮");
    icons.join(" ")
}

pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    now: &NaiveDateTime,
    settings: &Settings,
    theme: &Theme,
) {
    let time = clock::status_time(now);
    let icons = indicators(settings);
    let pad = (area.width as usize).saturating_sub(time.chars().count() + icons.chars().count() + 2);

    let line = Line::from(vec![
        Span::styled(
            format!(" {}", time),
            Style::default()
                .fg(theme.text())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(pad)),
        Span::styled(format!("{} ", icons), Style::default().fg(theme.text())),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.surface())),
        area,
    );
}

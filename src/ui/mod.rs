pub mod home;
pub mod lock;
pub mod overlay;
pub mod status_bar;
pub mod theme;

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, AppKind, Overlay, Screen};
use crate::apps::PhoneApp;
use crate::games::Game;
use theme::Theme;

const PHONE_WIDTH: u16 = 40;
const PHONE_HEIGHT: u16 = 32;

/// Centre a phone-sized rectangle in `area`, shrinking it on small terminals.
pub fn phone_area(area: Rect) -> Rect {
    let w = PHONE_WIDTH.min(area.width);
    let h = PHONE_HEIGHT.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = app.theme();
    let now = Local::now().naive_local();

    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Rgb(12, 12, 16))),
        frame.area(),
    );

    let phone = phone_area(frame.area());
    let body = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(theme.frame()))
        .style(Style::default().bg(theme.background()).fg(theme.text()));
    let screen = body.inner(phone);
    frame.render_widget(body, phone);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Nav bar
        ])
        .split(screen);

    status_bar::render_status_bar(frame, chunks[0], &now, &app.settings, &theme);

    match app.screen {
        Screen::Lock => {
            lock::render_lock(frame, chunks[1], &now, app.settings.device_name(), &theme)
        }
        Screen::Home => home::render_home(frame, chunks[1], app.selected, &now, &theme),
        Screen::Open(kind) => match kind {
            AppKind::Calculator => app.calculator.render(frame, chunks[1], &theme),
            AppKind::Music => app.music.render(frame, chunks[1], &theme),
            AppKind::Settings => app.settings.render(frame, chunks[1], &theme),
            AppKind::Flappy => app.flappy.render(frame, chunks[1], &theme),
            AppKind::Snake => app.snake.render(frame, chunks[1], &theme),
            AppKind::Game2048 => app.game2048.render(frame, chunks[1], &theme),
        },
    }

    match app.overlay {
        Some(Overlay::QuickPanel { selected }) => {
            overlay::render_quick_panel(frame, chunks[1], &app.settings, selected, &theme)
        }
        Some(Overlay::Recents) => overlay::render_recents(frame, chunks[1], app.recent(), &theme),
        None => {}
    }

    render_nav_bar(frame, chunks[2], app.screen, &theme);

    if let Some(toast) = app.toasts().last() {
        render_toast(frame, chunks[1], &toast.text, &theme);
    }
}

fn render_nav_bar(frame: &mut Frame, area: Rect, screen: Screen, theme: &Theme) {
    let hint = match screen {
        Screen::Lock => "q quit",
        Screen::Home => "⌂ Home │ ^P panel │ ^R recents",
        Screen::Open(_) => "◀ Esc │ ⌂ Home │ ^R recents",
    };
    let nav = Paragraph::new(Line::from(Span::styled(hint, Style::default().fg(theme.muted()))))
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.surface()));
    frame.render_widget(nav, area);
}

/// Pill drawn on the last rows of the content area, just above the nav bar.
fn render_toast(frame: &mut Frame, content: Rect, text: &str, theme: &Theme) {
    if content.height < 3 {
        return;
    }
    let w = (text.chars().count() as u16 + 4).min(content.width);
    let area = Rect::new(
        content.x + (content.width - w) / 2,
        content.y + content.height - 3,
        w,
        3,
    );
    frame.render_widget(Clear, area);
    let toast = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.background()).bg(theme.text()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.muted()).bg(theme.text())),
        );
    frame.render_widget(toast, area);
}

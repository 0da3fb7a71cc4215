//! The non-game phone apps. Each one owns its state, maps keys to actions and
//! draws itself into the phone screen.

pub mod calculator;
pub mod music;
pub mod settings;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::ui::theme::Theme;

pub trait PhoneApp {
    /// Apply a key press. Returns a toast to show, if the action has one.
    fn handle_input(&mut self, key: KeyEvent) -> Option<String>;
    /// True while the app wants every key, Esc included (text entry).
    fn captures_input(&self) -> bool {
        false
    }
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// Rounded, titled panel shared by the apps. Returns the inner area.
pub(crate) fn app_block(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent()))
        .title(title.to_string())
        .title_style(
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(theme.background()).fg(theme.text()));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

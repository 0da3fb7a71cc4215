use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use log::info;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::apps::{app_block, PhoneApp};
use crate::ui::theme::{Theme, MAX_BRIGHTNESS, MIN_BRIGHTNESS};

pub const BRIGHTNESS_STEP: u8 = 10;
pub const DEFAULT_DEVICE_NAME: &str = "My Phone";
pub const MAX_DEVICE_NAME_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    WiFi,
    Bluetooth,
    DarkMode,
    Notifications,
    AirplaneMode,
}

impl Toggle {
    pub const ALL: [Toggle; 5] = [
        Toggle::WiFi,
        Toggle::Bluetooth,
        Toggle::DarkMode,
        Toggle::Notifications,
        Toggle::AirplaneMode,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Toggle::WiFi => "Wi-Fi",
            Toggle::Bluetooth => "Bluetooth",
            Toggle::DarkMode => "Dark Mode",
            Toggle::Notifications => "Notifications",
            Toggle::AirplaneMode => "Airplane Mode",
        }
    }

    fn index(&self) -> usize {
        match self {
            Toggle::WiFi => 0,
            Toggle::Bluetooth => 1,
            Toggle::DarkMode => 2,
            Toggle::Notifications => 3,
            Toggle::AirplaneMode => 4,
        }
    }
}

/// How long toasts stay up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationSpeed {
    Slow,
    Normal,
    Fast,
}

impl AnimationSpeed {
    pub const ALL: [AnimationSpeed; 3] = [
        AnimationSpeed::Slow,
        AnimationSpeed::Normal,
        AnimationSpeed::Fast,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "Slow",
            AnimationSpeed::Normal => "Normal",
            AnimationSpeed::Fast => "Fast",
        }
    }

    pub fn toast_lifetime(&self) -> Duration {
        match self {
            AnimationSpeed::Slow => Duration::from_millis(2700),
            AnimationSpeed::Normal => Duration::from_millis(1800),
            AnimationSpeed::Fast => Duration::from_millis(900),
        }
    }
}

/// Idle time before the phone locks itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTimeout {
    HalfMinute,
    OneMinute,
    FiveMinutes,
    Never,
}

impl ScreenTimeout {
    pub const ALL: [ScreenTimeout; 4] = [
        ScreenTimeout::HalfMinute,
        ScreenTimeout::OneMinute,
        ScreenTimeout::FiveMinutes,
        ScreenTimeout::Never,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScreenTimeout::HalfMinute => "30 seconds",
            ScreenTimeout::OneMinute => "1 minute",
            ScreenTimeout::FiveMinutes => "5 minutes",
            ScreenTimeout::Never => "Never",
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        match self {
            ScreenTimeout::HalfMinute => Some(Duration::from_secs(30)),
            ScreenTimeout::OneMinute => Some(Duration::from_secs(60)),
            ScreenTimeout::FiveMinutes => Some(Duration::from_secs(300)),
            ScreenTimeout::Never => None,
        }
    }
}

/// Step through `all` from `current`, wrapping at both ends.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let idx = all.iter().position(|&v| v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % all.len()
    } else {
        (idx + all.len() - 1) % all.len()
    };
    all[next]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Toggle(Toggle),
    Brightness,
    AnimationSpeed,
    ScreenTimeout,
    DeviceName,
}

pub const ROWS: [Row; 9] = [
    Row::Toggle(Toggle::WiFi),
    Row::Toggle(Toggle::Bluetooth),
    Row::Toggle(Toggle::DarkMode),
    Row::Toggle(Toggle::Notifications),
    Row::Toggle(Toggle::AirplaneMode),
    Row::Brightness,
    Row::AnimationSpeed,
    Row::ScreenTimeout,
    Row::DeviceName,
];

#[derive(Debug, Clone)]
pub struct Settings {
    enabled: [bool; 5],
    brightness: u8,
    animation_speed: AnimationSpeed,
    screen_timeout: ScreenTimeout,
    device_name: String,
    /// Name being typed, while the device name row is in edit mode.
    editing: Option<String>,
    selected: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Settings {
    pub fn new(dark: bool) -> Self {
        let mut enabled = [false; 5];
        enabled[Toggle::WiFi.index()] = true;
        enabled[Toggle::Notifications.index()] = true;
        enabled[Toggle::DarkMode.index()] = dark;
        Self {
            enabled,
            brightness: MAX_BRIGHTNESS,
            animation_speed: AnimationSpeed::Normal,
            screen_timeout: ScreenTimeout::OneMinute,
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            editing: None,
            selected: 0,
        }
    }

    pub fn is_enabled(&self, toggle: Toggle) -> bool {
        self.enabled[toggle.index()]
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn animation_speed(&self) -> AnimationSpeed {
        self.animation_speed
    }

    pub fn screen_timeout(&self) -> ScreenTimeout {
        self.screen_timeout
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn theme(&self) -> Theme {
        Theme::new(self.is_enabled(Toggle::DarkMode), self.brightness)
    }

    fn flip(&mut self, toggle: Toggle) -> bool {
        let slot = &mut self.enabled[toggle.index()];
        *slot = !*slot;
        *slot
    }

    /// Flip a toggle from the settings list, e.g. "Dark Mode: ON".
    pub fn toggle(&mut self, toggle: Toggle) -> String {
        let on = self.flip(toggle);
        let feedback = format!("{}: {}", toggle.label(), if on { "ON" } else { "OFF" });
        info!("settings: {}", feedback);
        feedback
    }

    /// Flip a toggle from the quick panel, e.g. "Bluetooth enabled".
    pub fn quick_toggle(&mut self, toggle: Toggle) -> String {
        let on = self.flip(toggle);
        let feedback = format!("{} {}", toggle.label(), if on { "enabled" } else { "disabled" });
        info!("quick panel: {}", feedback);
        feedback
    }

    /// Step brightness up or down. `None` when already at the limit.
    pub fn adjust_brightness(&mut self, up: bool) -> Option<String> {
        let next = if up {
            self.brightness.saturating_add(BRIGHTNESS_STEP).min(MAX_BRIGHTNESS)
        } else {
            self.brightness.saturating_sub(BRIGHTNESS_STEP).max(MIN_BRIGHTNESS)
        };
        if next == self.brightness {
            return None;
        }
        self.brightness = next;
        Some(format!("Brightness: {}%", next))
    }

    pub fn cycle_animation_speed(&mut self, forward: bool) -> String {
        self.animation_speed = cycle(&AnimationSpeed::ALL, self.animation_speed, forward);
        format!("Animation speed: {}", self.animation_speed.label())
    }

    pub fn cycle_screen_timeout(&mut self, forward: bool) -> String {
        self.screen_timeout = cycle(&ScreenTimeout::ALL, self.screen_timeout, forward);
        format!("Setting changed to: {}", self.screen_timeout.label())
    }

    fn edit_key(&mut self, key: KeyEvent) -> Option<String> {
        let buffer = self.editing.as_mut()?;
        match key.code {
            KeyCode::Char(c) if !c.is_control() => {
                if buffer.chars().count() < MAX_DEVICE_NAME_LEN {
                    buffer.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                buffer.pop();
                None
            }
            KeyCode::Esc => {
                self.editing = None;
                None
            }
            KeyCode::Enter => {
                let name = self.editing.take().unwrap_or_default();
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                self.device_name = name.to_string();
                info!("settings: device renamed to {}", self.device_name);
                Some(format!("Device name: {}", self.device_name))
            }
            _ => None,
        }
    }

    fn row_line(&self, row: Row, selected: bool, width: usize, theme: &Theme) -> Line<'static> {
        let marker = if selected { "▶" } else { " " };
        let style = if selected {
            Style::default()
                .fg(theme.text())
                .bg(theme.surface())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text())
        };

        let (label, value, value_style) = match row {
            Row::Toggle(toggle) => {
                let line = if self.is_enabled(toggle) {
                    (" ON ".to_string(), Style::default().fg(theme.background()).bg(theme.accent()))
                } else {
                    (" OFF".to_string(), Style::default().fg(theme.muted()).bg(theme.surface()))
                };
                (toggle.label(), line.0, line.1)
            }
            Row::Brightness => (
                "Brightness",
                format!("{}%", self.brightness),
                Style::default().fg(theme.highlight()),
            ),
            Row::AnimationSpeed => (
                "Animation",
                format!("‹ {} ›", self.animation_speed.label()),
                Style::default().fg(theme.accent()),
            ),
            Row::ScreenTimeout => (
                "Timeout",
                format!("‹ {} ›", self.screen_timeout.label()),
                Style::default().fg(theme.accent()),
            ),
            Row::DeviceName => match &self.editing {
                Some(buffer) => (
                    "Name",
                    format!("{}▏", buffer),
                    Style::default()
                        .fg(theme.highlight())
                        .add_modifier(Modifier::BOLD),
                ),
                None => ("Name", self.device_name.clone(), Style::default().fg(theme.muted())),
            },
        };

        let used = 2 + label.chars().count() + value.chars().count();
        let pad = width.saturating_sub(used);
        Line::from(vec![
            Span::styled(format!("{} {}{}", marker, label, " ".repeat(pad)), style),
            Span::styled(value, value_style),
        ])
    }
}

impl PhoneApp for Settings {
    fn handle_input(&mut self, key: KeyEvent) -> Option<String> {
        if self.is_editing() {
            return self.edit_key(key);
        }

        let row = ROWS[self.selected];
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(ROWS.len() - 1);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => match row {
                Row::Toggle(toggle) => Some(self.toggle(toggle)),
                Row::Brightness => None,
                Row::AnimationSpeed => Some(self.cycle_animation_speed(true)),
                Row::ScreenTimeout => Some(self.cycle_screen_timeout(true)),
                Row::DeviceName => {
                    self.editing = Some(self.device_name.clone());
                    None
                }
            },
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match row {
                    Row::AnimationSpeed => Some(self.cycle_animation_speed(forward)),
                    Row::ScreenTimeout => Some(self.cycle_screen_timeout(forward)),
                    _ => self.adjust_brightness(forward),
                }
            }
            _ => None,
        }
    }

    fn captures_input(&self) -> bool {
        self.is_editing()
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let inner = app_block(frame, area, " Settings ", theme);
        let width = inner.width as usize;

        let mut lines: Vec<Line> = vec![Line::from("")];
        for (i, row) in ROWS.iter().enumerate() {
            lines.push(self.row_line(*row, i == self.selected, width, theme));
            if *row == Row::Brightness {
                let steps = (MAX_BRIGHTNESS / BRIGHTNESS_STEP) as usize;
                let filled = (self.brightness / BRIGHTNESS_STEP) as usize;
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled("█".repeat(filled), Style::default().fg(theme.highlight())),
                    Span::styled("░".repeat(steps - filled), Style::default().fg(theme.muted())),
                ]));
            }
            if matches!(row, Row::Toggle(Toggle::AirplaneMode) | Row::Brightness) {
                lines.push(Line::from(""));
            }
        }

        lines.push(Line::from(""));
        let help = if self.is_editing() {
            " type name │ ENTER save │ Esc cancel"
        } else {
            " ↑↓ select │ ENTER change │ ←→ adjust"
        };
        lines.push(Line::from(Span::styled(help, Style::default().fg(theme.muted()))));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn select(settings: &mut Settings, row: Row) {
        while ROWS[settings.selected()] != row {
            settings.handle_input(key(KeyCode::Down));
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::new(false);
        assert!(settings.is_enabled(Toggle::WiFi));
        assert!(!settings.is_enabled(Toggle::Bluetooth));
        assert!(!settings.is_enabled(Toggle::DarkMode));
        assert_eq!(settings.brightness(), 100);
        assert_eq!(settings.animation_speed(), AnimationSpeed::Normal);
        assert_eq!(settings.screen_timeout(), ScreenTimeout::OneMinute);
        assert_eq!(settings.device_name(), "My Phone");
        assert_eq!(settings.theme(), Theme::new(false, 100));
    }

    #[test]
    fn test_dark_flag_enables_dark_mode() {
        let settings = Settings::new(true);
        assert!(settings.is_enabled(Toggle::DarkMode));
        assert!(settings.theme().dark);
    }

    #[test]
    fn test_toggle_feedback() {
        let mut settings = Settings::new(false);
        assert_eq!(settings.toggle(Toggle::DarkMode), "Dark Mode: ON");
        assert!(settings.theme().dark);
        assert_eq!(settings.toggle(Toggle::DarkMode), "Dark Mode: OFF");
        assert_eq!(settings.toggle(Toggle::WiFi), "Wi-Fi: OFF");
    }

    #[test]
    fn test_quick_toggle_feedback() {
        let mut settings = Settings::new(false);
        assert_eq!(settings.quick_toggle(Toggle::Bluetooth), "Bluetooth enabled");
        assert!(settings.is_enabled(Toggle::Bluetooth));
        assert_eq!(settings.quick_toggle(Toggle::Bluetooth), "Bluetooth disabled");
    }

    #[test]
    fn test_select_and_toggle_with_keys() {
        let mut settings = Settings::new(false);
        settings.handle_input(key(KeyCode::Down));
        settings.handle_input(key(KeyCode::Down));
        let feedback = settings.handle_input(key(KeyCode::Enter));
        assert_eq!(feedback.as_deref(), Some("Dark Mode: ON"));
    }

    #[test]
    fn test_selection_stays_in_range() {
        let mut settings = Settings::new(false);
        settings.handle_input(key(KeyCode::Up));
        assert_eq!(settings.selected(), 0);
        for _ in 0..20 {
            settings.handle_input(key(KeyCode::Down));
        }
        assert_eq!(settings.selected(), ROWS.len() - 1);
    }

    #[test]
    fn test_brightness_row_has_nothing_to_toggle() {
        let mut settings = Settings::new(false);
        select(&mut settings, Row::Brightness);
        assert_eq!(settings.handle_input(key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_brightness_steps_and_bounds() {
        let mut settings = Settings::new(false);
        assert_eq!(settings.handle_input(key(KeyCode::Right)), None);
        assert_eq!(
            settings.handle_input(key(KeyCode::Left)).as_deref(),
            Some("Brightness: 90%")
        );
        for _ in 0..20 {
            settings.handle_input(key(KeyCode::Left));
        }
        assert_eq!(settings.brightness(), MIN_BRIGHTNESS);
        assert_eq!(settings.theme().brightness, MIN_BRIGHTNESS);
    }

    #[test]
    fn test_animation_speed_cycles() {
        let mut settings = Settings::new(false);
        select(&mut settings, Row::AnimationSpeed);
        assert_eq!(
            settings.handle_input(key(KeyCode::Right)).as_deref(),
            Some("Animation speed: Fast")
        );
        assert_eq!(
            settings.handle_input(key(KeyCode::Enter)).as_deref(),
            Some("Animation speed: Slow")
        );
        assert_eq!(settings.animation_speed().toast_lifetime(), Duration::from_millis(2700));
        // Brightness is untouched on selector rows
        assert_eq!(settings.brightness(), 100);
    }

    #[test]
    fn test_screen_timeout_cycles_backwards() {
        let mut settings = Settings::new(false);
        select(&mut settings, Row::ScreenTimeout);
        assert_eq!(
            settings.handle_input(key(KeyCode::Left)).as_deref(),
            Some("Setting changed to: 30 seconds")
        );
        assert_eq!(
            settings.handle_input(key(KeyCode::Left)).as_deref(),
            Some("Setting changed to: Never")
        );
        assert_eq!(settings.screen_timeout().duration(), None);
    }

    #[test]
    fn test_rename_device() {
        let mut settings = Settings::new(false);
        select(&mut settings, Row::DeviceName);
        settings.handle_input(key(KeyCode::Enter));
        assert!(settings.captures_input());

        for _ in 0.."My Phone".len() {
            settings.handle_input(key(KeyCode::Backspace));
        }
        for c in "Pocket".chars() {
            settings.handle_input(key(KeyCode::Char(c)));
        }
        let feedback = settings.handle_input(key(KeyCode::Enter));
        assert_eq!(feedback.as_deref(), Some("Device name: Pocket"));
        assert_eq!(settings.device_name(), "Pocket");
        assert!(!settings.captures_input());
    }

    #[test]
    fn test_rename_cancel_and_empty_keep_name() {
        let mut settings = Settings::new(false);
        select(&mut settings, Row::DeviceName);

        settings.handle_input(key(KeyCode::Enter));
        settings.handle_input(key(KeyCode::Char('x')));
        assert_eq!(settings.handle_input(key(KeyCode::Esc)), None);
        assert_eq!(settings.device_name(), "My Phone");

        settings.handle_input(key(KeyCode::Enter));
        for _ in 0..20 {
            settings.handle_input(key(KeyCode::Backspace));
        }
        assert_eq!(settings.handle_input(key(KeyCode::Enter)), None);
        assert_eq!(settings.device_name(), "My Phone");
        assert!(!settings.is_editing());
    }

    #[test]
    fn test_device_name_length_capped() {
        let mut settings = Settings::new(false);
        select(&mut settings, Row::DeviceName);
        settings.handle_input(key(KeyCode::Enter));
        for _ in 0..40 {
            settings.handle_input(key(KeyCode::Char('a')));
        }
        settings.handle_input(key(KeyCode::Enter));
        assert_eq!(settings.device_name().chars().count(), MAX_DEVICE_NAME_LEN);
    }
}

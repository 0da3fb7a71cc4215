use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;
use ratatui::style::Color;

use crate::apps::calculator::Calculator;
use crate::apps::music::MusicPlayer;
use crate::apps::settings::{Settings, Toggle};
use crate::apps::PhoneApp;
use crate::config::Config;
use crate::games::flappy::FlappyBird;
use crate::games::game2048::Game2048;
use crate::games::snake::Snake;
use crate::games::Game;
use crate::ui::theme::Theme;

/// Most recently opened apps kept for the Recents overlay.
pub const RECENT_LIMIT: usize = 4;
/// Home grid width; apps wrap onto a second row.
pub const HOME_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKind {
    Calculator,
    Music,
    Settings,
    Flappy,
    Snake,
    Game2048,
}

impl AppKind {
    pub fn all() -> &'static [AppKind] {
        &[
            AppKind::Calculator,
            AppKind::Music,
            AppKind::Settings,
            AppKind::Flappy,
            AppKind::Snake,
            AppKind::Game2048,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppKind::Calculator => "Calculator",
            AppKind::Music => "Music",
            AppKind::Settings => "Settings",
            AppKind::Flappy => "Flappy",
            AppKind::Snake => "Snake",
            AppKind::Game2048 => "2048",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AppKind::Calculator => "🧮",
            AppKind::Music => "🎵",
            AppKind::Settings => "⚙",
            AppKind::Flappy => "🐦",
            AppKind::Snake => "🐍",
            AppKind::Game2048 => "🔢",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AppKind::Calculator => Color::Rgb(255, 150, 60),
            AppKind::Music => Color::Rgb(200, 120, 255),
            AppKind::Settings => Color::Rgb(150, 150, 170),
            AppKind::Flappy => Color::Rgb(255, 210, 40),
            AppKind::Snake => Color::Rgb(80, 220, 80),
            AppKind::Game2048 => Color::Rgb(237, 194, 46),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AppKind::Calculator => 0,
            AppKind::Music => 1,
            AppKind::Settings => 2,
            AppKind::Flappy => 3,
            AppKind::Snake => 4,
            AppKind::Game2048 => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Lock,
    Home,
    Open(AppKind),
}

/// Short-lived feedback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub remaining: Duration,
}

/// Panels drawn over the current screen. They take keys until closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Radio toggles and brightness; `selected` indexes `QUICK_ROWS`.
    QuickPanel { selected: usize },
    Recents,
}

/// Quick panel rows: every settings toggle, then brightness.
pub const QUICK_ROWS: usize = Toggle::ALL.len() + 1;

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub overlay: Option<Overlay>,
    /// Highlighted tile on the home grid.
    pub selected: usize,
    pub calculator: Calculator,
    pub music: MusicPlayer,
    pub settings: Settings,
    pub flappy: FlappyBird,
    pub snake: Snake,
    pub game2048: Game2048,
    toasts: Vec<Toast>,
    /// Newest first, no duplicates.
    recent: Vec<AppKind>,
    /// Time since the last key or click, for the screen timeout.
    idle: Duration,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            screen: if config.unlocked { Screen::Home } else { Screen::Lock },
            overlay: None,
            selected: 0,
            calculator: Calculator::new(),
            music: MusicPlayer::new(config.rng(1)),
            settings: Settings::new(config.dark),
            flappy: FlappyBird::new(),
            snake: Snake::new(config.rng(2)),
            game2048: Game2048::new(config.rng(3)),
            toasts: Vec::new(),
            recent: Vec::new(),
            idle: Duration::ZERO,
        }
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn recent(&self) -> &[AppKind] {
        &self.recent
    }

    /// Show a toast for as long as the animation speed setting allows.
    pub fn notify(&mut self, text: impl Into<String>) {
        self.toasts.push(Toast {
            text: text.into(),
            remaining: self.settings.animation_speed().toast_lifetime(),
        });
    }

    fn game_mut(&mut self, kind: AppKind) -> Option<&mut dyn Game> {
        match kind {
            AppKind::Flappy => Some(&mut self.flappy),
            AppKind::Snake => Some(&mut self.snake),
            AppKind::Game2048 => Some(&mut self.game2048),
            _ => None,
        }
    }

    fn phone_app_mut(&mut self, kind: AppKind) -> Option<&mut dyn PhoneApp> {
        match kind {
            AppKind::Calculator => Some(&mut self.calculator),
            AppKind::Music => Some(&mut self.music),
            AppKind::Settings => Some(&mut self.settings),
            _ => None,
        }
    }

    /// Advance toasts, the screen timeout and the foreground game.
    /// Background games stay frozen.
    pub fn on_tick(&mut self, elapsed: Duration) {
        for toast in &mut self.toasts {
            toast.remaining = toast.remaining.saturating_sub(elapsed);
        }
        self.toasts.retain(|toast| !toast.remaining.is_zero());

        self.idle = self.idle.saturating_add(elapsed);
        if let Some(timeout) = self.settings.screen_timeout().duration() {
            if self.idle >= timeout && self.screen != Screen::Lock {
                info!("screen timeout after {:?}", timeout);
                self.lock();
                return;
            }
        }

        if let Screen::Open(kind) = self.screen {
            if let Some(game) = self.game_mut(kind) {
                game.update(elapsed);
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        self.idle = Duration::ZERO;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('l') => self.lock(),
                KeyCode::Char('p') => self.toggle_quick_panel(),
                KeyCode::Char('r') => self.show_recents(),
                _ => {}
            }
            return;
        }

        if let Some(overlay) = self.overlay {
            self.on_overlay_key(overlay, key);
            return;
        }

        if key.code == KeyCode::Home {
            self.go_home();
            return;
        }

        match self.screen {
            Screen::Lock => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Up => self.unlock(),
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                _ => {}
            },
            Screen::Home => self.on_home_key(key),
            Screen::Open(kind) => {
                let captured = self
                    .phone_app_mut(kind)
                    .is_some_and(|phone_app| phone_app.captures_input());
                if key.code == KeyCode::Esc && !captured {
                    self.go_back();
                    return;
                }
                if let Some(game) = self.game_mut(kind) {
                    game.handle_input(key);
                } else if let Some(feedback) = self
                    .phone_app_mut(kind)
                    .and_then(|phone_app| phone_app.handle_input(key))
                {
                    self.notify(feedback);
                }
            }
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        let count = AppKind::all().len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('l') | KeyCode::Char('L') => self.lock(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.toggle_quick_panel(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.show_recents(),
            KeyCode::Char(c @ '1'..='6') => {
                let idx = c as usize - '1' as usize;
                self.selected = idx;
                self.launch(AppKind::all()[idx]);
            }
            KeyCode::Right => self.selected = (self.selected + 1) % count,
            KeyCode::Left => self.selected = (self.selected + count - 1) % count,
            // Two rows, so up and down both flip rows
            KeyCode::Up | KeyCode::Down => self.selected = (self.selected + HOME_COLUMNS) % count,
            KeyCode::Enter => self.launch(AppKind::all()[self.selected]),
            _ => {}
        }
    }

    fn on_overlay_key(&mut self, overlay: Overlay, key: KeyEvent) {
        match overlay {
            Overlay::QuickPanel { selected } => match key.code {
                KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => self.overlay = None,
                KeyCode::Up => {
                    self.overlay = Some(Overlay::QuickPanel {
                        selected: selected.saturating_sub(1),
                    })
                }
                KeyCode::Down => {
                    self.overlay = Some(Overlay::QuickPanel {
                        selected: (selected + 1).min(QUICK_ROWS - 1),
                    })
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(&toggle) = Toggle::ALL.get(selected) {
                        let feedback = self.settings.quick_toggle(toggle);
                        self.notify(feedback);
                    }
                }
                // The panel slider adjusts silently
                KeyCode::Left => {
                    self.settings.adjust_brightness(false);
                }
                KeyCode::Right => {
                    self.settings.adjust_brightness(true);
                }
                _ => {}
            },
            Overlay::Recents => match key.code {
                KeyCode::Esc | KeyCode::Char('r') | KeyCode::Char('R') => self.overlay = None,
                KeyCode::Char(c @ '1'..='9') => {
                    let idx = c as usize - '1' as usize;
                    if let Some(&kind) = self.recent.get(idx) {
                        self.launch(kind);
                    }
                }
                KeyCode::Enter => {
                    if let Some(&kind) = self.recent.first() {
                        self.launch(kind);
                    }
                }
                _ => {}
            },
        }
    }

    /// Left click at a terminal cell. Only the lock screen and Flappy use it.
    pub fn on_click(&mut self, column: u16, row: u16) {
        self.idle = Duration::ZERO;
        if self.overlay.is_some() {
            return;
        }
        match self.screen {
            Screen::Lock => self.unlock(),
            Screen::Open(kind) => {
                if let Some(game) = self.game_mut(kind) {
                    game.handle_click(column, row);
                }
            }
            Screen::Home => {}
        }
    }

    pub fn unlock(&mut self) {
        if self.screen != Screen::Lock {
            return;
        }
        info!("phone unlocked");
        self.screen = Screen::Home;
        self.notify("Phone unlocked!");
    }

    pub fn lock(&mut self) {
        if self.screen == Screen::Lock {
            return;
        }
        info!("phone locked");
        self.overlay = None;
        self.screen = Screen::Lock;
    }

    /// Home button: close any overlay and leave the open app.
    pub fn go_home(&mut self) {
        if self.screen == Screen::Lock {
            return;
        }
        self.overlay = None;
        if let Screen::Open(kind) = self.screen {
            info!("closing {}", kind.title());
            self.selected = kind.index();
            self.screen = Screen::Home;
        }
    }

    /// Back button: only leaves an open app.
    pub fn go_back(&mut self) {
        if matches!(self.screen, Screen::Open(_)) {
            self.go_home();
        }
    }

    pub fn toggle_quick_panel(&mut self) {
        if self.screen == Screen::Lock {
            return;
        }
        if matches!(self.overlay, Some(Overlay::QuickPanel { .. })) {
            self.overlay = None;
            return;
        }
        info!("quick panel opened");
        self.overlay = Some(Overlay::QuickPanel { selected: 0 });
        self.notify("Quick panel opened");
    }

    pub fn show_recents(&mut self) {
        if self.screen == Screen::Lock {
            return;
        }
        self.overlay = Some(Overlay::Recents);
        self.notify("Recent apps");
    }

    pub fn launch(&mut self, kind: AppKind) {
        info!("opening {}", kind.title());
        self.overlay = None;
        self.screen = Screen::Open(kind);
        self.recent.retain(|&k| k != kind);
        self.recent.insert(0, kind);
        self.recent.truncate(RECENT_LIMIT);
        self.notify(format!("{} opened", kind.title()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::settings::{AnimationSpeed, ScreenTimeout};
    use crate::engine::{Engine, Phase};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn seeded(unlocked: bool) -> App {
        App::new(&Config {
            seed: Some(7),
            unlocked,
            ..Config::default()
        })
    }

    #[test]
    fn test_starts_locked() {
        let app = seeded(false);
        assert_eq!(app.screen, Screen::Lock);
        assert!(app.toasts().is_empty());
    }

    #[test]
    fn test_unlocked_flag_starts_home() {
        let app = seeded(true);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_enter_unlocks_with_toast() {
        let mut app = seeded(false);
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.toasts()[0].text, "Phone unlocked!");
    }

    #[test]
    fn test_click_unlocks() {
        let mut app = seeded(false);
        app.on_click(3, 4);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_digit_launches_app() {
        let mut app = seeded(true);
        app.on_key(key(KeyCode::Char('5')));
        assert_eq!(app.screen, Screen::Open(AppKind::Snake));
        assert_eq!(app.toasts().last().map(|t| t.text.as_str()), Some("Snake opened"));
    }

    #[test]
    fn test_grid_navigation_wraps() {
        let mut app = seeded(true);
        app.on_key(key(KeyCode::Left));
        assert_eq!(app.selected, 5);
        app.on_key(key(KeyCode::Right));
        assert_eq!(app.selected, 0);
        app.on_key(key(KeyCode::Down));
        assert_eq!(app.selected, 3);
        app.on_key(key(KeyCode::Up));
        assert_eq!(app.selected, 0);

        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Open(AppKind::Flappy));
    }

    #[test]
    fn test_esc_returns_home_and_keeps_selection() {
        let mut app = seeded(true);
        app.launch(AppKind::Game2048);
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.selected, AppKind::Game2048.index());
    }

    #[test]
    fn test_ctrl_l_locks_from_app() {
        let mut app = seeded(true);
        app.launch(AppKind::Music);
        app.on_key(ctrl('l'));
        assert_eq!(app.screen, Screen::Lock);
    }

    #[test]
    fn test_q_quits_only_outside_apps() {
        let mut app = seeded(true);
        app.launch(AppKind::Calculator);
        app.on_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);

        app.go_home();
        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = seeded(false);
        app.on_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_toasts_expire() {
        let mut app = seeded(true);
        app.notify("hello");
        app.on_tick(Duration::from_millis(1000));
        assert_eq!(app.toasts().len(), 1);
        app.on_tick(Duration::from_millis(800));
        assert!(app.toasts().is_empty());
    }

    #[test]
    fn test_only_foreground_game_ticks() {
        let mut app = seeded(true);
        app.launch(AppKind::Snake);
        app.on_key(key(KeyCode::Enter));
        assert!(app.snake.engine().is_active());

        app.go_home();
        app.on_tick(Duration::from_millis(400));
        assert_eq!(app.snake.engine().head().x, 5);

        app.launch(AppKind::Snake);
        app.on_tick(Duration::from_millis(200));
        assert_eq!(app.snake.engine().head().x, 6);
    }

    #[test]
    fn test_settings_feedback_becomes_toast() {
        let mut app = seeded(true);
        app.launch(AppKind::Settings);
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.toasts().last().map(|t| t.text.as_str()), Some("Dark Mode: ON"));
        assert!(app.theme().dark);
    }

    #[test]
    fn test_keys_reach_calculator() {
        let mut app = seeded(true);
        app.launch(AppKind::Calculator);
        for c in "6*7=".chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.calculator.display(), "42");
    }

    #[test]
    fn test_quick_panel_toggles_radio() {
        let mut app = seeded(true);
        app.on_key(key(KeyCode::Char('p')));
        assert_eq!(app.overlay, Some(Overlay::QuickPanel { selected: 0 }));
        assert_eq!(
            app.toasts().last().map(|t| t.text.as_str()),
            Some("Quick panel opened")
        );

        app.on_key(key(KeyCode::Down));
        let was_on = app.settings.is_enabled(Toggle::Bluetooth);
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.settings.is_enabled(Toggle::Bluetooth), !was_on);
        let expected = if was_on { "Bluetooth disabled" } else { "Bluetooth enabled" };
        assert_eq!(app.toasts().last().map(|t| t.text.as_str()), Some(expected));

        // Panel keys never reach the home grid
        assert_eq!(app.selected, 0);
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.overlay, None);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_quick_panel_brightness_row() {
        let mut app = seeded(true);
        app.toggle_quick_panel();
        for _ in 0..10 {
            app.on_key(key(KeyCode::Down));
        }
        assert_eq!(app.overlay, Some(Overlay::QuickPanel { selected: QUICK_ROWS - 1 }));

        let before = app.settings.brightness();
        let toasts = app.toasts().len();
        app.on_key(key(KeyCode::Left));
        assert_eq!(app.settings.brightness(), before - 10);
        assert_eq!(app.toasts().len(), toasts);

        // Enter on the slider row does nothing
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.toasts().len(), toasts);
    }

    #[test]
    fn test_ctrl_p_works_inside_apps_but_not_locked() {
        let mut app = seeded(false);
        app.on_key(ctrl('p'));
        assert_eq!(app.overlay, None);

        app.unlock();
        app.launch(AppKind::Snake);
        app.on_key(ctrl('p'));
        assert!(matches!(app.overlay, Some(Overlay::QuickPanel { .. })));
        app.on_key(ctrl('p'));
        assert_eq!(app.overlay, None);
        assert_eq!(app.screen, Screen::Open(AppKind::Snake));
    }

    #[test]
    fn test_recents_newest_first_and_capped() {
        let mut app = seeded(true);
        for kind in [
            AppKind::Calculator,
            AppKind::Music,
            AppKind::Snake,
            AppKind::Calculator,
            AppKind::Flappy,
            AppKind::Game2048,
        ] {
            app.launch(kind);
        }
        assert_eq!(
            app.recent(),
            &[
                AppKind::Game2048,
                AppKind::Flappy,
                AppKind::Calculator,
                AppKind::Snake
            ]
        );
    }

    #[test]
    fn test_recents_overlay_launches() {
        let mut app = seeded(true);
        app.launch(AppKind::Music);
        app.launch(AppKind::Calculator);
        app.go_home();

        app.on_key(key(KeyCode::Char('r')));
        assert_eq!(app.overlay, Some(Overlay::Recents));
        assert_eq!(app.toasts().last().map(|t| t.text.as_str()), Some("Recent apps"));

        // Out of range digits are ignored
        app.on_key(key(KeyCode::Char('9')));
        assert_eq!(app.overlay, Some(Overlay::Recents));

        app.on_key(key(KeyCode::Char('2')));
        assert_eq!(app.overlay, None);
        assert_eq!(app.screen, Screen::Open(AppKind::Music));
        assert_eq!(app.recent()[0], AppKind::Music);
    }

    #[test]
    fn test_home_key_leaves_app_and_closes_overlay() {
        let mut app = seeded(true);
        app.launch(AppKind::Flappy);
        app.on_key(key(KeyCode::Home));
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.selected, AppKind::Flappy.index());

        app.show_recents();
        app.go_home();
        assert_eq!(app.overlay, None);
    }

    #[test]
    fn test_home_key_does_not_unlock() {
        let mut app = seeded(false);
        app.on_key(key(KeyCode::Home));
        assert_eq!(app.screen, Screen::Lock);
    }

    #[test]
    fn test_esc_reaches_settings_while_renaming() {
        let mut app = seeded(true);
        app.launch(AppKind::Settings);
        for _ in 0..8 {
            app.on_key(key(KeyCode::Down));
        }
        app.on_key(key(KeyCode::Enter));
        assert!(app.settings.is_editing());

        app.on_key(key(KeyCode::Esc));
        assert!(!app.settings.is_editing());
        assert_eq!(app.screen, Screen::Open(AppKind::Settings));

        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_screen_timeout_locks_when_idle() {
        let mut app = seeded(true);
        app.launch(AppKind::Music);
        app.on_tick(Duration::from_secs(59));
        assert_eq!(app.screen, Screen::Open(AppKind::Music));

        // Any key restarts the countdown
        app.on_key(key(KeyCode::Char('x')));
        app.on_tick(Duration::from_secs(59));
        assert_eq!(app.screen, Screen::Open(AppKind::Music));

        app.on_tick(Duration::from_secs(1));
        assert_eq!(app.screen, Screen::Lock);
    }

    #[test]
    fn test_never_timeout_stays_unlocked() {
        let mut app = seeded(true);
        while app.settings.screen_timeout() != ScreenTimeout::Never {
            app.settings.cycle_screen_timeout(true);
        }
        app.on_tick(Duration::from_secs(3600));
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_animation_speed_sets_toast_lifetime() {
        let mut app = seeded(true);
        app.settings.cycle_animation_speed(true);
        assert_eq!(app.settings.animation_speed(), AnimationSpeed::Fast);
        app.notify("quick");
        app.on_tick(Duration::from_millis(900));
        assert!(app.toasts().is_empty());
    }

    #[test]
    fn test_flappy_starts_idle_after_launch() {
        let mut app = seeded(true);
        app.launch(AppKind::Flappy);
        app.on_tick(Duration::from_millis(300));
        assert_eq!(app.flappy.engine().phase(), Phase::Idle);
    }
}

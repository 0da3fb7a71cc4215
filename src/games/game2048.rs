use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::engine::game2048::{Game2048Engine, SIZE};
use crate::engine::{Direction, Engine, Phase};
use crate::games::{game_layout, render_message, render_score, Game};
use crate::ui::theme::Theme;

const TILE_WIDTH: u16 = 7;
const TILE_HEIGHT: u16 = 3;

fn tile_colors(value: u32) -> (Color, Color) {
    // (background, foreground)
    match value {
        0 => (Color::Rgb(205, 193, 180), Color::Rgb(205, 193, 180)),
        2 => (Color::Rgb(238, 228, 218), Color::Rgb(119, 110, 101)),
        4 => (Color::Rgb(237, 224, 200), Color::Rgb(119, 110, 101)),
        8 => (Color::Rgb(242, 177, 121), Color::Rgb(249, 246, 242)),
        16 => (Color::Rgb(245, 149, 99), Color::Rgb(249, 246, 242)),
        32 => (Color::Rgb(246, 124, 95), Color::Rgb(249, 246, 242)),
        64 => (Color::Rgb(246, 94, 59), Color::Rgb(249, 246, 242)),
        128 => (Color::Rgb(237, 207, 114), Color::Rgb(249, 246, 242)),
        256 => (Color::Rgb(237, 204, 97), Color::Rgb(249, 246, 242)),
        512 => (Color::Rgb(237, 200, 80), Color::Rgb(249, 246, 242)),
        1024 => (Color::Rgb(237, 197, 63), Color::Rgb(249, 246, 242)),
        2048 => (Color::Rgb(237, 194, 46), Color::Rgb(249, 246, 242)),
        _ => (Color::Rgb(60, 58, 50), Color::Rgb(249, 246, 242)),
    }
}

pub struct Game2048 {
    engine: Game2048Engine<StdRng>,
    best: u32,
}

impl Default for Game2048 {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl Game2048 {
    pub fn new(rng: StdRng) -> Self {
        Self {
            engine: Game2048Engine::with_rng(rng),
            best: 0,
        }
    }

    pub fn engine(&self) -> &Game2048Engine<StdRng> {
        &self.engine
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    fn render_grid(&self, frame: &mut Frame, field: Rect, theme: &Theme) {
        let board_w = TILE_WIDTH * SIZE as u16;
        let board_h = TILE_HEIGHT * SIZE as u16;
        if field.width < board_w || field.height < board_h {
            let msg = Paragraph::new("Screen too small").style(Style::default().fg(theme.muted()));
            frame.render_widget(msg, field);
            return;
        }

        let x0 = field.x + (field.width - board_w) / 2;
        let y0 = field.y + (field.height - board_h) / 2;

        for (r, row) in self.engine.grid().iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                let area = Rect::new(
                    x0 + c as u16 * TILE_WIDTH,
                    y0 + r as u16 * TILE_HEIGHT,
                    TILE_WIDTH,
                    TILE_HEIGHT,
                );
                let (bg, fg) = tile_colors(value);
                let label = if value == 0 { String::new() } else { value.to_string() };
                let tile = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        label,
                        Style::default()
                            .fg(theme.tint(fg))
                            .add_modifier(Modifier::BOLD),
                    )),
                ])
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::NONE)
                        .style(Style::default().bg(theme.tint(bg))),
                );
                frame.render_widget(tile, area);
            }
        }
    }
}

impl Game for Game2048 {
    fn update(&mut self, _elapsed: Duration) {
        // Input driven; nothing advances with time
    }

    fn handle_input(&mut self, key: KeyEvent) {
        let direction = match key.code {
            KeyCode::Enter => {
                self.reset();
                return;
            }
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,
            _ => return,
        };
        if self.engine.slide(direction) {
            self.best = self.best.max(self.engine.score());
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let layout = game_layout(frame, area, " 2048 ", Color::Rgb(237, 194, 46), theme);
        render_score(frame, layout.status, self.engine.score(), self.best, theme);
        self.render_grid(frame, layout.field, theme);

        let help = match self.engine.phase() {
            Phase::Idle => "ENTER start │ Esc home",
            _ => "↑ ↓ ← → slide │ ENTER new │ Esc home",
        };
        render_message(
            frame,
            layout.message,
            self.engine.phase(),
            &self.engine.message(),
            help,
            theme,
        );
    }

    fn reset(&mut self) {
        self.engine.start();
    }

    fn get_score(&self) -> u32 {
        self.engine.score()
    }

    fn is_game_over(&self) -> bool {
        false
    }
}

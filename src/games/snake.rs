use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::engine::snake::{CellKind, SnakeEngine, GRID_SIZE};
use crate::engine::{Direction, Engine, GameLoop, Phase};
use crate::games::{game_layout, grid_lines, render_message, render_score, Game};
use crate::ui::theme::Theme;

/// Terminal columns per grid cell, to keep cells roughly square.
const CELL_WIDTH: usize = 2;

pub struct Snake {
    engine: SnakeEngine<StdRng>,
    game_loop: GameLoop,
    best: u32,
}

impl Default for Snake {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl Snake {
    pub fn new(rng: StdRng) -> Self {
        Self {
            engine: SnakeEngine::with_rng(rng),
            game_loop: GameLoop::new(),
            best: 0,
        }
    }

    pub fn engine(&self) -> &SnakeEngine<StdRng> {
        &self.engine
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    fn render_board(&self, theme: &Theme) -> Vec<Line<'static>> {
        let empty_bg = if theme.dark {
            theme.tint(Color::Rgb(30, 30, 38))
        } else {
            theme.tint(Color::Rgb(214, 222, 214))
        };
        let style_for = |kind: CellKind| -> (char, Style) {
            match kind {
                CellKind::Empty => ('·', Style::default().fg(theme.muted()).bg(empty_bg)),
                CellKind::Head => (
                    '█',
                    Style::default()
                        .fg(theme.tint(Color::Rgb(60, 200, 60)))
                        .bg(empty_bg),
                ),
                CellKind::Body => (
                    '█',
                    Style::default()
                        .fg(theme.tint(Color::Rgb(40, 140, 40)))
                        .bg(empty_bg),
                ),
                CellKind::Food => (
                    '●',
                    Style::default()
                        .fg(theme.tint(Color::Rgb(235, 70, 60)))
                        .bg(empty_bg),
                ),
            }
        };

        let grid: Vec<Vec<(char, Style)>> = self
            .engine
            .board()
            .iter()
            .map(|row| {
                row.iter()
                    .flat_map(|&kind| {
                        let (ch, style) = style_for(kind);
                        // Solid cells fill both columns; dots and food sit in the first
                        let pad = if ch == '█' { ch } else { ' ' };
                        [(ch, style), (pad, style)]
                    })
                    .collect()
            })
            .collect();

        grid_lines(grid)
    }
}

impl Game for Snake {
    fn update(&mut self, elapsed: Duration) {
        if self.game_loop.advance(&mut self.engine, elapsed) > 0 {
            self.best = self.best.max(self.engine.score());
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        let direction = match key.code {
            KeyCode::Enter => {
                if !self.engine.is_active() {
                    self.reset();
                }
                return;
            }
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,
            _ => return,
        };
        self.engine.set_direction(direction);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let layout = game_layout(frame, area, " Snake ", Color::Rgb(80, 220, 80), theme);
        render_score(frame, layout.status, self.engine.score(), self.best, theme);

        let board_w = (GRID_SIZE as usize * CELL_WIDTH) as u16;
        let board_h = GRID_SIZE as u16;
        let field = layout.field;
        let board = Rect::new(
            field.x + field.width.saturating_sub(board_w) / 2,
            field.y + field.height.saturating_sub(board_h) / 2,
            board_w.min(field.width),
            board_h.min(field.height),
        );
        frame.render_widget(Paragraph::new(self.render_board(theme)), board);

        let help = match self.engine.phase() {
            Phase::Running => "↑ ↓ ← → steer │ Esc home",
            _ => "ENTER start │ Esc home",
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
        self.game_loop.start();
    }

    fn get_score(&self) -> u32 {
        self.engine.score()
    }

    fn is_game_over(&self) -> bool {
        matches!(self.engine.phase(), Phase::Over | Phase::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::snake::Cell;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn started() -> Snake {
        let mut game = Snake::new(StdRng::seed_from_u64(5));
        game.handle_input(key(KeyCode::Enter));
        game
    }

    #[test]
    fn test_moves_every_200ms() {
        let mut game = started();
        game.update(Duration::from_millis(199));
        assert_eq!(game.engine().head(), Cell::new(5, 5));
        game.update(Duration::from_millis(1));
        assert_eq!(game.engine().head(), Cell::new(6, 5));
    }

    #[test]
    fn test_arrow_keys_steer() {
        let mut game = started();
        game.handle_input(key(KeyCode::Down));
        game.update(Duration::from_millis(200));
        assert_eq!(game.engine().head(), Cell::new(5, 6));
    }

    #[test]
    fn test_reverse_key_ignored() {
        let mut game = started();
        game.handle_input(key(KeyCode::Left));
        game.update(Duration::from_millis(200));
        assert_eq!(game.engine().head(), Cell::new(6, 5));
    }

    #[test]
    fn test_eating_updates_best() {
        let mut game = started();
        for _ in 0..3 {
            game.update(Duration::from_millis(200));
        }
        assert_eq!(game.engine().head(), Cell::new(8, 5));

        game.handle_input(key(KeyCode::Down));
        for _ in 0..3 {
            game.update(Duration::from_millis(200));
        }
        assert_eq!(game.engine().head(), Cell::new(8, 8));
        assert_eq!(game.get_score(), 1);
        assert_eq!(game.engine().len(), 2);
        assert_eq!(game.best(), 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut game = started();
        game.update(Duration::from_millis(600));
        // 600ms is credited as 500ms: two moves, 100ms carried over
        assert_eq!(game.engine().head(), Cell::new(7, 5));
        game.update(Duration::from_millis(100));
        assert_eq!(game.engine().head(), Cell::new(8, 5));
    }

    #[test]
    fn test_wall_crash_is_game_over() {
        let mut game = started();
        game.update(Duration::from_millis(400));
        game.update(Duration::from_millis(400));
        assert_eq!(game.engine().head(), Cell::new(9, 5));
        assert!(!game.is_game_over());

        game.update(Duration::from_millis(200));
        assert!(game.is_game_over());
        assert_eq!(game.engine().message(), "Game Over! Score: 0 - Start Again");
    }

    #[test]
    fn test_enter_restarts_after_crash() {
        let mut game = started();
        game.update(Duration::from_millis(500));
        game.update(Duration::from_millis(500));
        assert!(game.is_game_over());

        game.handle_input(key(KeyCode::Enter));
        assert!(game.engine().is_active());
        assert_eq!(game.engine().head(), Cell::new(5, 5));
    }
}

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::engine::flappy::{
    FlappyEngine, BIRD_X, BOARD_HEIGHT, BOARD_WIDTH, GAP_BOTTOM, GAP_TOP, PIPE_WIDTH,
};
use crate::engine::{Engine, GameLoop, Phase};
use crate::games::{game_layout, grid_lines, render_message, render_score, Game};
use crate::ui::theme::Theme;

/// Height of the bird sprite in board pixels; the floor limit leaves room for it.
const BIRD_SIZE: f64 = 30.0;

pub struct FlappyBird {
    engine: FlappyEngine,
    game_loop: GameLoop,
    best: u32,
    /// Last drawn play field, for hit-testing clicks.
    board: Rect,
}

impl Default for FlappyBird {
    fn default() -> Self {
        Self::new()
    }
}

impl FlappyBird {
    pub fn new() -> Self {
        Self {
            engine: FlappyEngine::new(),
            game_loop: GameLoop::new(),
            best: 0,
            board: Rect::default(),
        }
    }

    pub fn engine(&self) -> &FlappyEngine {
        &self.engine
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    fn render_field(&self, width: usize, height: usize, theme: &Theme) -> Vec<Line<'static>> {
        let snap = self.engine.snapshot();
        let sky = if theme.dark {
            theme.tint(Color::Rgb(18, 26, 52))
        } else {
            theme.tint(Color::Rgb(112, 192, 236))
        };
        let pipe = Style::default()
            .fg(theme.tint(Color::Rgb(70, 170, 60)))
            .bg(sky);
        let bird = Style::default()
            .fg(theme.tint(Color::Rgb(255, 210, 40)))
            .bg(sky)
            .add_modifier(Modifier::BOLD);

        let mut grid = vec![vec![(' ', Style::default().bg(sky)); width]; height];
        let px_per_col = BOARD_WIDTH / width as f64;
        let px_per_row = BOARD_HEIGHT / height as f64;

        // Pipe pair: right edge at pipe_x, gap sized for the bird sprite
        let pipe_left = snap.pipe_x - PIPE_WIDTH;
        for x in 0..width {
            let wx = (x as f64 + 0.5) * px_per_col;
            if wx < pipe_left || wx > snap.pipe_x {
                continue;
            }
            for (y, row) in grid.iter_mut().enumerate() {
                let wy = (y as f64 + 0.5) * px_per_row;
                if wy < GAP_TOP || wy > GAP_BOTTOM + BIRD_SIZE {
                    row[x] = ('█', pipe);
                }
            }
        }

        let bird_center = (snap.bird_y + BIRD_SIZE / 2.0).clamp(0.0, BOARD_HEIGHT - 1.0);
        let row = ((bird_center / px_per_row) as usize).min(height - 1);
        let col = ((BIRD_X / px_per_col) as usize).min(width - 1);
        let sprite = if snap.active { ['◖', '▶'] } else { ['✕', '✕'] };
        for (i, ch) in sprite.into_iter().enumerate() {
            if col + i < width {
                grid[row][col + i] = (ch, bird);
            }
        }

        grid_lines(grid)
    }
}

impl Game for FlappyBird {
    fn update(&mut self, elapsed: Duration) {
        if self.game_loop.advance(&mut self.engine, elapsed) > 0 {
            self.best = self.best.max(self.engine.score());
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if !self.engine.is_active() {
                    self.reset();
                }
            }
            KeyCode::Char(' ') | KeyCode::Up => self.engine.flap(),
            _ => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        if self.board.contains(Position::new(column, row)) {
            self.engine.flap();
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let layout = game_layout(frame, area, " Flappy Bird ", Color::Rgb(255, 210, 40), theme);
        render_score(frame, layout.status, self.engine.score(), self.best, theme);

        self.board = layout.field;
        let (w, h) = (layout.field.width as usize, layout.field.height as usize);
        if w > 1 && h > 1 {
            frame.render_widget(Paragraph::new(self.render_field(w, h, theme)), layout.field);
        }

        let help = match self.engine.phase() {
            Phase::Running => "SPACE/↑/click flap │ Esc home",
            _ => "ENTER start │ SPACE flap │ Esc home",
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
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_starts_game() {
        let mut game = FlappyBird::new();
        assert_eq!(game.engine().phase(), Phase::Idle);
        game.handle_input(key(KeyCode::Enter));
        assert!(game.engine().is_active());
    }

    #[test]
    fn test_enter_does_not_restart_running_game() {
        let mut game = FlappyBird::new();
        game.handle_input(key(KeyCode::Enter));
        game.update(Duration::from_millis(90));
        let y = game.engine().bird_y();
        game.handle_input(key(KeyCode::Enter));
        assert_eq!(game.engine().bird_y(), y);
    }

    #[test]
    fn test_space_flaps() {
        let mut game = FlappyBird::new();
        game.handle_input(key(KeyCode::Enter));
        game.update(Duration::from_millis(60));
        game.handle_input(key(KeyCode::Char(' ')));
        assert_eq!(game.engine().bird_velocity(), -8.0);
    }

    #[test]
    fn test_update_runs_thirty_ms_ticks() {
        let mut game = FlappyBird::new();
        game.handle_input(key(KeyCode::Enter));
        game.update(Duration::from_millis(90));
        // three ticks of 5px each
        assert_eq!(game.engine().pipe_x(), 285.0);
    }

    #[test]
    fn test_unattended_bird_falls_out() {
        let mut game = FlappyBird::new();
        game.handle_input(key(KeyCode::Enter));
        for _ in 0..200 {
            game.update(Duration::from_millis(30));
        }
        assert!(game.is_game_over());
        assert_eq!(game.get_score(), 0);
    }

    #[test]
    fn test_click_outside_board_ignored() {
        let mut game = FlappyBird::new();
        game.handle_input(key(KeyCode::Enter));
        game.board = Rect::new(10, 10, 20, 20);
        game.handle_click(0, 0);
        assert_eq!(game.engine().bird_velocity(), 0.0);
        game.handle_click(15, 15);
        assert_eq!(game.engine().bird_velocity(), -8.0);
    }
}

use crossterm::event::{KeyCode, KeyEvent};
use log::debug;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::apps::{app_block, PhoneApp};
use crate::ui::theme::Theme;

const ERROR_TEXT: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Op {
    pub fn symbol(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Subtract => '−',
            Op::Multiply => '×',
            Op::Divide => '÷',
        }
    }

    /// `None` when the result is not a finite number (division by zero).
    fn apply(&self, lhs: f64, rhs: f64) -> Option<f64> {
        let result = match self {
            Op::Add => lhs + rhs,
            Op::Subtract => lhs - rhs,
            Op::Multiply => lhs * rhs,
            Op::Divide => lhs / rhs,
        };
        result.is_finite().then_some(result)
    }
}

/// Four-function calculator with left-to-right chaining.
#[derive(Debug, Clone)]
pub struct Calculator {
    display: String,
    operation: Option<Op>,
    previous: Option<f64>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            operation: None,
            previous: None,
        }
    }

    /// What the screen shows: the entry, or "0" while it is empty.
    pub fn display(&self) -> &str {
        if self.display.is_empty() {
            "0"
        } else {
            &self.display
        }
    }

    pub fn operation(&self) -> Option<Op> {
        self.operation
    }

    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    fn is_error(&self) -> bool {
        self.display == ERROR_TEXT
    }

    fn value(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    pub fn input_digit(&mut self, digit: char) {
        if self.is_error() || self.display == "0" {
            self.display.clear();
        }
        self.display.push(digit);
    }

    pub fn input_point(&mut self) {
        if self.is_error() {
            self.display.clear();
        }
        if self.display.contains('.') {
            return;
        }
        self.display.push('.');
    }

    pub fn input_operator(&mut self, op: Op) {
        if self.display.is_empty() || self.is_error() {
            return;
        }
        match (self.previous, self.operation) {
            (Some(previous), Some(pending)) => match pending.apply(previous, self.value()) {
                Some(result) => self.previous = Some(result),
                None => return self.fail(),
            },
            _ => self.previous = Some(self.value()),
        }
        self.operation = Some(op);
        self.display.clear();
    }

    pub fn equals(&mut self) {
        let (Some(previous), Some(op)) = (self.previous, self.operation) else {
            return;
        };
        if self.display.is_empty() {
            return;
        }
        match op.apply(previous, self.value()) {
            Some(result) => {
                self.display = format_number(result);
                self.operation = None;
                self.previous = None;
            }
            None => self.fail(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn backspace(&mut self) {
        if self.is_error() {
            self.display.clear();
        } else {
            self.display.pop();
        }
    }

    fn fail(&mut self) {
        debug!("calculator: arithmetic error, resetting");
        self.display = ERROR_TEXT.to_string();
        self.operation = None;
        self.previous = None;
    }

    fn expression(&self) -> String {
        match (self.previous, self.operation) {
            (Some(previous), Some(op)) => format!("{} {}", format_number(previous), op.symbol()),
            _ => String::new(),
        }
    }
}

fn format_number(value: f64) -> String {
    // f64's Display already prints integral values without a fraction
    format!("{}", value)
}

impl PhoneApp for Calculator {
    fn handle_input(&mut self, key: KeyEvent) -> Option<String> {
        match key.code {
            KeyCode::Char(c @ '0'..='9') => self.input_digit(c),
            KeyCode::Char('.') | KeyCode::Char(',') => self.input_point(),
            KeyCode::Char('+') => self.input_operator(Op::Add),
            KeyCode::Char('-') => self.input_operator(Op::Subtract),
            KeyCode::Char('*') | KeyCode::Char('x') => self.input_operator(Op::Multiply),
            KeyCode::Char('/') => self.input_operator(Op::Divide),
            KeyCode::Enter | KeyCode::Char('=') => self.equals(),
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Delete => self.clear(),
            KeyCode::Backspace => self.backspace(),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let inner = app_block(frame, area, " Calculator ", theme);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Pending expression
                Constraint::Length(3), // Display
                Constraint::Min(0),    // Keypad
            ])
            .split(inner);

        let expression = Paragraph::new(self.expression())
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.muted()));
        frame.render_widget(expression, chunks[0]);

        let display = Paragraph::new(self.display().to_string())
            .alignment(Alignment::Right)
            .style(
                Style::default()
                    .fg(theme.text())
                    .bg(theme.surface())
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(theme.muted())));
        frame.render_widget(display, chunks[1]);

        let keypad = [
            ["7", "8", "9", "÷"],
            ["4", "5", "6", "×"],
            ["1", "2", "3", "−"],
            ["0", ".", "=", "+"],
        ];
        let mut lines: Vec<Line> = Vec::new();
        for row in keypad {
            lines.push(Line::from(""));
            let spans: Vec<Span> = row
                .iter()
                .map(|label| {
                    let is_op = !label.chars().all(|c| c.is_ascii_digit() || c == '.');
                    let color = if is_op { theme.highlight() } else { theme.text() };
                    Span::styled(
                        format!("  {}  ", label),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )
                })
                .collect();
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "C clear │ ⌫ delete │ Esc home",
            Style::default().fg(theme.muted()),
        )));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[2]);
    }
}

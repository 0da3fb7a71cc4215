//! Headless game engines.
//!
//! Each engine owns its whole state and exposes `start`, its input methods
//! and, for the timed games, a `tick`. Nothing in here knows about the
//! terminal: the adapters in `crate::games` read snapshots and draw them.

pub mod flappy;
pub mod game2048;
pub mod scheduler;
pub mod snake;

use std::time::Duration;

pub use scheduler::GameLoop;

/// Lifecycle of a single game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never started.
    Idle,
    Running,
    /// Ended by a collision or by leaving the play field.
    Over,
    /// Ended because there was nothing left to do (Snake filled the board).
    Won,
}

/// What a ticking engine wants its loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Halt,
}

/// Cardinal direction shared by Snake steering and 2048 slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step in grid coordinates (y grows downward).
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// True when both directions lie on the same axis.
    pub fn is_parallel(&self, other: Direction) -> bool {
        *self == other || *self == other.opposite()
    }
}

/// Behaviour common to every engine the shell can host.
pub trait Engine {
    /// Reset all state and begin a fresh session.
    fn start(&mut self);
    fn phase(&self) -> Phase;
    fn score(&self) -> u32;

    fn is_active(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Text the shell shows on the start button / status line.
    fn message(&self) -> String {
        match self.phase() {
            Phase::Idle => "Press ENTER to start".to_string(),
            Phase::Running => "Game Running...".to_string(),
            Phase::Over => format!("Game Over! Score: {} - Start Again", self.score()),
            Phase::Won => format!("Board cleared! Score: {} - Start Again", self.score()),
        }
    }
}

/// An engine advanced by a fixed-period timer.
pub trait TickEngine: Engine {
    const PERIOD: Duration;

    /// Run one simulation step. Returns `Tick::Halt` once the session is over.
    fn tick(&mut self) -> Tick;
}

//! Flappy Bird engine.
//!
//! World units are pixels of a 300×400 board. The bird sits at a fixed
//! column and only moves vertically; a single pipe pair scrolls leftward and
//! wraps back to the right edge, scoring one point per wrap.

use std::time::Duration;

use log::debug;

use super::{Engine, Phase, Tick, TickEngine};

pub const BOARD_WIDTH: f64 = 300.0;
pub const BOARD_HEIGHT: f64 = 400.0;

pub const GRAVITY: f64 = 0.4;
/// Velocity after a flap (negative = upward). Overrides, never adds.
pub const FLAP_VELOCITY: f64 = -8.0;

pub const START_Y: f64 = 150.0;
/// Lowest bird position still in play.
pub const FLOOR_Y: f64 = 370.0;

pub const PIPE_START_X: f64 = 300.0;
pub const PIPE_SPEED: f64 = 5.0;
/// Once the pipe's right edge scrolls past this it wraps to `PIPE_START_X`.
pub const PIPE_WRAP_X: f64 = -50.0;
pub const PIPE_WIDTH: f64 = 50.0;

/// Open band between the two pipes.
pub const GAP_TOP: f64 = 100.0;
pub const GAP_BOTTOM: f64 = 250.0;

/// Pipe positions (exclusive) for which the pipe overlaps the bird's column.
pub const HIT_MIN_X: f64 = 20.0;
pub const HIT_MAX_X: f64 = 70.0;

/// Where the renderer draws the bird.
pub const BIRD_X: f64 = 20.0;

/// Everything the renderer needs after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlappySnapshot {
    pub bird_y: f64,
    pub pipe_x: f64,
    pub score: u32,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct FlappyEngine {
    phase: Phase,
    bird_y: f64,
    bird_velocity: f64,
    pipe_x: f64,
    score: u32,
}

impl Default for FlappyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FlappyEngine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            bird_y: START_Y,
            bird_velocity: 0.0,
            pipe_x: PIPE_START_X,
            score: 0,
        }
    }

    /// Give the bird an upward impulse. Ignored unless a game is running.
    pub fn flap(&mut self) {
        if self.is_active() {
            self.bird_velocity = FLAP_VELOCITY;
        }
    }

    pub fn bird_y(&self) -> f64 {
        self.bird_y
    }

    pub fn bird_velocity(&self) -> f64 {
        self.bird_velocity
    }

    pub fn pipe_x(&self) -> f64 {
        self.pipe_x
    }

    pub fn snapshot(&self) -> FlappySnapshot {
        FlappySnapshot {
            bird_y: self.bird_y,
            pipe_x: self.pipe_x,
            score: self.score,
            active: self.is_active(),
        }
    }

    fn out_of_bounds(&self) -> bool {
        self.bird_y > FLOOR_Y || self.bird_y < 0.0
    }

    fn pipe_hits_bird(&self) -> bool {
        let overlaps_column = self.pipe_x > HIT_MIN_X && self.pipe_x < HIT_MAX_X;
        let outside_gap = self.bird_y < GAP_TOP || self.bird_y > GAP_BOTTOM;
        overlaps_column && outside_gap
    }

    fn crash(&mut self, cause: &str) -> Tick {
        self.phase = Phase::Over;
        debug!("flappy: crashed into {cause} with score {}", self.score);
        Tick::Halt
    }
}

impl Engine for FlappyEngine {
    fn start(&mut self) {
        *self = Self::new();
        self.phase = Phase::Running;
        debug!("flappy: started");
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn score(&self) -> u32 {
        self.score
    }
}

impl TickEngine for FlappyEngine {
    const PERIOD: Duration = Duration::from_millis(30);

    fn tick(&mut self) -> Tick {
        if !self.is_active() {
            return Tick::Halt;
        }
        if self.out_of_bounds() {
            return self.crash("the edge of the board");
        }

        self.bird_velocity += GRAVITY;
        self.bird_y += self.bird_velocity;

        if self.out_of_bounds() {
            return self.crash("the edge of the board");
        }

        self.pipe_x -= PIPE_SPEED;
        if self.pipe_x < PIPE_WRAP_X {
            self.pipe_x = PIPE_START_X;
            self.score += 1;
        }

        if self.pipe_hits_bird() {
            return self.crash("a pipe");
        }

        Tick::Continue
    }
}

//! Snake engine on a fixed 10×10 grid.

use std::collections::VecDeque;
use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{Direction, Engine, Phase, Tick, TickEngine};

pub const GRID_SIZE: i8 = 10;

pub const START_CELL: Cell = Cell::new(5, 5);
pub const START_FOOD: Cell = Cell::new(8, 8);
pub const START_DIRECTION: Direction = Direction::Right;

/// A grid cell. `(0, 0)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i8,
    pub y: i8,
}

impl Cell {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

/// How the renderer should paint a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Head,
    Body,
    Food,
}

pub type Board = [[CellKind; GRID_SIZE as usize]; GRID_SIZE as usize];

#[derive(Debug, Clone)]
pub struct SnakeEngine<R: Rng = StdRng> {
    rng: R,
    phase: Phase,
    /// Head at the front.
    body: VecDeque<Cell>,
    direction: Direction,
    /// Steering intent, applied at the start of the next tick.
    pending_direction: Direction,
    /// `None` only once the snake covers the whole board.
    food: Option<Cell>,
    score: u32,
}

impl SnakeEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for SnakeEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SnakeEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            phase: Phase::Idle,
            body: VecDeque::from([START_CELL]),
            direction: START_DIRECTION,
            pending_direction: START_DIRECTION,
            food: Some(START_FOOD),
            score: 0,
        }
    }

    /// Buffer a turn for the next tick. Turns along the current axis
    /// (including a 180° reversal) are ignored, as is any input while the
    /// game is not running.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.is_active() || direction.is_parallel(self.direction) {
            return;
        }
        self.pending_direction = direction;
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn cell_kind(&self, cell: Cell) -> CellKind {
        if cell == self.head() {
            CellKind::Head
        } else if self.body.contains(&cell) {
            CellKind::Body
        } else if self.food == Some(cell) {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }

    /// Classify every cell, indexed `[y][x]`.
    pub fn board(&self) -> Board {
        let mut board = [[CellKind::Empty; GRID_SIZE as usize]; GRID_SIZE as usize];
        if let Some(food) = self.food {
            board[food.y as usize][food.x as usize] = CellKind::Food;
        }
        for (i, seg) in self.body.iter().enumerate() {
            board[seg.y as usize][seg.x as usize] = if i == 0 {
                CellKind::Head
            } else {
                CellKind::Body
            };
        }
        board
    }

    /// Pick a uniformly random cell the snake does not occupy.
    fn spawn_food(&mut self) -> Option<Cell> {
        let free: Vec<Cell> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Cell::new(x, y)))
            .filter(|cell| !self.body.contains(cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }

    fn finish(&mut self, phase: Phase, cause: &str) -> Tick {
        self.phase = phase;
        debug!("snake: {cause}, length {} score {}", self.body.len(), self.score);
        Tick::Halt
    }
}

impl<R: Rng> Engine for SnakeEngine<R> {
    fn start(&mut self) {
        self.phase = Phase::Running;
        self.body = VecDeque::from([START_CELL]);
        self.direction = START_DIRECTION;
        self.pending_direction = START_DIRECTION;
        self.food = Some(START_FOOD);
        self.score = 0;
        debug!("snake: started");
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn score(&self) -> u32 {
        self.score
    }
}

impl<R: Rng> TickEngine for SnakeEngine<R> {
    const PERIOD: Duration = Duration::from_millis(200);

    fn tick(&mut self) -> Tick {
        if !self.is_active() {
            return Tick::Halt;
        }

        self.direction = self.pending_direction;
        let new_head = self.head().step(self.direction);

        if !new_head.in_bounds() {
            return self.finish(Phase::Over, "hit the wall");
        }
        if self.body.contains(&new_head) {
            return self.finish(Phase::Over, "ran into itself");
        }

        self.body.push_front(new_head);

        if self.food == Some(new_head) {
            self.score += 1;
            self.food = self.spawn_food();
            if self.food.is_none() {
                return self.finish(Phase::Won, "filled the board");
            }
        } else {
            self.body.pop_back();
        }

        Tick::Continue
    }
}

//! 2048 engine: a 4×4 slide-and-merge puzzle driven purely by input.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{Direction, Engine, Phase};

pub const SIZE: usize = 4;

/// Chance that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f64 = 0.9;

/// Row-major tile values, 0 = empty.
pub type Grid = [[u32; SIZE]; SIZE];

/// Slide one row towards index 0, merging equal neighbours.
///
/// Each tile takes part in at most one merge. Returns the new row and the
/// sum of the merged tiles.
pub fn slide_row(row: [u32; SIZE]) -> ([u32; SIZE], u32) {
    let tiles: Vec<u32> = row.into_iter().filter(|&v| v != 0).collect();
    let mut out = [0; SIZE];
    let mut gained = 0;
    let mut len = 0;
    let mut i = 0;

    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let merged = tiles[i] * 2;
            out[len] = merged;
            gained += merged;
            i += 2;
        } else {
            out[len] = tiles[i];
            i += 1;
        }
        len += 1;
    }

    (out, gained)
}

fn transpose(grid: &Grid) -> Grid {
    let mut out = [[0; SIZE]; SIZE];
    for (r, row) in grid.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            out[c][r] = value;
        }
    }
    out
}

fn mirror(grid: &Grid) -> Grid {
    let mut out = *grid;
    for row in out.iter_mut() {
        row.reverse();
    }
    out
}

fn slide_left(grid: &Grid) -> (Grid, u32) {
    let mut out = [[0; SIZE]; SIZE];
    let mut gained = 0;
    for (r, row) in grid.iter().enumerate() {
        let (slid, points) = slide_row(*row);
        out[r] = slid;
        gained += points;
    }
    (out, gained)
}

/// Slide the whole grid. Every direction is rewritten as a left slide on a
/// mirrored and/or transposed grid, then mapped back.
pub fn slide_grid(grid: &Grid, direction: Direction) -> (Grid, u32) {
    match direction {
        Direction::Left => slide_left(grid),
        Direction::Right => {
            let (slid, gained) = slide_left(&mirror(grid));
            (mirror(&slid), gained)
        }
        Direction::Up => {
            let (slid, gained) = slide_left(&transpose(grid));
            (transpose(&slid), gained)
        }
        Direction::Down => {
            let (slid, gained) = slide_left(&mirror(&transpose(grid)));
            (transpose(&mirror(&slid)), gained)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game2048Engine<R: Rng = StdRng> {
    rng: R,
    phase: Phase,
    grid: Grid,
    score: u32,
}

impl Game2048Engine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for Game2048Engine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game2048Engine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            phase: Phase::Idle,
            grid: [[0; SIZE]; SIZE],
            score: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile_count(&self) -> usize {
        self.grid.iter().flatten().filter(|&&v| v != 0).count()
    }

    /// Drop a 2 (or occasionally a 4) on a random empty cell.
    /// Returns the cell used, or `None` when the grid is full.
    pub fn spawn_tile(&mut self) -> Option<(usize, usize)> {
        let empty: Vec<(usize, usize)> = (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| self.grid[r][c] == 0)
            .collect();
        let &(r, c) = empty.choose(&mut self.rng)?;
        self.grid[r][c] = if self.rng.gen_bool(TWO_PROBABILITY) { 2 } else { 4 };
        Some((r, c))
    }

    /// Slide every tile towards `direction`. A tile spawns only if something
    /// actually moved or merged. Returns whether the grid changed.
    pub fn slide(&mut self, direction: Direction) -> bool {
        if !self.is_active() {
            return false;
        }

        let (grid, gained) = slide_grid(&self.grid, direction);
        if grid == self.grid {
            return false;
        }

        self.grid = grid;
        self.score += gained;
        self.spawn_tile();
        true
    }
}

impl<R: Rng> Engine for Game2048Engine<R> {
    fn start(&mut self) {
        self.grid = [[0; SIZE]; SIZE];
        self.score = 0;
        self.phase = Phase::Running;
        self.spawn_tile();
        self.spawn_tile();
        debug!("2048: started");
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn message(&self) -> String {
        match self.phase {
            Phase::Idle => "Press ENTER to start".to_string(),
            _ => "Playing...".to_string(),
        }
    }
}

//! Fixed-period tick scheduling.
//!
//! The shell delivers frames at whatever rate the terminal allows; a
//! `GameLoop` converts that host time into whole engine ticks and stops
//! itself as soon as the engine reports `Tick::Halt`.

use std::time::Duration;

use super::{Tick, TickEngine};

/// Upper bound on host time credited per frame. A stalled frame (terminal
/// resize, suspended process) must not turn into a burst of catch-up ticks.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(500);

/// A cancellable repeating task for one engine.
#[derive(Debug, Clone, Default)]
pub struct GameLoop {
    running: bool,
    accumulated: Duration,
    ticks: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the loop. Leftover time from an earlier session is discarded.
    pub fn start(&mut self) {
        self.running = true;
        self.accumulated = Duration::ZERO;
        self.ticks = 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks run since the last `start`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Credit `elapsed` host time and run every tick that became due.
    /// Returns how many ticks ran.
    pub fn advance<E: TickEngine>(&mut self, engine: &mut E, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }

        self.accumulated += elapsed.min(MAX_FRAME_TIME);
        let mut ran = 0;

        while self.accumulated >= E::PERIOD {
            self.accumulated -= E::PERIOD;
            self.ticks += 1;
            ran += 1;

            if engine.tick() == Tick::Halt {
                self.stop();
                break;
            }
        }

        ran
    }
}

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use log::{error, warn};

use crate::error::{Error, Result};

/// Consecutive poll failures after which the input thread gives up.
pub const MAX_POLL_FAILURES: u32 = 5;

pub enum Event {
    Key(KeyEvent),
    /// Left-button press.
    Click(MouseEvent),
    Tick,
}

/// Counts back-to-back poll failures; any success resets it.
#[derive(Debug, Default)]
struct PollFailures {
    consecutive: u32,
}

impl PollFailures {
    fn succeeded(&mut self) {
        self.consecutive = 0;
    }

    /// Record a failure. Returns true once the budget is used up.
    fn failed(&mut self) -> bool {
        self.consecutive += 1;
        self.consecutive >= MAX_POLL_FAILURES
    }
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut failures = PollFailures::default();
            loop {
                let forwarded = match event::poll(tick_rate) {
                    Ok(ready) => {
                        failures.succeeded();
                        if ready {
                            Self::read_event()
                        } else {
                            Some(Event::Tick)
                        }
                    }
                    Err(e) => {
                        if failures.failed() {
                            // Dropping the sender closes the channel for `next`
                            error!("terminal polling failed {MAX_POLL_FAILURES} times, stopping input: {e}");
                            return;
                        }
                        warn!("failed to poll terminal events: {e}");
                        thread::sleep(tick_rate);
                        Some(Event::Tick)
                    }
                };

                if let Some(event) = forwarded {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    fn read_event() -> Option<Event> {
        match event::read() {
            Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                Some(Event::Key(key))
            }
            Ok(crossterm::event::Event::Mouse(mouse))
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) =>
            {
                Some(Event::Click(mouse))
            }
            Ok(_) => None,
            Err(e) => {
                warn!("failed to read terminal event: {e}");
                None
            }
        }
    }

    pub fn next(&self) -> Result<Event> {
        self.rx.recv().map_err(|_| Error::EventSourceClosed)
    }
}

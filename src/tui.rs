//! Terminal setup and teardown.

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::Result;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run `setup`; if it fails, run `rollback` before handing the error back.
fn rollback_on_err<T>(setup: impl FnOnce() -> Result<T>, rollback: impl FnOnce()) -> Result<T> {
    let result = setup();
    if result.is_err() {
        rollback();
    }
    result
}

/// Raw mode, alternate screen and mouse capture. A failure part way through
/// leaves the terminal as it was.
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    rollback_on_err(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            terminal.clear()?;
            Ok(terminal)
        },
        || {
            if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
                warn!("failed to leave alternate screen: {e}");
            }
            if let Err(e) = disable_raw_mode() {
                warn!("failed to disable raw mode: {e}");
            }
        },
    )
}

pub fn restore(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

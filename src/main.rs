use std::time::Instant;

use clap::Parser;
use log::{error, info};

use phonecade::app::App;
use phonecade::config::Config;
use phonecade::event::{Event, EventHandler};
use phonecade::tui::{self, Tui};
use phonecade::{logging, ui, Result};

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(config.log_file.as_deref())?;
    info!("starting phonecade with {:?}", config);

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &config);

    // Restore terminal even when the loop failed
    tui::restore(&mut terminal)?;

    if let Err(e) = &result {
        error!("exiting on error: {e}");
    } else {
        info!("bye");
    }
    result
}

fn run(terminal: &mut Tui, config: &Config) -> Result<()> {
    let mut app = App::new(config);
    let event_handler = EventHandler::new(config.tick_rate());
    let mut last_frame = Instant::now();

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        match event_handler.next()? {
            Event::Tick => {}
            Event::Key(key) => app.on_key(key),
            Event::Click(mouse) => app.on_click(mouse.column, mouse.row),
        }

        // Time advances on every event, not only on ticks
        let now = Instant::now();
        app.on_tick(now.duration_since(last_frame));
        last_frame = now;

        if app.should_quit {
            return Ok(());
        }
    }
}

use color_eyre::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::stdout;

use bug_swarm::app::App;

/// Optional fixed seed for reproducible runs
const SEED_ENV: &str = "BUG_SWARM_SEED";

fn main() -> Result<()> {
    color_eyre::install()?;

    // The terminal belongs to the game, so diagnostics go to debug.log
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("debug.log")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let seed = match std::env::var(SEED_ENV) {
        Ok(value) => value.trim().parse()?,
        Err(_) => rand::random(),
    };

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    log::info!("terminal is {}x{} cells", size.width, size.height);

    let result = App::new(size.width, size.height, seed).run(&mut terminal);

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("game loop failed: {err}");
    }
    result
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use docket::app::AppState;
use docket::config::{load_settings, save_settings, Settings};
use docket::persistence::{init_local_docket, log_dir, resolve_data_dir, settings_file, JsonFileStore};
use docket::{input, logging, ticker, ui};
use log::warn;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "docket")]
#[command(about = "A terminal dashboard for legal deadlines with live countdowns", long_about = None)]
struct Cli {
    /// Use this data directory instead of discovering .docket
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off). Overrides settings.json.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .docket directory in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let docket_dir = init_local_docket()?;
            save_settings(settings_file(&docket_dir), &Settings::default())?;
            println!("Initialized docket directory: {}", docket_dir.display());
            println!();
            println!("Docket will now use this local directory for deadline storage.");
            println!("Run 'docket' to open the dashboard.");
            Ok(())
        }
        None => run_tui(cli.data_dir, cli.log_level),
    }
}

fn run_tui(data_dir: Option<PathBuf>, log_level: Option<String>) -> Result<()> {
    let data_dir = resolve_data_dir(data_dir)?;
    eprintln!("Using docket directory: {}", data_dir.display());

    let settings = match load_settings(settings_file(&data_dir)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Warning: {:#}. Using default settings.", e);
            Settings::default()
        }
    };

    let level = log_level.unwrap_or_else(|| settings.log_level.clone());
    // Held until exit so the log writer keeps flushing
    let _logger = match logging::init_logging(&level, &log_dir(&data_dir)) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    let store = JsonFileStore::open_in(&data_dir);
    let mut app = AppState::new(Box::new(store), settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown();

    if let Err(err) = result {
        warn!("event=app_exit module=main status=error error={:#}", err);
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Countdowns move on the refresh cadence, not on every key press
        app.tick(Instant::now());

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }
    }
}

mod app;
mod clipboard;
mod clock;
mod domain;
mod input;
mod persistence;
mod store;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::{AppState, AppStore};
use clap::{Parser, Subcommand};
use clipboard::{Clipboard, SystemClipboard};
use clock::{Clock, SystemClock};
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{
    create_project_dir, prepare_data_dir, FileStorage, KeyValueStorage, LOG_FILE, STORAGE_FILE,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use store::TaskStore;

/// Environment variable holding the log filter
const LOG_ENV: &str = "TALLY_LOG";

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Track time spent on ad-hoc activities from a terminal popup", long_about = None)]
struct Cli {
    /// Data directory. Defaults to the nearest .tally directory, then ~/.tally
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tally directory in the current directory
    Init,
    /// Print the activity report, one "<title>, <HH:MM:SS>" line per task
    Report {
        /// Also place the report on the clipboard
        #[arg(short, long)]
        copy: bool,
    },
    /// Print the total elapsed time across all tasks
    Total,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let tally_dir = create_project_dir()?;
            println!("Initialized tally directory: {}", tally_dir.display());
            println!();
            println!("Tally will now use this local directory for task storage.");
            println!("Run 'tally' to start tracking activities.");
            Ok(())
        }
        Some(Commands::Report { copy }) => {
            let dir = prepare_data_dir(cli.dir.as_deref())?;
            init_logging(&dir);
            let store = open_store(&dir)?;
            let report = store.activity_report();
            println!("{}", report);
            if copy {
                SystemClipboard
                    .set_text(&report)
                    .context("Failed to copy report to clipboard")?;
                eprintln!("Activities copied to clipboard!");
            }
            Ok(())
        }
        Some(Commands::Total) => {
            let dir = prepare_data_dir(cli.dir.as_deref())?;
            init_logging(&dir);
            let store = open_store(&dir)?;
            println!("{}", domain::format_time(store.total_elapsed()));
            Ok(())
        }
        None => run_tui(cli.dir.as_deref()),
    }
}

/// Send logs to tally.log in the data directory, never to the terminal
fn init_logging(dir: &Path) {
    let log_path = dir.join(LOG_FILE);
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: logging disabled, cannot open {}: {}", log_path.display(), e);
            return;
        }
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn open_store(dir: &Path) -> Result<AppStore> {
    let storage: Box<dyn KeyValueStorage> = Box::new(FileStorage::new(dir.join(STORAGE_FILE)));
    let clock: Box<dyn Clock> = Box::new(SystemClock);
    TaskStore::open(storage, clock)
        .with_context(|| format!("Failed to load tasks from {}", dir.display()))
}

fn run_tui(explicit_dir: Option<&Path>) -> Result<()> {
    let dir = prepare_data_dir(explicit_dir)?;
    init_logging(&dir);
    log::info!("Using tally directory: {}", dir.display());

    let store = open_store(&dir)?;
    let mut app = AppState::new(store, Box::new(SystemClipboard));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Running timers stay running in storage, like closing the popup
    if let Err(err) = &result {
        log::error!("Exited with error: {:#}", err);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = ticker::poll_interval();

    loop {
        terminal.draw(|f| ui::render(f, &*app))?;

        if event::poll(poll_rate)? && input::handle_event(app, event::read()?)? {
            return Ok(());
        }

        app.tick();
    }
}

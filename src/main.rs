//! Main entry point for the podcast-carousel application.

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, warn};
use podcast_carousel::carousel::Catalog;
use podcast_carousel::config::{Config, Variant};
use podcast_carousel::data;
use podcast_carousel::error::Result as AppResult;
use podcast_carousel::tui::{draw, Action, App};
use podcast_carousel::types::Dataset;
use ratatui::prelude::*;
use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How long the input reader blocks before checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Command-line arguments for the podcast-carousel application.
#[derive(Parser, Debug)]
#[command(
    name = "podcast-carousel",
    version,
    about = "A terminal front page for a podcast",
    long_about = "Browse a podcast's episodes through an auto-advancing slide carousel, \
                  with pages for episodes, shows, hosts and social links."
)]
struct Args {
    /// Carousel preset (overrides config)
    #[arg(short, long, value_enum)]
    variant: Option<Variant>,

    /// Autoplay dwell interval in milliseconds (overrides the preset)
    #[arg(long)]
    dwell_ms: Option<u64>,

    /// Autoplay cooldown after an interaction in milliseconds (overrides the preset)
    #[arg(long)]
    cooldown_ms: Option<u64>,

    /// Dataset JSON file (bundled sample data when omitted)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Print the slide catalog and exit
    #[arg(long)]
    list: bool,

    /// Write a default config file if there is none, print its path and exit
    #[arg(long)]
    init_config: bool,

    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn load_dataset(path: Option<&Path>) -> AppResult<Dataset> {
    match path {
        Some(path) => data::load(path),
        None => data::sample(),
    }
}

/// Print one line per slide, in carousel order.
fn print_catalog(dataset: &Dataset, config: &Config) -> AppResult<()> {
    let catalog = Catalog::from_dataset(dataset, config.variant.label_style())?;
    let len = catalog.len();
    for (i, (slide, label)) in catalog.slides().iter().zip(catalog.labels()).enumerate() {
        println!("{:02} / {:02}  {}  {}", i + 1, len, label, slide.title());
    }
    Ok(())
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut logger = env_logger::Builder::new();
    logger
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false);
    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    logger.init();

    debug!("Log level set to {:?}", log_level);

    if args.init_config {
        match Config::create_default_if_missing() {
            Ok(path) => println!("{}", path.display()),
            Err(e) => {
                eprintln!("Error: could not write config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Load config
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    // Merge config with CLI args
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    if args.dwell_ms.is_some() {
        config.dwell_ms = args.dwell_ms;
    }
    if args.cooldown_ms.is_some() {
        config.cooldown_ms = args.cooldown_ms;
    }
    let data_path = args
        .data
        .clone()
        .or_else(|| config.data_path.as_ref().map(PathBuf::from));

    let dataset = match load_dataset(data_path.as_deref()) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Error: could not load dataset: {}", e);
            std::process::exit(1);
        }
    };

    if args.list {
        if let Err(e) = print_catalog(&dataset, &config) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    // Build the app before touching the terminal so errors print normally
    let mut app = match App::new(dataset, &config, Instant::now()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting with the {} preset", config.variant.as_str());

    // Initialize terminal
    let mut terminal = init_terminal()?;

    let result = run_app(&mut terminal, &mut app).await;

    // Tear the carousel down before leaving the screen it draws on
    app.shutdown();
    restore_terminal()?;
    terminal.show_cursor()?;

    result
}

/// Forward terminal events to the async loop until the receiver is gone.
fn spawn_event_reader(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.blocking_send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
        }
    });
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::channel::<Event>(256);
    spawn_event_reader(tx);

    loop {
        let now = Instant::now();
        app.on_tick(now);

        // Draw UI
        terminal.draw(|f| draw(f, app, now))?;

        let wait = app.next_wakeup(now);
        tokio::select! {
            received = rx.recv() => {
                let Some(event) = received else {
                    break;
                };
                let now = Instant::now();
                let action = match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_input(key, now),
                    Event::Mouse(mouse) => app.handle_mouse(mouse, now),
                    _ => Action::None,
                };

                match action {
                    Action::Quit => break,
                    Action::Open(route) => app.open(route, now),
                    Action::None => {}
                }

                if app.should_quit {
                    break;
                }
            }
            _ = tokio::time::sleep(wait) => {}
        }
    }

    Ok(())
}

//! Student Feedback Manager - terminal front-end for the student feedback
//! service.

use std::io::{self, Stdout};
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info, warn};

use student_feedback::api::FeedbackClient;
use student_feedback::app::App;
use student_feedback::config::Config;
use student_feedback::error::{AppError, Result};
use student_feedback::events::EventHandler;
use student_feedback::logging;
use student_feedback::tasks::{create_task_channel, ApiMessage, TaskSpawner};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Submit, browse, and chart student course feedback from the terminal.
#[derive(Debug, Parser)]
#[command(name = "student-feedback", version, about)]
struct Cli {
    /// Base URL of the feedback API, overriding the configuration file.
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Configuration file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective configuration to the configuration file and exit.
    #[arg(long)]
    write_config: bool,
}

/// Load the configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Save the effective configuration where it would be loaded from.
fn write_config(cli: &Cli, config: &Config) -> Result<PathBuf> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    config.save_to(&path)?;
    Ok(path)
}

fn report(err: &AppError) {
    if err.is_critical() {
        error!(error = %err, "Fatal error");
    } else {
        warn!(error = %err, "Exiting after error");
    }
    eprintln!("Error: {}", err.user_message());
    if let Some(action) = err.suggested_action() {
        eprintln!("{}", action);
    }
    if let Some(dir) = logging::log_directory() {
        eprintln!("Logs are in {}", dir.display());
    }
}

fn init_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

fn restore_terminal() -> io::Result<()> {
    // Try both steps even if the first fails.
    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen)?;
    raw
}

/// Put the terminal back before the default panic output is printed.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original(info);
    }));
}

/// Drive the application until it asks to quit.
fn run(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut UnboundedReceiver<ApiMessage>,
    spawner: &TaskSpawner,
    events: &EventHandler,
) -> Result<()> {
    while !app.should_quit() {
        terminal
            .draw(|frame| app.view(frame))
            .map_err(|e| AppError::terminal(e.to_string()))?;

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        app.update(events.next()?);

        for request in app.take_pending_requests() {
            spawner.spawn(request);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging is disabled: {}", e);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    };

    if cli.write_config {
        match write_config(&cli, &config) {
            Ok(path) => {
                println!("Wrote configuration to {}", path.display());
                return Ok(());
            }
            Err(err) => {
                report(&err);
                std::process::exit(1);
            }
        }
    }

    let client = match FeedbackClient::new(&config.api) {
        Ok(client) => client,
        Err(err) => {
            report(&AppError::from(err));
            std::process::exit(1);
        }
    };
    info!(base_url = %client.base_url(), "Using feedback API");

    let (mut rx, spawner) = create_task_channel(client);
    let events = EventHandler::with_tick_rate(config.settings.tick_rate_ms);
    let mut app = App::new();

    install_panic_hook();
    let mut terminal = init_terminal().map_err(|e| AppError::terminal(e.to_string()))?;

    let result = run(&mut terminal, &mut app, &mut rx, &spawner, &events);

    if let Err(e) = restore_terminal() {
        warn!(error = %e, "Failed to restore terminal");
    }
    logging::shutdown();

    if let Err(err) = result {
        report(&err);
        std::process::exit(1);
    }
    Ok(())
}

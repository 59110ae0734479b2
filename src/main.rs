//! artgrid - a terminal data table for the Art Institute of Chicago API.

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info};

use artgrid::api::{ArticClient, PageNumber};
use artgrid::app::App;
use artgrid::config::Config;
use artgrid::error::{AppError, Result};
use artgrid::events::{EventHandler, KeyBindings};
use artgrid::logging;
use artgrid::tasks::{create_task_channel, ApiMessage, TaskSpawner};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Browse artworks page by page and select rows across pages.
#[derive(Debug, Parser)]
#[command(name = "artgrid", version, about)]
struct Cli {
    /// Page to open first (1-based).
    #[arg(short, long)]
    page: Option<u32>,

    /// Base URL of the catalog API.
    #[arg(long)]
    api_url: Option<String>,

    /// Path to the configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Print the final selection as JSON on exit.
    #[arg(long)]
    print_selection: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init(cli.log_dir.as_deref()).context("failed to set up logging")?;

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Startup failed");
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    let settings = &config.settings;
    let start_page = PageNumber::new(settings.start_page).unwrap_or_default();
    let client = ArticClient::new(settings).map_err(AppError::from)?;
    let (rx, spawner) = create_task_channel();
    let mut app = App::new(start_page, KeyBindings::new(settings.vim_mode));

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app, &client, &spawner, rx);
    restore_terminal(&mut terminal)?;
    result?;

    if cli.print_selection {
        let json = serde_json::to_string_pretty(&app.selection().selected_ids())?;
        println!("{}", json);
    }

    logging::shutdown();
    Ok(())
}

/// Load the config file and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(page) = cli.page {
        config.settings.start_page = page;
    }
    if let Some(url) = &cli.api_url {
        config.settings.api_url = url.clone();
    }
    config.validate()?;

    info!(
        api_url = %config.settings.api_url,
        start_page = config.settings.start_page,
        "Configuration loaded"
    );
    Ok(config)
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Drive the app until it asks to quit.
fn run(
    terminal: &mut Tui,
    app: &mut App,
    client: &ArticClient,
    spawner: &TaskSpawner,
    mut rx: UnboundedReceiver<ApiMessage>,
) -> Result<()> {
    let events = EventHandler::new();

    loop {
        for request in app.take_pending_fetches() {
            spawner.spawn(client, request);
        }

        terminal.draw(|frame| app.view(frame))?;

        let event = events.next()?;
        app.update(event);

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        if app.should_quit() {
            info!("Exiting main loop");
            return Ok(());
        }
    }
}

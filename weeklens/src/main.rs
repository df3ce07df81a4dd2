//! weeklens - Week in Review
//!
//! Terminal dashboard for one week of half-hour activity records: a colored
//! time-slot grid, screen time, average mood and a chat with a remote
//! assistant that knows about the week.

mod app;
mod chat_worker;
mod summary;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use weeklens_core::analytics::WeekSummary;
use weeklens_core::{Config, ScreenTimeSeries, WeekDataset};

use crate::app::App;
use crate::chat_worker::ChatWorker;
use crate::summary::SummaryFormat;

#[derive(Parser, Debug)]
#[command(name = "weeklens")]
#[command(about = "Week in Review - your week at a glance")]
#[command(version)]
struct Args {
    /// Week data file (JSON, date -> slots). Defaults to the configured path
    #[arg(long)]
    data: Option<PathBuf>,

    /// Screen time file (JSON, seven days). Built-in sample data if omitted
    #[arg(long)]
    screen_time: Option<PathBuf>,

    /// Print a summary of the week and exit instead of opening the dashboard
    #[arg(long)]
    summary: bool,

    /// Summary output format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    format: SummaryFormat,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        weeklens_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("weeklens starting up");

    let grid_config = config.grid_config().context("invalid grid configuration")?;

    let data_path = args
        .data
        .clone()
        .unwrap_or_else(|| config.dataset.week_data_path());
    tracing::info!(path = %data_path.display(), "Loading week data");
    let dataset = WeekDataset::load(&data_path, &grid_config)
        .with_context(|| format!("failed to load week data from {}", data_path.display()))?;

    let screen_time = match args.screen_time.as_ref().or(config.dataset.screen_time.as_ref()) {
        Some(path) => ScreenTimeSeries::load(path)
            .with_context(|| format!("failed to load screen time from {}", path.display()))?,
        None => ScreenTimeSeries::default(),
    };

    if args.summary {
        let summary = WeekSummary::build(&dataset, &screen_time, &grid_config);
        return summary::print(&summary, args.format);
    }

    let worker = ChatWorker::new(&config.assistant).context("failed to start chat worker")?;
    let mut app = App::new(
        &dataset,
        &screen_time,
        grid_config,
        &config.assistant.fallback_message,
    );

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, &worker);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!(
        exchanges = app.chat.exchange_count(),
        "weeklens shutting down"
    );

    result
}

/// Run the main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &ChatWorker,
) -> Result<()> {
    loop {
        for reply in worker.drain() {
            app.on_chat_reply(reply);
        }

        app.tick_animation();

        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if let Some(request) = app.take_outgoing() {
            worker.dispatch(request);
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

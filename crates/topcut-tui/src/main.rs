// Top-cut viewer entry point.
//
// Startup sequence:
// 1. Parse command-line arguments
// 2. Load config (copying defaults/ into config/ on first run)
// 3. Initialize tracing (log to file, not terminal)
// 4. Load the event: a JSON bundle if one was given, else the CSV exports
// 5. Compute the top-cut view
// 6. Print the plain report, or run the TUI until the user quits

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::info;

use topcut_core::RequestedTop;
use topcut_tui::config::{self, Config};
use topcut_tui::data::{self, EventData};
use topcut_tui::report;
use topcut_tui::tui::{self, ViewState};

#[derive(Parser, Debug)]
#[clap(name = "topcut", about = "Single-elimination top cut viewer", version, long_about = None)]
struct Args {
    #[clap(action = ArgAction::Set, help = "Event JSON bundle (defaults to the CSV exports in the config)")]
    event: Option<PathBuf>,
    #[clap(long, short = 't', action = ArgAction::Set, help = "Requested bracket size: 4, 8 or 16")]
    top: Option<RequestedTop>,
    #[clap(long, short = 'p', action = ArgAction::SetTrue, help = "Print a plain-text report instead of the TUI")]
    plain: bool,
    #[clap(long, short = 'c', action = ArgAction::Set, help = "Directory holding config/ and defaults/")]
    config_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // 1. Arguments
    let args = Args::parse();

    // 2. Config
    let config = config::load_config(args.config_dir.as_deref())
        .context("failed to load configuration")?;

    // 3. Tracing
    init_tracing(&config)?;
    info!("topcut starting up (config at {})", config.base_dir.display());

    // 4. Event data
    let event = load_event(args.event.as_deref(), &config)?;

    // 5. View
    let requested_top = args.top.unwrap_or(config.requested_top);
    let state = ViewState::new(event, requested_top);
    info!(
        "{} decks, {} matches, attendance {}: showing top {} (requested {})",
        state.event.decks.len(),
        state.event.matches.len(),
        state.event.tournament.attendance,
        state.view.effective_top,
        requested_top.value()
    );

    // 6. Output
    if args.plain {
        print!("{}", report::render_report(&state.event.tournament, &state.view));
        return Ok(());
    }

    tui::run(state)?;
    info!("topcut shut down cleanly");
    Ok(())
}

fn load_event(path: Option<&Path>, config: &Config) -> anyhow::Result<EventData> {
    match path {
        Some(path) => data::load_event_json(path)
            .with_context(|| format!("failed to load event bundle {}", path.display())),
        None => data::load_event_from_config(config).context("failed to load CSV exports"),
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = config.base_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("topcut.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

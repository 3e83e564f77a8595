//! ecotrack - Sustainability Rewards Dashboard
//!
//! A TUI for collecting eco-points and browsing sustainable rewards.
//!
//! Features:
//! - Community challenge feed
//! - Earn Eco-Points by uploading proof images
//! - Sustainable marketplace
//! - Carbon savings impact chart
//! - Profile badges
//! - Compare sustainability reports for recycled claims
//!
//! Usage: ecotrack [--theme <name>] [--config <path>] [compare <report>]

mod app;
mod config;
mod logging;
mod nav;
mod picker;
mod report;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use config::{Config, ThemeName};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "ecotrack", version, about = "Sustainability rewards dashboard")]
#[command(after_help = "KEYBINDINGS:
    1-5              Switch tabs
    Tab / h l        Next / previous tab
    j/k              Scroll
    u, Enter         Upload proof (Eco-Points tab)
    t                Cycle theme
    ?                Help
    q                Quit

CONFIG:
    ~/.config/ecotrack/config.toml")]
struct Cli {
    /// Color theme, overriding the config file
    #[arg(long, value_enum)]
    theme: Option<ThemeName>,

    /// Alternate config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a text or PDF sustainability report against a known one
    Compare {
        /// Report to analyze
        report: PathBuf,

        /// Report to compare against (defaults to the built-in known report)
        #[arg(long, value_name = "FILE")]
        against: Option<PathBuf>,

        /// Similarity above which the report is flagged
        #[arg(long, default_value_t = report::DEFAULT_THRESHOLD)]
        threshold: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A broken log location should not keep the app from starting
    let log_path = logging::init_or_warn();

    let result = match cli.command {
        Some(Command::Compare { report, against, threshold }) => {
            report::run_compare(&report, against.as_deref(), threshold)
        }
        None => run_app(cli.config, cli.theme, log_path),
    };

    // Terminal state is restored by run_app before errors reach here
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    config_path: Option<PathBuf>,
    theme: Option<ThemeName>,
    log_path: Option<PathBuf>,
) -> Result<()> {
    // Load configuration
    let mut config = match &config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(theme) = theme {
        config.theme = theme;
    }

    if let Some(path) = &log_path {
        eprintln!("Logging to {}", path.display());
    }
    info!(theme = config.theme.as_str(), "starting ecotrack");

    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!(points = app.eco_points.points, "session ended");
    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        app.tick();

        // Poll for events with timeout (for flash expiry)
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from(["ecotrack", "compare", "report.txt", "--threshold", "0.5"]).unwrap();
        match cli.command {
            Some(Command::Compare { report, against, threshold }) => {
                assert_eq!(report, PathBuf::from("report.txt"));
                assert!(against.is_none());
                assert_eq!(threshold, 0.5);
            }
            None => panic!("expected compare"),
        }
    }

    #[test]
    fn test_parse_theme() {
        let cli = Cli::try_parse_from(["ecotrack", "--theme", "forest"]).unwrap();
        assert_eq!(cli.theme, Some(ThemeName::Forest));
        assert!(cli.command.is_none());
    }
}

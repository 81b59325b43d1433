//! vdiff CLI - scrollable, colour-coded viewer for unified diffs on stdin

mod app;
mod color;
mod config;
mod ui;
mod views;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use vdiff_core::{DiffDocument, FsProbe};

/// Environment variable holding the log filter, e.g. `VDIFF_LOG=debug`
const LOG_ENV: &str = "VDIFF_LOG";

#[derive(Parser, Debug)]
#[command(name = "vdiff")]
#[command(author, version, about = "A scrollable viewer for unified diffs read from stdin")]
#[command(after_help = "Example: git diff | vdiff -b")]
struct Args {
    /// Use the dark colour scheme
    #[arg(short = 'b', long = "black")]
    black: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Install a file logger when `VDIFF_LOG` is set. The returned guard must
/// outlive the event loop so buffered records are flushed.
fn configure_logging() -> Option<WorkerGuard> {
    let filter = std::env::var(LOG_ENV).ok()?;
    let log_dir = dirs::cache_dir()?.join("vdiff");
    if std::fs::create_dir_all(&log_dir).is_err() {
        return None;
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, "vdiff.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global subscriber already installed; drop guard so writer shuts down.
        Err(_) => None,
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    let config = config::Config::load(args.config.as_deref())?;

    let stdin = io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!(
            "No diff on standard input.\n\
             \n\
             Usage: git diff | vdiff [-b]"
        );
    }

    // Read the whole diff before touching the terminal
    let doc = DiffDocument::from_reader(stdin.lock(), &FsProbe::current_dir())
        .context("Failed to read diff")?;

    let dark = args.black || config.ui.dark;
    let mut app = App::new(doc, &config, dark);

    // Setup terminal
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    tracing::info!(rows = app.total(), dark, "viewer started");

    // Run event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    tracing::info!("viewer closed");

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                // Geometry is re-measured on the next draw
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_flag() {
        let args = Args::try_parse_from(["vdiff", "-b"]).expect("args");
        assert!(args.black);
        assert!(args.config.is_none());

        let args = Args::try_parse_from(["vdiff", "--black", "--config", "x.toml"]).expect("args");
        assert!(args.black);
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_positional_arguments_are_rejected() {
        assert!(Args::try_parse_from(["vdiff", "some-file"]).is_err());
    }
}

//! Tradeloom TUI: textile trade dashboard in the terminal.
//!
//! Layout:
//! 1. Header: title, data fingerprint, update caption
//! 2. Sidebar: metric column selector and comparison toggle
//! 3. Main: three summary cards, trend chart, comparison chart, raw table
//! 4. Status bar: key hints and the last status message

mod app;
mod input;
mod theme;
mod ui;

#[cfg(test)]
mod test_support;

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tradeloom_core::dashboard::Selection;
use tradeloom_core::{font, DashboardConfig};

use crate::app::AppState;

#[derive(Parser)]
#[command(name = "tradeloom-tui", about = "Textile trade dashboard in the terminal")]
struct Args {
    /// Config file (defaults to the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data file, overriding the configured path.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Start with the total-industry comparison shown.
    #[arg(long)]
    compare: bool,
}

/// Log to a file under the cache directory; stderr belongs to the terminal.
fn init_logging() {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("tradeloom")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("tui.log")) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = DashboardConfig::load(args.config.as_deref(), dirs::config_dir())
        .context("failed to load configuration")?;
    if let Some(data) = args.data {
        config.data_path = data;
    }
    let font = font::resolve(config.font_file.as_deref());
    info!(data = %config.data_path.display(), font = %font.family, "starting dashboard");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let selection = Selection::default().with_comparison(args.compare);
    let mut app = AppState::new(config, selection, font);
    if let (Some(note), None) = (font.note, &app.status_message) {
        app.set_warning(format!("{}: {note}", font.family));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms poll keeps resize redraws responsive.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }
    }
    Ok(())
}

//! Tradeloom CLI: one-shot renders of the textile trade dashboard.
//!
//! Commands:
//! - `report`: write the self-contained HTML dashboard
//! - `summary`: print the three summary cards (or the whole dashboard as JSON)
//! - `columns`: list the metric columns, marking the default selection
//! - `export`: write the Markdown report

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tradeloom_core::dashboard::{default_column, render, Dashboard, DashboardView, DataSource, Selection};
use tradeloom_core::data::load_table;
use tradeloom_core::{font, DashboardConfig};
use tradeloom_report::{write_report, ReportFormat};

#[derive(Parser)]
#[command(
    name = "tradeloom",
    about = "Tradeloom CLI: Korean textile industry export/import dashboard"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the data comes from.
#[derive(Args, Debug, Clone, Default)]
struct DataArgs {
    /// Path to a TOML config file. Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data file, overriding the configured path.
    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the HTML dashboard.
    Report {
        #[command(flatten)]
        source: DataArgs,

        /// Metric column for the trend chart. Defaults to the configured index.
        #[arg(long)]
        column: Option<String>,

        /// Show the total-industry comparison when the page opens.
        #[arg(long, default_value_t = false)]
        compare: bool,

        /// Font file to embed, overriding the configured one.
        #[arg(long)]
        font: Option<PathBuf>,

        /// Output path.
        #[arg(short, long, default_value = "tradeloom-dashboard.html")]
        output: PathBuf,
    },
    /// Print the summary cards of the latest year.
    Summary {
        #[command(flatten)]
        source: DataArgs,

        /// Print the whole dashboard as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List metric columns.
    Columns {
        #[command(flatten)]
        source: DataArgs,
    },
    /// Write the Markdown report.
    Export {
        #[command(flatten)]
        source: DataArgs,

        /// Output path.
        #[arg(short, long, default_value = "tradeloom-report.md")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Report {
            source,
            column,
            compare,
            font,
            output,
        } => {
            let mut config = load_config(&source)?;
            if font.is_some() {
                config.font_file = font;
            }
            let selection = Selection {
                column,
                show_comparison: compare,
            };
            let path = run_report(&config, &selection, &output, ReportFormat::Html)?;
            writeln!(stdout, "Report saved to: {}", path.display())?;
        }
        Commands::Summary { source, json } => {
            let config = load_config(&source)?;
            let dashboard = render_dashboard(&config)?;
            if json {
                let text = serde_json::to_string_pretty(&dashboard)
                    .context("failed to serialize dashboard")?;
                writeln!(stdout, "{text}")?;
            } else {
                write!(stdout, "{}", summary_text(&dashboard))?;
            }
        }
        Commands::Columns { source } => {
            let config = load_config(&source)?;
            write!(stdout, "{}", columns_text(&config)?)?;
        }
        Commands::Export { source, output } => {
            let config = load_config(&source)?;
            let path = run_report(&config, &Selection::default(), &output, ReportFormat::Markdown)?;
            writeln!(stdout, "Report saved to: {}", path.display())?;
        }
    }

    Ok(())
}

/// `--config`, then the user config file, then defaults; `--data` wins over all.
fn load_config(args: &DataArgs) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::load(args.config.as_deref(), dirs::config_dir())
        .context("failed to load configuration")?;
    if let Some(data) = &args.data {
        config.data_path = data.clone();
    }
    debug!(data = %config.data_path.display(), "configuration loaded");
    Ok(config)
}

fn render_dashboard(config: &DashboardConfig) -> Result<Dashboard> {
    let source = DataSource::from_config(config);
    match render(&source, &Selection::default(), &config.columns) {
        DashboardView::Ready(dashboard) => Ok(*dashboard),
        DashboardView::Failed(banner) => bail!("{}", banner.message),
    }
}

/// Render and write a report. A failed pass still writes the banner page,
/// then returns the banner as the error.
fn run_report(
    config: &DashboardConfig,
    selection: &Selection,
    output: &Path,
    format: ReportFormat,
) -> Result<PathBuf> {
    let source = DataSource::from_config(config);
    let view = render(&source, selection, &config.columns);
    let font = font::resolve(config.font_file.as_deref());

    let path = write_report(
        output,
        format,
        &view,
        font,
        &config.columns,
        Local::now().naive_local(),
    )
    .with_context(|| format!("failed to write report to {}", output.display()))?;

    if let Some(banner) = view.banner() {
        bail!("{} (banner written to {})", banner.message, path.display());
    }
    Ok(path)
}

fn summary_text(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let year = dashboard.cards[0].year;
    out.push_str(&format!("{year}년 요약 (data {})\n", dashboard.short_fingerprint()));
    for card in &dashboard.cards {
        let suffix = if card.indicator.is_delta() { " (전년비)" } else { "" };
        out.push_str(&format!(
            "  {:<14} {:>12}  {}{suffix}\n",
            card.heading(),
            card.value_text,
            card.indicator.text()
        ));
    }
    out
}

fn columns_text(config: &DashboardConfig) -> Result<String> {
    let table = load_table(&config.data_path, &config.encoding, &config.year_column)
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;
    let default = default_column(&table, config.default_column_index);

    let mut out = String::new();
    for (i, column) in table.metric_columns().iter().enumerate() {
        let marker = if Some(column.as_str()) == default { "*" } else { " " };
        out.push_str(&format!("{marker} {i:>2}  {column}\n"));
    }
    Ok(out)
}
